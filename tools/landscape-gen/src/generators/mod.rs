//! Script generators
//!
//! Each generator turns presets into a Blender Python script. Shared
//! fragments (seed handling, node group setup) live here so the batch
//! generator can reuse the landscape and export emitters inside its loop.

pub mod batch;
pub mod export;
pub mod landscape;
pub mod material;
pub mod scatter;

use rand::Rng;

use crate::script::{ScriptBuilder, py_str};

/// Smallest seed ever drawn.
pub const SEED_MIN: u32 = 1;
/// Largest seed ever drawn.
pub const SEED_MAX: u32 = 9999;

/// Replace the "pick one for me" seed `0` with a draw from
/// `SEED_MIN..=SEED_MAX`. Any other seed is returned unchanged.
pub fn resolve_seed<R: Rng + ?Sized>(seed: u32, rng: &mut R) -> u32 {
    if seed == 0 {
        rng.random_range(SEED_MIN..=SEED_MAX)
    } else {
        seed
    }
}

/// How a seed appears in generated code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SeedExpr<'a> {
    /// A literal baked into the script
    Literal(u32),
    /// A Python variable in scope at the emission point
    Variable(&'a str),
}

impl SeedExpr<'_> {
    /// Python expression for the seed.
    pub(crate) fn expr(&self) -> String {
        match self {
            SeedExpr::Literal(seed) => seed.to_string(),
            SeedExpr::Variable(name) => name.to_string(),
        }
    }

    /// Text to place inside an f-string.
    pub(crate) fn fstring_part(&self) -> String {
        match self {
            SeedExpr::Literal(seed) => seed.to_string(),
            SeedExpr::Variable(name) => format!("{{{}}}", name),
        }
    }
}

/// Attach a new geometry node group to `owner` (a Python variable) and
/// create group input/output nodes with Geometry sockets.
///
/// Leaves `nodes`, `links`, `input_node` and `output_node` in scope.
pub(crate) fn emit_node_group(b: &mut ScriptBuilder, owner: &str, modifier: &str, group: &str) {
    b.comment("Add geometry nodes modifier");
    b.line(format!(
        "modifier = {}.modifiers.new(name={}, type='NODES')",
        owner,
        py_str(modifier)
    ));
    b.blank();
    b.comment("Create new node group");
    b.line(format!(
        "node_group = bpy.data.node_groups.new(name={}, type='GeometryNodeTree')",
        py_str(group)
    ));
    b.line("modifier.node_group = node_group");
    b.blank();
    b.comment("Add nodes");
    b.line("nodes = node_group.nodes");
    b.line("links = node_group.links");
    b.blank();
    b.comment("Input and Output nodes");
    b.line("input_node = nodes.new('NodeGroupInput')");
    b.line("output_node = nodes.new('NodeGroupOutput')");
    b.line(
        "node_group.interface.new_socket(name=\"Geometry\", socket_type='NodeSocketGeometry', in_out='INPUT')",
    );
    b.line(
        "node_group.interface.new_socket(name=\"Geometry\", socket_type='NodeSocketGeometry', in_out='OUTPUT')",
    );
}
