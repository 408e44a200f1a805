//! Landscape generator: plane + geometry-node noise displacement

use crate::error::CodegenError;
use crate::generators::{SeedExpr, emit_node_group, resolve_seed};
use crate::presets::{Catalog, TerrainPreset};
use crate::script::{ScriptBuilder, py_float, py_str};

/// Subdivision level of the base plane.
const SUBDIVISION_LEVEL: u32 = 6;
/// Edge length of the base plane.
const PLANE_SIZE: u32 = 20;

/// Script for `template_key`, falling back to the default preset when the
/// key is unknown. A seed of `0` draws a random one.
pub fn landscape_code(catalog: &Catalog, template_key: &str, seed: u32) -> String {
    let (key, preset) = catalog.terrain_or_default(template_key);
    let seed = resolve_seed(seed, &mut rand::rng());
    tracing::debug!("Generating landscape '{}' with seed {}", key, seed);
    landscape_script(preset, seed)
}

/// Like [`landscape_code`] but an unknown key is an error.
pub fn try_landscape_code(
    catalog: &Catalog,
    template_key: &str,
    seed: u32,
) -> Result<String, CodegenError> {
    let preset = catalog
        .terrain(template_key)
        .ok_or_else(|| CodegenError::UnknownTerrain(template_key.to_string()))?;
    let seed = resolve_seed(seed, &mut rand::rng());
    tracing::debug!("Generating landscape '{}' with seed {}", template_key, seed);
    Ok(landscape_script(preset, seed))
}

/// Standalone script for a preset and an already-resolved seed.
pub fn landscape_script(preset: &TerrainPreset, seed: u32) -> String {
    let mut b = ScriptBuilder::new();
    b.line("import bpy");
    b.blank();
    emit_landscape(&mut b, preset, SeedExpr::Literal(seed));
    b.finish()
}

/// Emit the scene operations that build the landscape object, leaving it
/// bound to `landscape`.
pub(crate) fn emit_landscape(b: &mut ScriptBuilder, preset: &TerrainPreset, seed: SeedExpr<'_>) {
    let params = &preset.params;

    b.comment("Clear existing mesh objects");
    b.line("bpy.ops.object.select_all(action='DESELECT')");
    b.line("bpy.ops.object.select_by_type(type='MESH')");
    b.line("bpy.ops.object.delete()");
    b.blank();

    b.comment("Create base plane");
    b.line(format!(
        "bpy.ops.mesh.primitive_plane_add(size={}, location=(0, 0, 0))",
        PLANE_SIZE
    ));
    b.line("landscape = bpy.context.active_object");
    b.line(format!("landscape.name = {}", py_str(&preset.name)));
    b.blank();

    emit_node_group(b, "landscape", "Landscape_Gen", "Landscape_Gen_Nodes");
    b.blank();

    b.comment("Subdivision node");
    b.line("subdiv = nodes.new('GeometryNodeSubdivisionSurface')");
    b.line(format!(
        "subdiv.inputs['Level'].default_value = {}",
        SUBDIVISION_LEVEL
    ));
    b.blank();

    // W only varies the pattern in 4D mode, so the seed needs it
    b.comment(format!("Noise texture ({})", params.noise_type));
    b.line("noise = nodes.new('ShaderNodeTexNoise')");
    b.line("noise.noise_dimensions = '4D'");
    if let Some(kind) = params.musgrave_type.as_deref() {
        b.line(format!("noise.noise_type = '{}'", musgrave_noise_type(kind)));
    }
    b.line(format!(
        "noise.inputs['Scale'].default_value = {}",
        py_float(params.scale)
    ));
    b.line(format!(
        "noise.inputs['Detail'].default_value = {}",
        params.detail
    ));
    b.line(format!(
        "noise.inputs['Roughness'].default_value = {}",
        py_float(params.roughness_or_default())
    ));
    if let Some(lacunarity) = params.lacunarity {
        b.line(format!(
            "noise.inputs['Lacunarity'].default_value = {}",
            py_float(lacunarity)
        ));
    }
    b.line(format!(
        "noise.inputs['W'].default_value = {}  # Random seed",
        seed.expr()
    ));
    b.blank();

    b.comment("Displacement");
    b.line("set_pos = nodes.new('GeometryNodeSetPosition')");
    b.blank();

    b.comment("Link nodes");
    b.line("links.new(input_node.outputs['Geometry'], subdiv.inputs['Mesh'])");
    b.line("links.new(subdiv.outputs['Mesh'], set_pos.inputs['Geometry'])");
    b.line("links.new(noise.outputs['Fac'], set_pos.inputs['Offset'])");
    b.line("links.new(set_pos.outputs['Geometry'], output_node.inputs['Geometry'])");
    b.blank();
    b.line(format!(
        "print(f\"Created {{landscape.name}} with seed {}\")",
        seed.fstring_part()
    ));
}

/// Map a Musgrave variant name onto the Noise node's `noise_type` enum.
fn musgrave_noise_type(kind: &str) -> &'static str {
    match kind.to_ascii_lowercase().as_str() {
        "ridged" | "ridged_multifractal" => "RIDGED_MULTIFRACTAL",
        "hybrid" | "hybrid_multifractal" => "HYBRID_MULTIFRACTAL",
        "hetero" | "hetero_terrain" => "HETERO_TERRAIN",
        "multifractal" => "MULTIFRACTAL",
        _ => "FBM",
    }
}
