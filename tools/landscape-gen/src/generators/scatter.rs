//! Scatter generator: distributes instances over a terrain with slope and
//! altitude limits from a scatter preset.

use crate::error::CodegenError;
use crate::generators::{SeedExpr, emit_node_group, resolve_seed};
use crate::presets::{Catalog, ScatterPreset};
use crate::script::{ScriptBuilder, py_float, py_str};

/// Script scattering preset `scatter_key` over the object `target_object`.
/// A seed of `0` draws a random one.
pub fn scatter_code(
    catalog: &Catalog,
    scatter_key: &str,
    target_object: &str,
    seed: u32,
) -> Result<String, CodegenError> {
    let preset = catalog
        .scatter_preset(scatter_key)
        .ok_or_else(|| CodegenError::UnknownScatter(scatter_key.to_string()))?;
    let seed = resolve_seed(seed, &mut rand::rng());
    tracing::debug!(
        "Generating scatter '{}' on '{}' with seed {}",
        scatter_key,
        target_object,
        seed
    );
    Ok(scatter_script(preset, target_object, SeedExpr::Literal(seed)))
}

fn scatter_script(preset: &ScatterPreset, target_object: &str, seed: SeedExpr<'_>) -> String {
    let instance_name = format!("{}_Instance", preset.name);

    let mut b = ScriptBuilder::new();
    b.line("import bpy");
    b.blank();
    b.line(format!("target = bpy.data.objects.get({})", py_str(target_object)));
    b.block("if target is None:", |b| {
        b.line(format!(
            "raise RuntimeError({})",
            py_str(&format!("Scatter target not found: {}", target_object))
        ));
    });
    b.blank();

    b.comment("Placeholder instance, hidden below the terrain");
    b.line(
        "bpy.ops.mesh.primitive_ico_sphere_add(radius=0.5, subdivisions=2, location=(0, 0, -100))",
    );
    b.line("instance = bpy.context.active_object");
    b.line(format!("instance.name = {}", py_str(&instance_name)));
    b.line("instance.hide_render = True");
    b.line("instance.hide_set(True)");
    b.blank();

    emit_node_group(
        &mut b,
        "target",
        &preset.name,
        &format!("{}_Nodes", preset.name),
    );
    b.blank();

    b.comment("Distribute points");
    b.line("distribute = nodes.new('GeometryNodeDistributePointsOnFaces')");
    b.line("distribute.distribute_method = 'RANDOM'");
    b.line(format!(
        "distribute.inputs['Density'].default_value = {}",
        py_float(preset.density)
    ));
    b.line(format!(
        "distribute.inputs['Seed'].default_value = {}",
        seed.expr()
    ));
    b.blank();

    // slope = 1 - normal.z; steeper than slope_max is rejected
    b.comment("Slope limit");
    b.line("normal_xyz = nodes.new('ShaderNodeSeparateXYZ')");
    b.line("too_steep = nodes.new('ShaderNodeMath')");
    b.line("too_steep.operation = 'LESS_THAN'");
    b.line(format!(
        "too_steep.inputs[1].default_value = {}",
        py_float(1.0 - preset.slope_max)
    ));
    b.blank();

    b.comment("Altitude band, normalized over the terrain bounds");
    b.line("bounds = nodes.new('GeometryNodeBoundBox')");
    b.line("bounds_min = nodes.new('ShaderNodeSeparateXYZ')");
    b.line("bounds_max = nodes.new('ShaderNodeSeparateXYZ')");
    b.line("position = nodes.new('GeometryNodeInputPosition')");
    b.line("position_xyz = nodes.new('ShaderNodeSeparateXYZ')");
    b.line("altitude = nodes.new('ShaderNodeMapRange')");
    b.line("too_low = nodes.new('ShaderNodeMath')");
    b.line("too_low.operation = 'LESS_THAN'");
    b.line(format!(
        "too_low.inputs[1].default_value = {}",
        py_float(preset.altitude_min)
    ));
    b.line("too_high = nodes.new('ShaderNodeMath')");
    b.line("too_high.operation = 'GREATER_THAN'");
    b.line(format!(
        "too_high.inputs[1].default_value = {}",
        py_float(preset.altitude_max)
    ));
    b.line("outside_band = nodes.new('FunctionNodeBooleanMath')");
    b.line("outside_band.operation = 'OR'");
    b.line("reject = nodes.new('FunctionNodeBooleanMath')");
    b.line("reject.operation = 'OR'");
    b.line("cull = nodes.new('GeometryNodeDeleteGeometry')");
    b.line("cull.domain = 'POINT'");
    b.blank();

    b.comment("Instances with random scale");
    b.line("object_info = nodes.new('GeometryNodeObjectInfo')");
    b.line("object_info.inputs['Object'].default_value = instance");
    b.line("random_scale = nodes.new('FunctionNodeRandomValue')");
    b.line("random_scale.data_type = 'FLOAT'");
    b.line(format!(
        "random_scale.inputs[2].default_value = {}",
        py_float(preset.scale_min)
    ));
    b.line(format!(
        "random_scale.inputs[3].default_value = {}",
        py_float(preset.scale_max)
    ));
    b.line("instance_points = nodes.new('GeometryNodeInstanceOnPoints')");
    b.line("join = nodes.new('GeometryNodeJoinGeometry')");
    b.blank();

    b.comment("Link nodes");
    for link in [
        "links.new(input_node.outputs['Geometry'], distribute.inputs['Mesh'])",
        "links.new(distribute.outputs['Normal'], normal_xyz.inputs['Vector'])",
        "links.new(normal_xyz.outputs['Z'], too_steep.inputs[0])",
        "links.new(input_node.outputs['Geometry'], bounds.inputs['Geometry'])",
        "links.new(bounds.outputs['Min'], bounds_min.inputs['Vector'])",
        "links.new(bounds.outputs['Max'], bounds_max.inputs['Vector'])",
        "links.new(position.outputs['Position'], position_xyz.inputs['Vector'])",
        "links.new(position_xyz.outputs['Z'], altitude.inputs['Value'])",
        "links.new(bounds_min.outputs['Z'], altitude.inputs['From Min'])",
        "links.new(bounds_max.outputs['Z'], altitude.inputs['From Max'])",
        "links.new(altitude.outputs['Result'], too_low.inputs[0])",
        "links.new(altitude.outputs['Result'], too_high.inputs[0])",
        "links.new(too_low.outputs['Value'], outside_band.inputs[0])",
        "links.new(too_high.outputs['Value'], outside_band.inputs[1])",
        "links.new(outside_band.outputs['Boolean'], reject.inputs[0])",
        "links.new(too_steep.outputs['Value'], reject.inputs[1])",
        "links.new(distribute.outputs['Points'], cull.inputs['Geometry'])",
        "links.new(reject.outputs['Boolean'], cull.inputs['Selection'])",
        "links.new(cull.outputs['Geometry'], instance_points.inputs['Points'])",
        "links.new(object_info.outputs['Geometry'], instance_points.inputs['Instance'])",
        "links.new(random_scale.outputs[1], instance_points.inputs['Scale'])",
        "links.new(input_node.outputs['Geometry'], join.inputs['Geometry'])",
        "links.new(instance_points.outputs['Instances'], join.inputs['Geometry'])",
        "links.new(join.outputs['Geometry'], output_node.inputs['Geometry'])",
    ] {
        b.line(link);
    }
    b.blank();
    b.line(format!(
        "print({})",
        py_str(&format!("Scattered {} on {}", preset.name, target_object))
    ));
    b.finish()
}
