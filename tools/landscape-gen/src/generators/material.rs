//! Material generator: tints a landscape by height using its color ramp

use crate::error::CodegenError;
use crate::presets::{Catalog, TerrainPreset};
use crate::script::{ScriptBuilder, py_float, py_float_tuple, py_str};

/// Material script for `template_key`, with the same fallback as the
/// landscape generator.
pub fn material_code(catalog: &Catalog, template_key: &str) -> String {
    let (key, preset) = catalog.terrain_or_default(template_key);
    tracing::debug!("Generating material for '{}'", key);
    material_script(preset)
}

/// Like [`material_code`] but an unknown key is an error.
pub fn try_material_code(catalog: &Catalog, template_key: &str) -> Result<String, CodegenError> {
    let preset = catalog
        .terrain(template_key)
        .ok_or_else(|| CodegenError::UnknownTerrain(template_key.to_string()))?;
    Ok(material_script(preset))
}

/// Material for the object the landscape generator created from `preset`.
///
/// Height is the displacement's Z range, which spans [0, 1] because the
/// noise factor drives the offset directly.
pub fn material_script(preset: &TerrainPreset) -> String {
    let ramp = &preset.params.color_ramp;

    let mut b = ScriptBuilder::new();
    b.line("import bpy");
    b.blank();
    b.line(format!("landscape = bpy.data.objects.get({})", py_str(&preset.name)));
    b.block("if landscape is None:", |b| {
        b.line(format!(
            "raise RuntimeError({})",
            py_str(&format!("Landscape not found: {}", preset.name))
        ));
    });
    b.blank();
    b.line(format!(
        "material = bpy.data.materials.new(name={})",
        py_str(&format!("{}_Material", preset.name))
    ));
    b.line("material.use_nodes = True");
    b.line("nodes = material.node_tree.nodes");
    b.line("links = material.node_tree.links");
    b.line("bsdf = nodes.get(\"Principled BSDF\")");
    b.blank();

    b.comment("Normalized height");
    b.line("geometry = nodes.new('ShaderNodeNewGeometry')");
    b.line("position_xyz = nodes.new('ShaderNodeSeparateXYZ')");
    b.line("height = nodes.new('ShaderNodeMapRange')");
    b.line("height.inputs['From Min'].default_value = 0.0");
    b.line("height.inputs['From Max'].default_value = 1.0");
    b.blank();

    b.comment("Color ramp");
    b.line("ramp = nodes.new('ShaderNodeValToRGB')");
    b.line("elements = ramp.color_ramp.elements");
    b.block("while len(elements) > 1:", |b| {
        b.line("elements.remove(elements[-1])");
    });
    for (i, stop) in ramp.stops().iter().enumerate() {
        // check() guarantees parseable colors on loaded catalogs
        let rgba = stop.linear_rgba().unwrap_or([0.0, 0.0, 0.0, 1.0]);
        if i == 0 {
            b.line(format!("elements[0].position = {}", py_float(stop.position)));
            b.line(format!("elements[0].color = {}  # {}", py_float_tuple(&rgba), stop.color));
        } else {
            b.line(format!("stop = elements.new({})", py_float(stop.position)));
            b.line(format!("stop.color = {}  # {}", py_float_tuple(&rgba), stop.color));
        }
    }
    b.blank();

    b.comment("Link nodes");
    b.line("links.new(geometry.outputs['Position'], position_xyz.inputs['Vector'])");
    b.line("links.new(position_xyz.outputs['Z'], height.inputs['Value'])");
    b.line("links.new(height.outputs['Result'], ramp.inputs['Fac'])");
    b.line("links.new(ramp.outputs['Color'], bsdf.inputs['Base Color'])");
    b.blank();

    b.comment("Assign to landscape");
    b.block("if landscape.data.materials:", |b| {
        b.line("landscape.data.materials[0] = material");
    });
    b.block("else:", |b| {
        b.line("landscape.data.materials.append(material)");
    });
    b.blank();
    b.line(format!(
        "print({})",
        py_str(&format!("Applied {} color ramp ({} stops)", preset.name, ramp.len()))
    ));
    b.finish()
}
