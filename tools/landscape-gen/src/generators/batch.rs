//! Batch generator: many seeded variations of one preset, each exported
//! and recorded in a metadata file

use crate::generators::export::{ExportFormat, emit_export};
use crate::generators::landscape::emit_landscape;
use crate::generators::{SEED_MAX, SEED_MIN, SeedExpr};
use crate::presets::Catalog;
use crate::script::{ScriptBuilder, py_str};

/// Number of variations when none is given.
pub const DEFAULT_BATCH_COUNT: u32 = 5;
/// Export directory when none is given.
pub const DEFAULT_EXPORT_DIR: &str = "/tmp/exports";
/// Metadata file written next to the exports.
pub const METADATA_FILE: &str = "landscape_variations.json";

/// Parameters of a batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    pub template: String,
    pub count: u32,
    pub export_dir: String,
    pub format: ExportFormat,
}

impl BatchOptions {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            count: DEFAULT_BATCH_COUNT,
            export_dir: DEFAULT_EXPORT_DIR.to_string(),
            format: ExportFormat::default(),
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_export_dir(mut self, export_dir: impl Into<String>) -> Self {
        self.export_dir = export_dir.into();
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }
}

/// Script that builds `options.count` variations of the template, exports
/// each one and writes `landscape_variations.json` with index, seed and
/// name of every variation.
///
/// An unknown template falls back to the default preset for the geometry;
/// file names still use the requested template name.
pub fn batch_script(catalog: &Catalog, options: &BatchOptions) -> String {
    let (_, preset) = catalog.terrain_or_default(&options.template);
    tracing::debug!(
        "Generating batch of {} '{}' variations into {}",
        options.count,
        options.template,
        options.export_dir
    );

    let mut b = ScriptBuilder::new();
    b.line("import bpy");
    b.line("import json");
    b.line("import os");
    b.line("import random");
    b.blank();
    b.line("variations = []");
    b.line(format!("export_dir = {}", py_str(&options.export_dir)));
    b.line("os.makedirs(export_dir, exist_ok=True)");
    b.blank();
    b.line(format!("template_name = {}", py_str(&options.template)));
    b.blank();
    b.blank();

    b.block("def build_landscape(seed):", |b| {
        emit_landscape(b, preset, SeedExpr::Variable("seed"));
        b.line("return landscape");
    });
    b.blank();
    b.blank();

    b.block("def export_landscape(landscape, export_path):", |b| {
        emit_export(b, "landscape", "export_path", options.format);
    });
    b.blank();
    b.blank();

    b.block(format!("for i in range({}):", options.count), |b| {
        b.line(format!("seed = random.randint({}, {})", SEED_MIN, SEED_MAX));
        b.line("name = template_name + \"_\" + str(i).zfill(3)");
        b.blank();
        b.comment("Create landscape with this seed");
        b.line("landscape = build_landscape(seed)");
        b.blank();
        b.comment("Store variation data");
        b.block("variation = {", |b| {
            b.line("\"index\": i,");
            b.line("\"seed\": seed,");
            b.line("\"name\": name");
        });
        b.line("}");
        b.line("variations.append(variation)");
        b.blank();
        b.comment("Export each variation");
        b.line(format!(
            "export_path = os.path.join(export_dir, name + \".{}\")",
            options.format.extension()
        ));
        b.line("export_landscape(landscape, export_path)");
        b.line("print(f\"Exported: {export_path}\")");
    });
    b.blank();

    b.comment("Save metadata");
    b.line(format!(
        "metadata_path = os.path.join(export_dir, {})",
        py_str(METADATA_FILE)
    ));
    b.block("with open(metadata_path, 'w') as f:", |b| {
        b.line("json.dump(variations, f, indent=2)");
    });
    b.blank();
    b.line(format!("print(\"Generated {} variations\")", options.count));
    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(options: &BatchOptions) -> String {
        batch_script(Catalog::builtin(), options)
    }

    #[test]
    fn test_defaults() {
        let options = BatchOptions::new("rolling_hills");
        assert_eq!(options.count, 5);
        assert_eq!(options.export_dir, "/tmp/exports");
        assert_eq!(options.format, ExportFormat::Glb);
    }

    #[test]
    fn test_loop_and_paths() {
        let options = BatchOptions::new("rolling_hills")
            .with_count(3)
            .with_export_dir("/out");
        let text = script(&options);
        assert!(text.contains("export_dir = \"/out\""));
        assert!(text.contains("template_name = \"rolling_hills\""));
        assert!(text.contains("for i in range(3):"));
        assert!(text.contains("    seed = random.randint(1, 9999)"));
        assert!(text.contains("name = template_name + \"_\" + str(i).zfill(3)"));
        assert!(text.contains("export_path = os.path.join(export_dir, name + \".glb\")"));
        assert!(text.contains("os.path.join(export_dir, \"landscape_variations.json\")"));
        assert!(text.contains("json.dump(variations, f, indent=2)"));
        assert!(text.contains("print(\"Generated 3 variations\")"));
    }

    #[test]
    fn test_iteration_runs_landscape_and_export() {
        let text = script(&BatchOptions::new("rolling_hills").with_count(2));
        assert!(text.contains("def build_landscape(seed):\n    # Clear existing mesh objects"));
        assert!(text.contains("    noise.inputs['W'].default_value = seed  # Random seed"));
        assert!(text.contains("    landscape.name = \"Rolling Hills\""));
        assert!(text.contains("def export_landscape(landscape, export_path):"));
        assert!(text.contains("        filepath=export_path,"));
        assert!(text.contains("    landscape = build_landscape(seed)"));
        assert!(text.contains("    export_landscape(landscape, export_path)"));
    }

    #[test]
    fn test_format_selects_extension_and_operator() {
        let text = script(&BatchOptions::new("desert_dunes").with_format(ExportFormat::Fbx));
        assert!(text.contains("name + \".fbx\""));
        assert!(text.contains("bpy.ops.export_scene.fbx("));
        assert!(!text.contains("bpy.ops.export_scene.gltf("));
    }

    #[test]
    fn test_unknown_template_keeps_requested_name() {
        let text = script(&BatchOptions::new("moon_base"));
        assert!(text.contains("template_name = \"moon_base\""));
        assert!(text.contains("landscape.name = \"Rocky Mountain Terrain\""));
    }

    #[test]
    fn test_variation_record_layout() {
        let text = script(&BatchOptions::new("fjord_coast"));
        assert!(text.contains(
            "    variation = {\n        \"index\": i,\n        \"seed\": seed,\n        \"name\": name\n    }"
        ));
    }
}
