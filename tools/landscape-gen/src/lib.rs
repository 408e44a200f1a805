//! Blender landscape script generator
//!
//! Builds Blender Python (`bpy`) scripts from a small catalog of terrain
//! and scatter presets. Nothing here runs the scripts: every generator
//! returns text for the caller to paste into, or send to, Blender's
//! scripting console.
//!
//! # Example
//! ```no_run
//! // Landscape from a preset with a fixed seed
//! let landscape = landscape_gen::generate_landscape_code("rolling_hills", 42);
//!
//! // Export the result as GLB
//! let export = landscape_gen::generate_export_code("/tmp/exports/hills.glb", "glb")?;
//!
//! // Dump the preset tables for reference
//! landscape_gen::save_templates()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod generators;
pub mod presets;
pub mod script;

use std::path::Path;

pub use error::{CatalogError, CodegenError};
pub use generators::batch::{
    BatchOptions, DEFAULT_BATCH_COUNT, DEFAULT_EXPORT_DIR, METADATA_FILE,
};
pub use generators::export::{DEFAULT_EXPORT_OBJECT, ExportFormat};
pub use presets::{Catalog, ScatterPreset, TEMPLATES_FILE, TerrainPreset};

/// Landscape script for a terrain preset.
///
/// An unknown `template_key` silently uses the default preset
/// (`rocky_mountain`); a `seed` of `0` draws a random seed in 1..=9999.
pub fn generate_landscape_code(template_key: &str, seed: u32) -> String {
    generators::landscape::landscape_code(Catalog::builtin(), template_key, seed)
}

/// Landscape script that fails on an unknown `template_key`.
pub fn try_generate_landscape_code(template_key: &str, seed: u32) -> Result<String, CodegenError> {
    generators::landscape::try_landscape_code(Catalog::builtin(), template_key, seed)
}

/// Script exporting the `Landscape` object to `export_path` as `glb`,
/// `obj` or `fbx`.
pub fn generate_export_code(export_path: &str, format: &str) -> Result<String, CodegenError> {
    generators::export::export_code(export_path, format)
}

/// Script building `count` GLB variations of a preset into `export_dir`,
/// plus a `landscape_variations.json` metadata file.
pub fn generate_batch_variations_code(template_key: &str, count: u32, export_dir: &str) -> String {
    let options = BatchOptions::new(template_key)
        .with_count(count)
        .with_export_dir(export_dir);
    generators::batch::batch_script(Catalog::builtin(), &options)
}

/// Script scattering a preset's objects over `target_object`.
pub fn generate_scatter_code(
    scatter_key: &str,
    target_object: &str,
    seed: u32,
) -> Result<String, CodegenError> {
    generators::scatter::scatter_code(Catalog::builtin(), scatter_key, target_object, seed)
}

/// Height-tinted material script from a terrain preset's color ramp.
pub fn generate_material_code(template_key: &str) -> String {
    generators::material::material_code(Catalog::builtin(), template_key)
}

/// Write both built-in preset tables to `landscape_templates.json` in the
/// working directory, replacing any existing file.
pub fn save_templates() -> Result<(), CatalogError> {
    save_templates_to(Path::new(TEMPLATES_FILE))
}

/// Write both built-in preset tables to `path`.
pub fn save_templates_to(path: &Path) -> Result<(), CatalogError> {
    Catalog::builtin().save(path)
}
