//! Export generator: writes a scene object to GLB, OBJ or FBX

use std::fmt;
use std::str::FromStr;

use crate::error::CodegenError;
use crate::script::{ScriptBuilder, py_str};

/// Object name the standalone export script looks up.
pub const DEFAULT_EXPORT_OBJECT: &str = "Landscape";

/// Output format of an export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Glb,
    Obj,
    Fbx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Glb, ExportFormat::Obj, ExportFormat::Fbx];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Glb => "glb",
            ExportFormat::Obj => "obj",
            ExportFormat::Fbx => "fbx",
        }
    }

    /// The `bpy.ops` operator that performs the export.
    pub fn operator(self) -> &'static str {
        match self {
            ExportFormat::Glb => "bpy.ops.export_scene.gltf",
            ExportFormat::Obj => "bpy.ops.export_scene.obj",
            ExportFormat::Fbx => "bpy.ops.export_scene.fbx",
        }
    }

    /// Operator keyword arguments following `filepath`.
    fn options(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ExportFormat::Glb => &[
                ("export_format", "'GLB'"),
                ("use_selection", "True"),
                ("export_yup", "True"),
                ("export_materials", "'EXPORT'"),
            ],
            ExportFormat::Obj => &[("use_selection", "True"), ("use_materials", "True")],
            ExportFormat::Fbx => &[("use_selection", "True")],
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "glb" => Ok(ExportFormat::Glb),
            "obj" => Ok(ExportFormat::Obj),
            "fbx" => Ok(ExportFormat::Fbx),
            _ => Err(CodegenError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Script exporting the `Landscape` object to `export_path`.
///
/// `format` must be `glb`, `obj` or `fbx`; anything else is rejected.
pub fn export_code(export_path: &str, format: &str) -> Result<String, CodegenError> {
    let format: ExportFormat = format.parse()?;
    Ok(export_script(DEFAULT_EXPORT_OBJECT, export_path, format))
}

/// Script exporting the object named `object_name`.
pub fn export_script(object_name: &str, export_path: &str, format: ExportFormat) -> String {
    tracing::debug!("Generating {} export of '{}' to {}", format, object_name, export_path);
    let path = py_str(export_path);

    let mut b = ScriptBuilder::new();
    b.line("import bpy");
    b.line("import os");
    b.blank();
    b.comment("Ensure export directory exists");
    b.line(format!("export_dir = os.path.dirname({})", path));
    b.block("if export_dir:", |b| {
        b.line("os.makedirs(export_dir, exist_ok=True)");
    });
    b.blank();
    b.comment("Select the landscape object");
    b.line(format!(
        "landscape = bpy.data.objects.get({})",
        py_str(object_name)
    ));
    b.block("if landscape:", |b| {
        emit_export(b, "landscape", &path, format);
        b.blank();
        b.line(format!("print(\"Exported to \" + {})", path));
    });
    b.block("else:", |b| {
        b.line(format!("print({})", py_str(&format!("{} object not found", object_name))));
    });
    b.finish()
}

/// Emit selection of `object` (a Python variable) followed by the export
/// call writing to `path_expr` (a Python expression).
pub(crate) fn emit_export(
    b: &mut ScriptBuilder,
    object: &str,
    path_expr: &str,
    format: ExportFormat,
) {
    b.line("bpy.ops.object.select_all(action='DESELECT')");
    b.line(format!("bpy.context.view_layer.objects.active = {}", object));
    b.line(format!("{}.select_set(True)", object));
    b.blank();
    b.comment(format!("Export as {}", format.extension().to_uppercase()));

    let mut args = vec![("filepath", path_expr.to_string())];
    args.extend(
        format
            .options()
            .iter()
            .map(|(name, value)| (*name, value.to_string())),
    );
    b.call(format.operator(), &args);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("glb".parse::<ExportFormat>().unwrap(), ExportFormat::Glb);
        assert_eq!("OBJ".parse::<ExportFormat>().unwrap(), ExportFormat::Obj);
        assert_eq!(" fbx ".parse::<ExportFormat>().unwrap(), ExportFormat::Fbx);
        assert_eq!(
            "xyz".parse::<ExportFormat>().unwrap_err(),
            CodegenError::UnsupportedFormat("xyz".to_string())
        );
    }

    #[test]
    fn test_each_format_uses_only_its_operator() {
        for format in ExportFormat::ALL {
            let script = export_script("Landscape", "/tmp/out/terrain", format);
            for other in ExportFormat::ALL {
                assert_eq!(
                    script.contains(other.operator()),
                    other == format,
                    "{} script and {} operator",
                    format,
                    other
                );
            }
        }
    }

    #[test]
    fn test_glb_options() {
        let script = export_code("/tmp/out/terrain.glb", "glb").unwrap();
        assert!(script.contains("filepath=\"/tmp/out/terrain.glb\","));
        assert!(script.contains("export_format='GLB',"));
        assert!(script.contains("export_yup=True,"));
        assert!(script.contains("export_materials='EXPORT'\n"));
        assert!(script.contains("landscape = bpy.data.objects.get(\"Landscape\")"));
    }

    #[test]
    fn test_fbx_selection_only() {
        let script = export_code("/tmp/out/terrain.fbx", "fbx").unwrap();
        assert!(script.contains(
            "bpy.ops.export_scene.fbx(\n        filepath=\"/tmp/out/terrain.fbx\",\n        use_selection=True\n    )"
        ));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert_eq!(
            export_code("/tmp/out/terrain.xyz", "xyz").unwrap_err(),
            CodegenError::UnsupportedFormat("xyz".to_string())
        );
    }

    #[test]
    fn test_path_is_quoted() {
        let script = export_script("Landscape", r#"C:\out\"odd".glb"#, ExportFormat::Obj);
        assert!(script.contains(r#"filepath="C:\\out\\\"odd\".glb","#));
    }

    #[test]
    fn test_bare_filename_skips_makedirs() {
        let script = export_script("Landscape", "terrain.glb", ExportFormat::Glb);
        assert!(script.contains("export_dir = os.path.dirname(\"terrain.glb\")"));
        assert!(script.contains("if export_dir:\n    os.makedirs(export_dir, exist_ok=True)"));
        assert!(!script.contains("\nos.makedirs"));
    }

    #[test]
    fn test_missing_object_is_reported() {
        let script = export_code("/tmp/out/terrain.glb", "glb").unwrap();
        assert!(script.contains("else:\n    print(\"Landscape object not found\")"));

        let script = export_script("Cliffs", "/tmp/out/cliffs.obj", ExportFormat::Obj);
        assert!(script.contains("landscape = bpy.data.objects.get(\"Cliffs\")"));
        assert!(script.contains("else:\n    print(\"Cliffs object not found\")"));
    }
}
