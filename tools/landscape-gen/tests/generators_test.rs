//! Integration tests for the public generator functions

use landscape_gen::{
    Catalog, CodegenError, generate_batch_variations_code, generate_export_code,
    generate_landscape_code, generate_material_code, generate_scatter_code,
    try_generate_landscape_code,
};

/// Every terrain preset's display name and noise values reach the script
#[test]
fn test_landscape_contains_preset_values() {
    for (key, preset) in Catalog::builtin().landscapes().iter() {
        let script = generate_landscape_code(key, 1234);
        let params = &preset.params;

        assert!(script.contains(&preset.name), "{}: name", key);
        assert!(
            script.contains(&format!("['Scale'].default_value = {:?}", params.scale)),
            "{}: scale",
            key
        );
        assert!(
            script.contains(&format!("['Detail'].default_value = {}", params.detail)),
            "{}: detail",
            key
        );
        assert!(
            script.contains(&format!(
                "['Roughness'].default_value = {:?}",
                params.roughness_or_default()
            )),
            "{}: roughness",
            key
        );
        assert!(script.contains("W'].default_value = 1234"), "{}: seed", key);
    }
}

/// Unknown keys produce the default preset's script
#[test]
fn test_unknown_key_matches_default() {
    assert_eq!(
        generate_landscape_code("nonexistent", 42),
        generate_landscape_code("rocky_mountain", 42)
    );
    assert_eq!(
        try_generate_landscape_code("nonexistent", 42).unwrap_err(),
        CodegenError::UnknownTerrain("nonexistent".to_string())
    );
}

/// Seed 0 is replaced by a draw and never reaches the script
#[test]
fn test_zero_seed_never_emitted() {
    for _ in 0..1000 {
        let script = generate_landscape_code("rolling_hills", 0);
        assert!(!script.contains("W'].default_value = 0 "));
        assert!(!script.contains("W'].default_value = 0\n"));
        assert!(script.contains("W'].default_value = "));
    }
}

#[test]
fn test_export_formats() {
    let cases = [
        ("glb", "bpy.ops.export_scene.gltf"),
        ("obj", "bpy.ops.export_scene.obj"),
        ("fbx", "bpy.ops.export_scene.fbx"),
    ];
    for (format, operator) in cases {
        let path = format!("/tmp/exports/terrain.{}", format);
        let script = generate_export_code(&path, format).unwrap();
        assert!(script.contains(operator), "{} operator", format);
        assert!(script.contains(&format!("\"{}\"", path)), "{} path", format);
    }
}

#[test]
fn test_export_rejects_unknown_format() {
    let err = generate_export_code("/tmp/exports/terrain.xyz", "xyz").unwrap_err();
    assert_eq!(err, CodegenError::UnsupportedFormat("xyz".to_string()));
}

#[test]
fn test_batch_contains_count_dir_and_template() {
    let script = generate_batch_variations_code("rolling_hills", 3, "/out");
    assert!(script.contains("range(3)"));
    assert!(script.contains("\"/out\""));
    assert!(script.contains("\"rolling_hills\""));
    assert!(script.contains("landscape_variations.json"));
    assert!(script.contains("Generated 3 variations"));
}

#[test]
fn test_scatter_and_material() {
    let scatter = generate_scatter_code("vegetation", "Rolling Hills", 5).unwrap();
    assert!(scatter.contains("Vegetation Scatter"));
    assert!(scatter.contains("default_value = 0.2\n"));

    assert!(matches!(
        generate_scatter_code("nothing", "Landscape", 5),
        Err(CodegenError::UnknownScatter(_))
    ));

    let material = generate_material_code("alien_landscape");
    assert!(material.contains("Alien Landscape_Material"));
    assert!(material.contains("# #00CED1"));
}
