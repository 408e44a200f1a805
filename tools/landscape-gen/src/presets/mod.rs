//! Preset catalog
//!
//! Terrain and scatter presets live in order-preserving tables keyed by a
//! short identifier. The built-in catalog is created once and never
//! mutated; custom catalogs can be loaded from a JSON document in the same
//! shape `save_templates` writes.

mod scatter;
mod terrain;

pub use scatter::ScatterPreset;
pub use terrain::{
    ColorRamp, ColorStop, DEFAULT_DETAIL, DEFAULT_ROUGHNESS, DEFAULT_SCALE, DEFAULT_TERRAIN,
    NoiseType, TerrainParams, TerrainPreset,
};

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::LazyLock;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;

/// File name written by `save_templates`.
pub const TEMPLATES_FILE: &str = "landscape_templates.json";

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    landscapes: terrain::builtin_terrain(),
    scatter: scatter::builtin_scatter(),
});

// =============================================================================
// Preset table
// =============================================================================

/// Ordered key -> preset mapping. Serialized as a JSON object in
/// insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetTable<T> {
    entries: Vec<(String, T)>,
}

impl<T> PresetTable<T> {
    pub fn from_entries(entries: Vec<(String, T)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// First entry in authoring order.
    pub fn first(&self) -> Option<(&str, &T)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.keys().find(|k| !seen.insert(*k))
    }
}

impl<T: Serialize> Serialize for PresetTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PresetTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for TableVisitor<T> {
            type Value = PresetTable<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of preset key to preset")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(PresetTable { entries })
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Both preset tables, nested under the keys used in the JSON dump.
///
/// Only built through [`Catalog::new`], [`Catalog::from_json`] or
/// [`Catalog::load`], all of which validate, so the terrain table is never
/// empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Catalog {
    landscapes: PresetTable<TerrainPreset>,
    scatter: PresetTable<ScatterPreset>,
}

/// On-disk layout, validated into a [`Catalog`].
#[derive(Deserialize)]
struct CatalogFile {
    landscapes: PresetTable<TerrainPreset>,
    scatter: PresetTable<ScatterPreset>,
}

impl Catalog {
    /// Build a catalog from both tables, rejecting invalid preset data.
    pub fn new(
        landscapes: PresetTable<TerrainPreset>,
        scatter: PresetTable<ScatterPreset>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            landscapes,
            scatter,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The presets shipped with the tool.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Read a catalog from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        let catalog = Self::from_json(&text)?;
        tracing::debug!(
            "Loaded {} terrain and {} scatter presets from {}",
            catalog.landscapes.len(),
            catalog.scatter.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.landscapes, file.scatter)
    }

    /// Serialize with two-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the catalog to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        tracing::info!("Saved presets to {}", path.display());
        Ok(())
    }

    pub fn landscapes(&self) -> &PresetTable<TerrainPreset> {
        &self.landscapes
    }

    pub fn scatter(&self) -> &PresetTable<ScatterPreset> {
        &self.scatter
    }

    pub fn terrain(&self, key: &str) -> Option<&TerrainPreset> {
        self.landscapes.get(key)
    }

    pub fn scatter_preset(&self, key: &str) -> Option<&ScatterPreset> {
        self.scatter.get(key)
    }

    /// Look up a terrain preset, substituting the default preset for an
    /// unknown key. Returns the key actually used.
    pub fn terrain_or_default<'a>(&'a self, key: &'a str) -> (&'a str, &'a TerrainPreset) {
        if let Some(preset) = self.landscapes.get(key) {
            return (key, preset);
        }
        let (fallback_key, fallback) = self.default_terrain();
        tracing::warn!(
            "Unknown terrain preset '{}', using '{}' instead",
            key,
            fallback_key
        );
        (fallback_key, fallback)
    }

    /// `rocky_mountain` when present, otherwise the first terrain preset.
    ///
    /// Every constructor validates, so the terrain table is non-empty here.
    pub fn default_terrain(&self) -> (&str, &TerrainPreset) {
        match self.landscapes.get(DEFAULT_TERRAIN) {
            Some(preset) => (DEFAULT_TERRAIN, preset),
            None => self
                .landscapes
                .first()
                .expect("catalog has at least one terrain preset"),
        }
    }

    /// Check every invariant of the preset data, stopping at the first
    /// violation.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.landscapes.is_empty() {
            return Err(CatalogError::EmptyTerrain);
        }
        if let Some(key) = self.landscapes.first_duplicate() {
            return Err(CatalogError::DuplicateKey(key.to_string()));
        }
        if let Some(key) = self.scatter.first_duplicate() {
            return Err(CatalogError::DuplicateKey(key.to_string()));
        }

        for (key, preset) in self.landscapes.iter() {
            let params = &preset.params;
            if params.scale <= 0.0 {
                return Err(CatalogError::invalid(key, "scale must be positive"));
            }
            params
                .color_ramp
                .check()
                .map_err(|reason| CatalogError::invalid(key, reason))?;
        }
        for (key, preset) in self.scatter.iter() {
            preset
                .check()
                .map_err(|reason| CatalogError::invalid(key, reason))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_validates() {
        Catalog::builtin().validate().unwrap();
    }

    #[test]
    fn test_builtin_keys_in_order() {
        let catalog = Catalog::builtin();
        let terrain: Vec<_> = catalog.landscapes.keys().collect();
        assert_eq!(
            terrain,
            vec![
                "rocky_mountain",
                "rolling_hills",
                "desert_dunes",
                "alien_landscape",
                "fjord_coast"
            ]
        );
        let scatter: Vec<_> = catalog.scatter.keys().collect();
        assert_eq!(scatter, vec!["forest", "rocks", "vegetation"]);
    }

    #[test]
    fn test_terrain_or_default() {
        let catalog = Catalog::builtin();
        let (key, preset) = catalog.terrain_or_default("desert_dunes");
        assert_eq!(key, "desert_dunes");
        assert_eq!(preset.name, "Desert Dunes");

        let (key, preset) = catalog.terrain_or_default("nonexistent");
        assert_eq!(key, DEFAULT_TERRAIN);
        assert_eq!(preset.name, "Rocky Mountain Terrain");
    }

    #[test]
    fn test_default_falls_back_to_first_entry() {
        let mut catalog = Catalog::builtin().clone();
        catalog.landscapes.entries.remove(0);
        let (key, _) = catalog.default_terrain();
        assert_eq!(key, "rolling_hills");
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = Catalog::builtin();
        let json = catalog.to_json().unwrap();
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(&back, catalog);
    }

    #[test]
    fn test_json_preserves_table_order() {
        let json = Catalog::builtin().to_json().unwrap();
        let rocky = json.find("\"rocky_mountain\"").unwrap();
        let fjord = json.find("\"fjord_coast\"").unwrap();
        let forest = json.find("\"forest\"").unwrap();
        assert!(rocky < fjord);
        assert!(fjord < forest);
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let mut catalog = Catalog::builtin().clone();
        let copy = catalog.scatter.entries[0].clone();
        catalog.scatter.entries.push(copy);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateKey(key)) if key == "forest"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_terrain() {
        let json = r#"{"landscapes": {}, "scatter": {}}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::EmptyTerrain)
        ));
    }

    #[test]
    fn test_new_rejects_empty_terrain() {
        let built = Catalog::new(
            PresetTable::from_entries(Vec::new()),
            Catalog::builtin().scatter().clone(),
        );
        assert!(matches!(built, Err(CatalogError::EmptyTerrain)));
    }

    #[test]
    fn test_new_accepts_valid_tables() {
        let builtin = Catalog::builtin();
        let built = Catalog::new(builtin.landscapes().clone(), builtin.scatter().clone()).unwrap();
        assert_eq!(&built, builtin);
        assert_eq!(built.default_terrain().0, DEFAULT_TERRAIN);
    }

    #[test]
    fn test_validate_names_offending_preset() {
        let json = r##"{
            "landscapes": {
                "bad": {
                    "name": "Bad",
                    "description": "",
                    "params": {
                        "noise_type": "Musgrave",
                        "color_ramp": {"0.8": "#FFFFFF", "0.2": "#000000"}
                    }
                }
            },
            "scatter": {}
        }"##;
        match Catalog::from_json(json) {
            Err(CatalogError::InvalidPreset { key, .. }) => assert_eq!(key, "bad"),
            other => panic!("expected InvalidPreset, got {:?}", other),
        }
    }
}
