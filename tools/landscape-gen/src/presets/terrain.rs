//! Terrain presets
//!
//! Each preset describes one landscape style: the noise family driving the
//! heightfield, its tuning parameters, and a color ramp that tints the
//! surface by normalized elevation.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::PresetTable;

/// Key of the preset used when a lookup misses.
pub const DEFAULT_TERRAIN: &str = "rocky_mountain";

/// Procedural noise family used for the heightfield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseType {
    #[default]
    Musgrave,
    Voronoi,
    Wave,
}

impl fmt::Display for NoiseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoiseType::Musgrave => "Musgrave",
            NoiseType::Voronoi => "Voronoi",
            NoiseType::Wave => "Wave",
        };
        f.write_str(name)
    }
}

/// A named terrain style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainPreset {
    pub name: String,
    pub description: String,
    pub params: TerrainParams,
}

/// Noise and shading parameters for a terrain preset.
///
/// Family-specific fields are only present on presets that use them and
/// are omitted from the JSON dump otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    pub noise_type: NoiseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub musgrave_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_detail")]
    pub detail: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lacunarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_profile: Option<String>,
    #[serde(default = "default_height_multiplier")]
    pub height_multiplier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erosion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow_threshold: Option<f64>,
    #[serde(default)]
    pub color_ramp: ColorRamp,
}

/// Noise scale used when a preset does not set one.
pub const DEFAULT_SCALE: f64 = 15.0;
/// Noise detail used when a preset does not set one.
pub const DEFAULT_DETAIL: u32 = 10;
/// Noise roughness used when a preset does not set one.
pub const DEFAULT_ROUGHNESS: f64 = 0.5;

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

fn default_detail() -> u32 {
    DEFAULT_DETAIL
}

fn default_height_multiplier() -> f64 {
    1.0
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            noise_type: NoiseType::default(),
            musgrave_type: None,
            distance: None,
            feature: None,
            scale: DEFAULT_SCALE,
            detail: DEFAULT_DETAIL,
            roughness: None,
            dimension: None,
            lacunarity: None,
            i_scale: None,
            wave_type: None,
            wave_direction: None,
            wave_profile: None,
            height_multiplier: default_height_multiplier(),
            erosion: None,
            water_level: None,
            snow_threshold: None,
            color_ramp: ColorRamp::default(),
        }
    }
}

impl TerrainParams {
    /// Roughness fed to the noise texture.
    pub fn roughness_or_default(&self) -> f64 {
        self.roughness.unwrap_or(DEFAULT_ROUGHNESS)
    }
}

// =============================================================================
// Color ramp
// =============================================================================

/// One color stop on a ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStop {
    /// Normalized height in [0, 1]
    pub position: f64,
    /// Hex color, `#RRGGBB`
    pub color: String,
}

impl ColorStop {
    /// Parse the hex color into sRGB bytes.
    pub fn rgb(&self) -> Option<[u8; 3]> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some([channel(0)?, channel(2)?, channel(4)?])
    }

    /// Linear RGBA as the shader node editor expects it.
    pub fn linear_rgba(&self) -> Option<[f64; 4]> {
        let [r, g, b] = self.rgb()?;
        Some([srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0])
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Ordered mapping from normalized height to color.
///
/// Serialized as a JSON object keyed by the position (`"0.35": "#696969"`),
/// keeping authoring order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    pub fn from_stops(stops: &[(f64, &str)]) -> Self {
        Self {
            stops: stops
                .iter()
                .map(|&(position, color)| ColorStop {
                    position,
                    color: color.to_string(),
                })
                .collect(),
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Check that positions are strictly increasing inside [0, 1] and
    /// every color parses.
    pub fn check(&self) -> Result<(), String> {
        let mut previous: Option<f64> = None;
        for stop in &self.stops {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(format!("color ramp position {} outside [0, 1]", stop.position));
            }
            if let Some(prev) = previous {
                if stop.position <= prev {
                    return Err(format!(
                        "color ramp positions not increasing ({} after {})",
                        stop.position, prev
                    ));
                }
            }
            if stop.rgb().is_none() {
                return Err(format!("invalid color '{}'", stop.color));
            }
            previous = Some(stop.position);
        }
        Ok(())
    }
}

/// Position keys are written the way a float literal reads (`0.0`, `0.35`).
fn position_key(position: f64) -> String {
    format!("{:?}", position)
}

impl Serialize for ColorRamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stops.len()))?;
        for stop in &self.stops {
            map.serialize_entry(&position_key(stop.position), &stop.color)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColorRamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RampVisitor;

        impl<'de> Visitor<'de> for RampVisitor {
            type Value = ColorRamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from height position to hex color")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ColorRamp, A::Error> {
                let mut stops = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, color)) = access.next_entry::<String, String>()? {
                    let position = key.trim().parse::<f64>().map_err(|_| {
                        serde::de::Error::custom(format!("invalid ramp position '{}'", key))
                    })?;
                    stops.push(ColorStop { position, color });
                }
                Ok(ColorRamp { stops })
            }
        }

        deserializer.deserialize_map(RampVisitor)
    }
}

// =============================================================================
// Built-in presets
// =============================================================================

fn preset(name: &str, description: &str, params: TerrainParams) -> TerrainPreset {
    TerrainPreset {
        name: name.to_string(),
        description: description.to_string(),
        params,
    }
}

/// The terrain presets shipped with the tool. `rocky_mountain` comes first
/// and is the fallback.
pub(crate) fn builtin_terrain() -> PresetTable<TerrainPreset> {
    PresetTable::from_entries(vec![
        (
            DEFAULT_TERRAIN.to_string(),
            preset(
                "Rocky Mountain Terrain",
                "High-frequency noise terrain with snow caps",
                TerrainParams {
                    noise_type: NoiseType::Musgrave,
                    scale: 15.0,
                    detail: 15,
                    roughness: Some(0.8),
                    dimension: Some(3.0),
                    lacunarity: Some(2.5),
                    i_scale: Some(1.0),
                    height_multiplier: 8.0,
                    snow_threshold: Some(0.6),
                    color_ramp: ColorRamp::from_stops(&[
                        (0.0, "#5C4033"),
                        (0.5, "#8B7355"),
                        (0.7, "#FFFFFF"),
                    ]),
                    ..Default::default()
                },
            ),
        ),
        (
            "rolling_hills".to_string(),
            preset(
                "Rolling Hills",
                "Smooth, organic terrain for pastoral scenes",
                TerrainParams {
                    noise_type: NoiseType::Voronoi,
                    scale: 25.0,
                    detail: 8,
                    roughness: Some(0.4),
                    dimension: Some(2.0),
                    lacunarity: Some(2.0),
                    i_scale: Some(0.5),
                    height_multiplier: 3.0,
                    color_ramp: ColorRamp::from_stops(&[
                        (0.0, "#228B22"),
                        (0.3, "#7CFC00"),
                        (0.7, "#DEB887"),
                    ]),
                    ..Default::default()
                },
            ),
        ),
        (
            "desert_dunes".to_string(),
            preset(
                "Desert Dunes",
                "Wave-based terrain for desert scenes",
                TerrainParams {
                    noise_type: NoiseType::Wave,
                    scale: 8.0,
                    detail: 4,
                    roughness: Some(0.2),
                    wave_type: Some("Bands".to_string()),
                    wave_direction: Some("Y".to_string()),
                    wave_profile: Some("Sine".to_string()),
                    height_multiplier: 4.0,
                    color_ramp: ColorRamp::from_stops(&[
                        (0.0, "#F4A460"),
                        (0.5, "#DEB887"),
                        (1.0, "#F5DEB3"),
                    ]),
                    ..Default::default()
                },
            ),
        ),
        (
            "alien_landscape".to_string(),
            preset(
                "Alien Landscape",
                "Voronoi-based surreal terrain",
                TerrainParams {
                    noise_type: NoiseType::Voronoi,
                    distance: Some("Chebyshev".to_string()),
                    feature: Some("F2-F1".to_string()),
                    scale: 12.0,
                    detail: 12,
                    roughness: Some(0.6),
                    height_multiplier: 6.0,
                    color_ramp: ColorRamp::from_stops(&[
                        (0.0, "#4B0082"),
                        (0.3, "#8A2BE2"),
                        (0.6, "#FF1493"),
                        (0.9, "#00CED1"),
                    ]),
                    ..Default::default()
                },
            ),
        ),
        (
            "fjord_coast".to_string(),
            preset(
                "Fjord Coast",
                "Sharp, dramatic coastal terrain",
                TerrainParams {
                    noise_type: NoiseType::Musgrave,
                    musgrave_type: Some("Ridged".to_string()),
                    scale: 20.0,
                    detail: 16,
                    dimension: Some(2.5),
                    lacunarity: Some(2.0),
                    i_scale: Some(1.2),
                    height_multiplier: 12.0,
                    erosion: Some(true),
                    water_level: Some(0.3),
                    color_ramp: ColorRamp::from_stops(&[
                        (0.0, "#191970"),
                        (0.3, "#4682B4"),
                        (0.35, "#696969"),
                        (0.6, "#A9A9A9"),
                        (0.8, "#F5F5F5"),
                    ]),
                    ..Default::default()
                },
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_is_first() {
        let table = builtin_terrain();
        assert_eq!(table.keys().next(), Some(DEFAULT_TERRAIN));
    }

    #[test]
    fn test_builtin_ramps_are_valid() {
        for (key, preset) in builtin_terrain().iter() {
            assert!(preset.params.color_ramp.check().is_ok(), "{} ramp", key);
        }
    }

    #[test]
    fn test_ramp_rejects_unordered_positions() {
        let ramp = ColorRamp::from_stops(&[(0.5, "#000000"), (0.2, "#FFFFFF")]);
        assert!(ramp.check().is_err());

        let ramp = ColorRamp::from_stops(&[(0.0, "#000000"), (1.5, "#FFFFFF")]);
        assert!(ramp.check().is_err());
    }

    #[test]
    fn test_ramp_rejects_bad_color() {
        let ramp = ColorRamp::from_stops(&[(0.0, "green")]);
        assert!(ramp.check().is_err());
    }

    #[test]
    fn test_signed_hex_digits_are_not_a_color() {
        // from_str_radix alone would read "+F" as 15
        let stop = ColorStop {
            position: 0.0,
            color: "#+F+F+F".to_string(),
        };
        assert_eq!(stop.rgb(), None);
        assert!(ColorRamp::from_stops(&[(0.0, "#+F+F+F")]).check().is_err());
    }

    #[test]
    fn test_ramp_serializes_in_authoring_order() {
        let ramp =
            ColorRamp::from_stops(&[(0.0, "#191970"), (0.35, "#696969"), (1.0, "#F5F5F5")]);
        let json = serde_json::to_string(&ramp).unwrap();
        assert_eq!(json, r##"{"0.0":"#191970","0.35":"#696969","1.0":"#F5F5F5"}"##);

        let back: ColorRamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ramp);
    }

    #[test]
    fn test_linear_rgba() {
        let white = ColorStop {
            position: 0.0,
            color: "#FFFFFF".to_string(),
        };
        assert_eq!(white.linear_rgba(), Some([1.0, 1.0, 1.0, 1.0]));

        let black = ColorStop {
            position: 0.0,
            color: "#000000".to_string(),
        };
        assert_eq!(black.linear_rgba(), Some([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let params: TerrainParams = serde_json::from_str(r#"{"noise_type": "Wave"}"#).unwrap();
        assert_eq!(params.scale, DEFAULT_SCALE);
        assert_eq!(params.detail, DEFAULT_DETAIL);
        assert_eq!(params.roughness_or_default(), DEFAULT_ROUGHNESS);
        assert!(params.color_ramp.is_empty());
    }
}
