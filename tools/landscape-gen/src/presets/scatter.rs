//! Scatter presets: how objects are strewn across a terrain surface

use serde::{Deserialize, Serialize};

use super::PresetTable;

/// Density, size and placement limits for one kind of scattered object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterPreset {
    pub name: String,
    /// Points per unit area
    pub density: f64,
    pub scale_min: f64,
    pub scale_max: f64,
    /// Maximum slope (0 = flat, 1 = vertical) a point may sit on
    pub slope_max: f64,
    /// Normalized altitude band
    pub altitude_min: f64,
    pub altitude_max: f64,
}

impl ScatterPreset {
    /// Check range ordering and that the altitude band lies in [0, 1].
    pub fn check(&self) -> Result<(), String> {
        if self.density <= 0.0 {
            return Err(format!("density {} must be positive", self.density));
        }
        if self.scale_min > self.scale_max {
            return Err(format!(
                "scale_min {} exceeds scale_max {}",
                self.scale_min, self.scale_max
            ));
        }
        if self.altitude_min > self.altitude_max {
            return Err(format!(
                "altitude_min {} exceeds altitude_max {}",
                self.altitude_min, self.altitude_max
            ));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.altitude_min) || !unit.contains(&self.altitude_max) {
            return Err("altitude band outside [0, 1]".to_string());
        }
        if !unit.contains(&self.slope_max) {
            return Err(format!("slope_max {} outside [0, 1]", self.slope_max));
        }
        Ok(())
    }
}

fn scatter(
    name: &str,
    density: f64,
    scale: (f64, f64),
    slope_max: f64,
    altitude: (f64, f64),
) -> ScatterPreset {
    ScatterPreset {
        name: name.to_string(),
        density,
        scale_min: scale.0,
        scale_max: scale.1,
        slope_max,
        altitude_min: altitude.0,
        altitude_max: altitude.1,
    }
}

pub(crate) fn builtin_scatter() -> PresetTable<ScatterPreset> {
    PresetTable::from_entries(vec![
        // Trees stay off slopes steeper than ~30 degrees
        (
            "forest".to_string(),
            scatter("Forest Scatter", 0.1, (0.5, 2.0), 0.5, (0.2, 0.8)),
        ),
        (
            "rocks".to_string(),
            scatter("Rock Scatter", 0.05, (0.3, 1.5), 0.8, (0.1, 1.0)),
        ),
        (
            "vegetation".to_string(),
            scatter("Vegetation Scatter", 0.2, (0.8, 1.5), 0.4, (0.15, 0.7)),
        ),
    ])
}
