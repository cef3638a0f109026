//! The distance labeler: raw distance plus city name in, display label out.
//!
//! ```text
//! "0.5km", "Madinah"
//!   -> strip to "0.5" -> 0.5 is under the km ceiling -> 500 m
//!   -> 500 <= 800, stays in meters -> "500 م"
//!   -> Madinah -> "من المسجد النبوي"
//!   => "500 م من المسجد النبوي"
//! ```

use std::fmt;

use crate::distance::{normalize, Meters, Normalization, RawDistance, KILOMETER_HEURISTIC_CEILING};
use crate::error::{LabelError, Result};
use crate::landmark::Landmark;
use crate::locale::Locale;

/// Meters above this are shown in kilometers.
pub const KILOMETER_DISPLAY_THRESHOLD: f64 = 800.0;

// ============================================================================
// Config
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LabelConfig {
    /// Raw magnitudes in `(0, ceiling)` are read as kilometers.
    pub kilometer_heuristic_ceiling: f64,
    /// Meters strictly above this are displayed in kilometers.
    pub kilometer_display_threshold: f64,
    pub locale: Locale,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            kilometer_heuristic_ceiling: KILOMETER_HEURISTIC_CEILING,
            kilometer_display_threshold: KILOMETER_DISPLAY_THRESHOLD,
            locale: Locale::default(),
        }
    }
}

impl LabelConfig {
    pub fn validate(&self) -> Result<()> {
        let ceiling = self.kilometer_heuristic_ceiling;
        if !ceiling.is_finite() || ceiling < 0.0 {
            return Err(LabelError::InvalidConfig(format!(
                "kilometer_heuristic_ceiling must be finite and non-negative, got {}",
                ceiling
            )));
        }

        let threshold = self.kilometer_display_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(LabelError::InvalidConfig(format!(
                "kilometer_display_threshold must be finite and positive, got {}",
                threshold
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Labels
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayUnit {
    Meters,
    Kilometers,
}

/// A formatted distance, kept structured until it is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceLabel {
    pub magnitude: String,
    pub unit: DisplayUnit,
    pub landmark: Landmark,
    pub locale: Locale,
}

impl fmt::Display for DistanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.magnitude,
            self.locale.unit_glyph(self.unit),
            self.locale.landmark_suffix(self.landmark)
        )
    }
}

/// What a raw distance turned into. Renders to the display string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabelOutcome {
    /// Absent or empty input; renders as `""`.
    Blank,
    /// Input with no readable number; renders as the input text.
    PassThrough(String),
    Label(DistanceLabel),
}

impl fmt::Display for LabelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelOutcome::Blank => Ok(()),
            LabelOutcome::PassThrough(text) => f.write_str(text),
            LabelOutcome::Label(label) => fmt::Display::fmt(label, f),
        }
    }
}

// ============================================================================
// Labeler
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct DistanceLabeler {
    config: LabelConfig,
}

impl DistanceLabeler {
    pub fn new(config: LabelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Format a possibly missing distance. Never fails: absent input gives
    /// `""` and input without a number is returned as-is.
    pub fn format<D: Into<RawDistance>>(&self, distance: Option<D>, city: Option<&str>) -> String {
        match distance {
            Some(distance) => self.label(&distance.into(), city).to_string(),
            None => String::new(),
        }
    }

    pub fn label(&self, distance: &RawDistance, city: Option<&str>) -> LabelOutcome {
        match normalize(distance, self.config.kilometer_heuristic_ceiling) {
            Normalization::Blank => LabelOutcome::Blank,
            Normalization::Unparsed(text) => LabelOutcome::PassThrough(text),
            Normalization::Meters(meters) => LabelOutcome::Label(self.label_meters(meters, city)),
        }
    }

    /// Label a distance already known to be in meters, such as one measured
    /// from coordinates. The small-value kilometer heuristic is not applied.
    pub fn label_meters(&self, meters: Meters, city: Option<&str>) -> DistanceLabel {
        let (magnitude, unit) = self.display_magnitude(meters);

        DistanceLabel {
            magnitude,
            unit,
            landmark: Landmark::for_city(city),
            locale: self.config.locale,
        }
    }

    fn display_magnitude(&self, meters: Meters) -> (String, DisplayUnit) {
        if meters.value() > self.config.kilometer_display_threshold {
            let tenths = (meters.as_kilometers() * 10.0).round() / 10.0;
            let km = format!("{:.1}", tenths);
            let km = match km.strip_suffix(".0") {
                Some(whole) => whole.to_owned(),
                None => km,
            };
            (km, DisplayUnit::Kilometers)
        } else {
            (format!("{:.0}", meters.value().round()), DisplayUnit::Meters)
        }
    }
}

/// Format with the default configuration (Arabic, 15 km ceiling, 800 m
/// threshold).
pub fn format_distance<D: Into<RawDistance>>(distance: Option<D>, city: Option<&str>) -> String {
    DistanceLabeler::default().format(distance, city)
}
