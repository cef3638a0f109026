//! Raw listing distances and their normalization to meters.

use std::fmt;

pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Magnitudes strictly between zero and this value are read as kilometers.
pub const KILOMETER_HEURISTIC_CEILING: f64 = 15.0;

// ============================================================================
// Meters
// ============================================================================

/// Canonical internal distance unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Meters(pub f64);

impl Meters {
    pub fn from_kilometers(km: f64) -> Self {
        Meters(km * METERS_PER_KILOMETER)
    }

    pub fn as_kilometers(&self) -> f64 {
        self.0 / METERS_PER_KILOMETER
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

// ============================================================================
// Raw distance
// ============================================================================

/// Distance as it arrives from listing data: a bare number, or text that may
/// carry unit markers such as `"500m"` or `"0.5km"`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawDistance {
    Number(f64),
    Text(String),
}

impl RawDistance {
    pub fn is_empty(&self) -> bool {
        matches!(self, RawDistance::Text(text) if text.is_empty())
    }

    /// The string form with everything but ASCII digits and `.` removed.
    pub fn numeric_content(&self) -> String {
        self.to_string()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    }
}

impl fmt::Display for RawDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDistance::Number(n) => write!(f, "{}", n),
            RawDistance::Text(text) => f.write_str(text),
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawDistance {
                fn from(n: $ty) -> Self {
                    RawDistance::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u32, u64, usize);

impl From<String> for RawDistance {
    fn from(s: String) -> Self {
        RawDistance::Text(s)
    }
}

impl From<&str> for RawDistance {
    fn from(s: &str) -> Self {
        RawDistance::Text(s.to_owned())
    }
}

impl From<&RawDistance> for RawDistance {
    fn from(raw: &RawDistance) -> Self {
        raw.clone()
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Result of reducing a [`RawDistance`] to meters.
#[derive(Clone, Debug, PartialEq)]
pub enum Normalization {
    /// Empty input; renders as nothing.
    Blank,
    /// No number could be read; carries the original text unchanged.
    Unparsed(String),
    Meters(Meters),
}

/// Reduce `raw` to meters.
///
/// Any magnitude in `(0, kilometer_ceiling)` is taken to be kilometers. The
/// unit markers in the text itself are ignored.
pub fn normalize(raw: &RawDistance, kilometer_ceiling: f64) -> Normalization {
    if raw.is_empty() {
        return Normalization::Blank;
    }

    let Some(magnitude) = parse_leading_float(&raw.numeric_content()) else {
        tracing::trace!(raw = %raw, "no numeric content, passing through");
        return Normalization::Unparsed(raw.to_string());
    };

    if !magnitude.is_finite() {
        tracing::trace!(raw = %raw, "magnitude overflows, passing through");
        return Normalization::Unparsed(raw.to_string());
    }

    if magnitude > 0.0 && magnitude < kilometer_ceiling {
        tracing::trace!(magnitude, "reading small magnitude as kilometers");
        Normalization::Meters(Meters::from_kilometers(magnitude))
    } else {
        Normalization::Meters(Meters(magnitude))
    }
}

/// Parse the longest prefix holding at most one decimal point, so `"1.2.3"`
/// reads as `1.2`. Returns `None` when the prefix has no digit.
fn parse_leading_float(numeric: &str) -> Option<f64> {
    let end = numeric
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map_or(numeric.len(), |(i, _)| i);
    let prefix = &numeric[..end];

    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    prefix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meters(raw: impl Into<RawDistance>) -> f64 {
        match normalize(&raw.into(), KILOMETER_HEURISTIC_CEILING) {
            Normalization::Meters(m) => m.value(),
            other => panic!("expected meters, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_content_strips_units() {
        assert_eq!(RawDistance::from("500m").numeric_content(), "500");
        assert_eq!(RawDistance::from("0.5 km").numeric_content(), "0.5");
        assert_eq!(RawDistance::from("1,200 م").numeric_content(), "1200");
        assert_eq!(RawDistance::from(2.5).numeric_content(), "2.5");
        assert_eq!(RawDistance::from("abc").numeric_content(), "");
    }

    #[test]
    fn test_small_values_read_as_kilometers() {
        assert_eq!(meters(0.5), 500.0);
        assert_eq!(meters("2km"), 2000.0);
        assert_eq!(meters(14), 14_000.0);

        // The heuristic does not care about the written unit
        assert_eq!(meters("10 m"), 10_000.0);
    }

    #[test]
    fn test_heuristic_bounds_are_exclusive() {
        assert_eq!(meters(0), 0.0);
        assert_eq!(meters(15), 15.0);
        assert_eq!(meters(500), 500.0);
    }

    #[test]
    fn test_blank_and_unparsed() {
        assert_eq!(
            normalize(&RawDistance::from(""), KILOMETER_HEURISTIC_CEILING),
            Normalization::Blank
        );
        assert_eq!(
            normalize(&RawDistance::from("abc"), KILOMETER_HEURISTIC_CEILING),
            Normalization::Unparsed("abc".into())
        );
        assert_eq!(
            normalize(&RawDistance::from("near ."), KILOMETER_HEURISTIC_CEILING),
            Normalization::Unparsed("near .".into())
        );
        assert_eq!(
            normalize(&RawDistance::from(f64::NAN), KILOMETER_HEURISTIC_CEILING),
            Normalization::Unparsed("NaN".into())
        );
    }

    #[test]
    fn test_overflowing_magnitude_is_unparsed() {
        let huge = "9".repeat(400);
        assert_eq!(
            normalize(&RawDistance::from(huge.as_str()), KILOMETER_HEURISTIC_CEILING),
            Normalization::Unparsed(huge)
        );
    }

    #[test]
    fn test_leading_float_prefix() {
        assert_eq!(parse_leading_float("1.2.3"), Some(1.2));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("5."), Some(5.0));
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float(""), None);
    }

    #[test]
    fn test_meters_conversions() {
        let m = Meters::from_kilometers(1.25);
        assert_eq!(m.value(), 1250.0);
        assert_eq!(m.as_kilometers(), 1.25);
    }
}
