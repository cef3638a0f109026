//! # proximity-core
//!
//! Localized proximity labels for booking listings.
//!
//! A listing carries a loosely typed distance (`500`, `"0.5km"`, `"1,200 m"`)
//! and a city name. This crate turns the pair into a short display label made
//! of a magnitude, a unit glyph and a landmark suffix picked from the city.
//!
//! ## Features
//!
//! - **Total formatting**: malformed input degrades to `""` or to the raw text
//! - **Canonical meters**: every input is normalized to meters before display
//! - **Landmark selection**: Makkah, Madinah or a generic city center
//! - **Coordinates**: haversine distance to a landmark for listings without one
//!
//! ## Example
//!
//! ```
//! use proximity_core::prelude::*;
//!
//! assert_eq!(format_distance(Some(1200), Some("Riyadh")), "1.2 كم من المركز");
//! assert_eq!(format_distance(Some("0.5"), Some("Madinah")), "500 م من المسجد النبوي");
//! assert_eq!(format_distance(None::<RawDistance>, Some("Makkah")), "");
//!
//! let labeler = DistanceLabeler::new(LabelConfig {
//!     locale: Locale::English,
//!     ..LabelConfig::default()
//! })
//! .unwrap();
//! assert_eq!(labeler.format(Some(1000), Some("MAKKAH")), "1 km from Masjid al-Haram");
//! ```

pub mod distance;
pub mod error;
pub mod label;
pub mod landmark;
pub mod locale;
pub mod spatial;

pub mod prelude {
    pub use crate::distance::{Meters, Normalization, RawDistance};
    pub use crate::error::{LabelError, Result};
    pub use crate::label::{
        format_distance, DisplayUnit, DistanceLabel, DistanceLabeler, LabelConfig, LabelOutcome,
    };
    pub use crate::landmark::Landmark;
    pub use crate::locale::Locale;
}

pub use prelude::*;
