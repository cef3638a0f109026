//! Errors for labeler configuration and coordinate input.
//!
//! Formatting itself never fails; these only surface when building a
//! [`crate::DistanceLabeler`] or measuring from coordinates.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LabelError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

pub type Result<T> = std::result::Result<T, LabelError>;
