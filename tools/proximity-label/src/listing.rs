use anyhow::{Context, Result};
use geo::Point;
use proximity_core::spatial::{distance_to_landmark, validate_point};
use proximity_core::{DistanceLabeler, LabelOutcome, Landmark, RawDistance};
use serde::Deserialize;
use std::path::Path;

/// One listing record from the input file.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub distance: Option<RawDistance>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl Listing {
    pub fn location(&self) -> Option<Point> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }
}

/// How a listing's label was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    Distance,
    Coordinates,
    PassThrough,
    Blank,
}

#[derive(Debug, Clone)]
pub struct LabeledListing {
    pub id: String,
    pub label: String,
    pub landmark: Option<Landmark>,
    pub location: Option<Point>,
    pub source: LabelSource,
}

#[derive(Debug, Default)]
pub struct LabelStats {
    pub labelled: usize,
    pub derived: usize,
    pub passed_through: usize,
    pub blank: usize,
    pub invalid_coordinates: usize,
}

impl LabelStats {
    pub fn record(&mut self, source: LabelSource) {
        match source {
            LabelSource::Distance => self.labelled += 1,
            LabelSource::Coordinates => self.derived += 1,
            LabelSource::PassThrough => self.passed_through += 1,
            LabelSource::Blank => self.blank += 1,
        }
    }

    pub fn log_summary(&self) {
        log::info!("=== Label Statistics ===");
        log::info!("Labelled from distance: {}", self.labelled);
        log::info!("Derived from coordinates: {}", self.derived);
        log::info!("Passed through unparsed: {}", self.passed_through);
        log::info!("Blank: {}", self.blank);
        if self.invalid_coordinates > 0 {
            log::warn!("Invalid coordinates ignored: {}", self.invalid_coordinates);
        }
    }
}

/// Options controlling how listings without a distance are handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeriveOptions {
    pub from_coordinates: bool,
    pub city_center: Option<Point>,
}

pub fn parse_listings(json: &str) -> Result<Vec<Listing>> {
    serde_json::from_str(json).context("Failed to parse listings JSON")
}

/// Read listings from a file, or from stdin when no path is given.
pub fn read_listings(path: Option<&Path>) -> Result<Vec<Listing>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read listings from {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read listings from stdin")?,
    };

    parse_listings(&json)
}

pub fn label_listing(
    labeler: &DistanceLabeler,
    listing: &Listing,
    derive: DeriveOptions,
    stats: &mut LabelStats,
) -> LabeledListing {
    let city = listing.city.as_deref();

    let location = listing.location().and_then(|point| match validate_point(point) {
        Ok(point) => Some(point),
        Err(e) => {
            log::warn!("Listing {}: {}", listing.id, e);
            stats.invalid_coordinates += 1;
            None
        }
    });

    let (label, landmark, source) = match &listing.distance {
        Some(distance) => match labeler.label(distance, city) {
            LabelOutcome::Label(label) => {
                let landmark = label.landmark;
                (label.to_string(), Some(landmark), LabelSource::Distance)
            }
            LabelOutcome::PassThrough(text) => {
                log::debug!("Listing {}: no number in distance {:?}", listing.id, text);
                (text, None, LabelSource::PassThrough)
            }
            LabelOutcome::Blank => (String::new(), None, LabelSource::Blank),
        },
        None => derive_label(labeler, city, location, derive),
    };

    stats.record(source);

    LabeledListing {
        id: listing.id.clone(),
        label,
        landmark,
        location,
        source,
    }
}

fn derive_label(
    labeler: &DistanceLabeler,
    city: Option<&str>,
    location: Option<Point>,
    derive: DeriveOptions,
) -> (String, Option<Landmark>, LabelSource) {
    if !derive.from_coordinates {
        return (String::new(), None, LabelSource::Blank);
    }

    let landmark = Landmark::for_city(city);
    let measured = location.and_then(|point| distance_to_landmark(point, landmark, derive.city_center));

    match measured {
        Some(meters) => {
            let label = labeler.label_meters(meters, city);
            (label.to_string(), Some(landmark), LabelSource::Coordinates)
        }
        None => (String::new(), None, LabelSource::Blank),
    }
}
