use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde::Serialize;
use std::path::Path;
use strum::{Display, EnumString};

use crate::listing::LabeledListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Text,
    Json,
    Geojson,
}

#[derive(Serialize)]
struct LabelRecord<'a> {
    id: &'a str,
    label: &'a str,
    landmark: Option<&'static str>,
}

/// One `id<TAB>label` line per listing
pub fn render_text(listings: &[LabeledListing]) -> String {
    listings
        .iter()
        .map(|l| format!("{}\t{}\n", l.id, l.label))
        .collect()
}

pub fn render_json(listings: &[LabeledListing]) -> Result<String> {
    let records: Vec<LabelRecord> = listings
        .iter()
        .map(|l| LabelRecord {
            id: &l.id,
            label: &l.label,
            landmark: l.landmark.map(|landmark| landmark.as_str()),
        })
        .collect();

    serde_json::to_string_pretty(&records).context("Failed to serialize labels")
}

/// Create a GeoJSON point Feature for a listing with a location
fn listing_to_feature(listing: &LabeledListing) -> Option<Feature> {
    let location = listing.location?;

    let mut properties = serde_json::Map::new();
    properties.insert("id".to_string(), serde_json::json!(listing.id));
    properties.insert("label".to_string(), serde_json::json!(listing.label));
    properties.insert(
        "landmark".to_string(),
        serde_json::json!(listing.landmark.map(|landmark| landmark.as_str())),
    );

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![location.x(), location.y()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Listings without coordinates are left out of the collection.
pub fn render_geojson(listings: &[LabeledListing]) -> Result<String> {
    let features: Vec<Feature> = listings.iter().filter_map(listing_to_feature).collect();

    let skipped = listings.len() - features.len();
    if skipped > 0 {
        log::info!("  {} listings without coordinates left out of GeoJSON", skipped);
    }

    let feature_collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let geojson = GeoJson::from(feature_collection);
    serde_json::to_string_pretty(&geojson).context("Failed to serialize GeoJSON")
}

pub fn render(listings: &[LabeledListing], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(listings)),
        OutputFormat::Json => render_json(listings),
        OutputFormat::Geojson => render_geojson(listings),
    }
}

/// Write rendered output to `path`, or stdout when no path is given.
pub fn write_output(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            log::info!("Wrote labels to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
