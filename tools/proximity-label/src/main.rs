use anyhow::{bail, Context, Result};
use clap::Parser;
use geo::Point;
use proximity_core::spatial::validate_point;
use proximity_core::{DistanceLabeler, LabelConfig, Locale, RawDistance};
use std::path::{Path, PathBuf};

mod listing;
mod output;

use listing::{label_listing, read_listings, DeriveOptions, LabelStats};
use output::{render, write_output, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "proximity-label",
    author,
    version,
    about = "Label booking listings with their distance to a landmark",
    long_about = "Reads a JSON array of listings and prints a localized proximity label \
                  for each one, e.g. \"1.2 كم من الحرم المكي\".\n\n\
                  Listings in Makkah are measured from Masjid al-Haram, listings in \
                  Madinah from the Prophet's Mosque, and everything else from the \
                  city center. Listings without a distance can be measured from their \
                  coordinates with --derive-from-coordinates."
)]
struct Args {
    /// Input JSON file with listings (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Label a single distance instead of a listings file; prints to stdout
    #[arg(
        long,
        conflicts_with_all = ["input", "output", "format", "derive_from_coordinates", "city_center"]
    )]
    distance: Option<String>,

    /// City for --distance
    #[arg(long, requires = "distance")]
    city: Option<String>,

    /// Output format: text, json or geojson
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Display language: ar or en (overrides the config file)
    #[arg(short, long)]
    locale: Option<Locale>,

    /// JSON file with label thresholds and locale
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Measure listings without a distance from their coordinates
    #[arg(long)]
    derive_from_coordinates: bool,

    /// Reference point for cities without a landmark, as "lat,lon"
    #[arg(long, value_parser = parse_lat_lon)]
    city_center: Option<Point>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_lat_lon(s: &str) -> std::result::Result<Point, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got {:?}", s))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {}", e))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude: {}", e))?;

    validate_point(Point::new(lon, lat)).map_err(|e| e.to_string())
}

fn load_config(path: Option<&Path>, locale: Option<Locale>) -> Result<LabelConfig> {
    let mut config = match path {
        Some(path) => {
            log::info!("Config: {}", path.display());
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => LabelConfig::default(),
    };

    if let Some(locale) = locale {
        config.locale = locale;
    }

    Ok(config)
}

fn label_single(labeler: &DistanceLabeler, distance: &str, city: Option<&str>) -> String {
    labeler.format(Some(RawDistance::from(distance)), city)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let config = load_config(args.config.as_deref(), args.locale)?;
    let labeler = DistanceLabeler::new(config).context("Invalid label config")?;
    log::debug!("Label config: {:?}", labeler.config());

    if let Some(distance) = &args.distance {
        println!("{}", label_single(&labeler, distance, args.city.as_deref()));
        return Ok(());
    }

    if let Some(input) = &args.input {
        if !input.exists() {
            bail!("Input file does not exist: {}", input.display());
        }
        log::info!("Input: {}", input.display());
    }

    if args.city_center.is_some() && !args.derive_from_coordinates {
        log::warn!("--city-center has no effect without --derive-from-coordinates");
    }

    let listings = read_listings(args.input.as_deref())?;
    log::info!("Loaded {} listings", listings.len());

    let derive = DeriveOptions {
        from_coordinates: args.derive_from_coordinates,
        city_center: args.city_center,
    };

    let mut stats = LabelStats::default();
    let labeled: Vec<_> = listings
        .iter()
        .map(|listing| label_listing(&labeler, listing, derive, &mut stats))
        .collect();

    let rendered = render(&labeled, args.format)?;
    write_output(&rendered, args.output.as_deref())?;

    stats.log_summary();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proximity_core::spatial::distance_to_landmark;
    use proximity_core::Landmark;
    use std::io::Write;
    use std::sync::{Mutex, Once};

    static CAPTURED: Mutex<Vec<(String, String)>> = Mutex::new(Vec::new());

    struct CapturingLogger;

    impl log::Log for CapturingLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED
                .lock()
                .unwrap()
                .push((record.target().to_string(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger;

    fn install_logger() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
    }

    fn captured_from(target_prefix: &str, message: &str) -> bool {
        CAPTURED
            .lock()
            .unwrap()
            .iter()
            .any(|(target, args)| target.starts_with(target_prefix) && args.contains(message))
    }

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_core_events_reach_logger() {
        install_logger();

        assert_eq!(label_single(&DistanceLabeler::default(), "abc", None), "abc");
        assert!(captured_from("proximity_core::distance", "no numeric content"));

        let hotel = Point::new(39.8255, 21.4180);
        assert!(distance_to_landmark(hotel, Landmark::MasjidAlHaram, None).is_some());
        assert!(captured_from("proximity_core::spatial", "measured distance to landmark"));
    }

    #[test]
    fn test_locale_flag_overrides_config_file() {
        let file = write_config(r#"{ "kilometer_display_threshold": 950.0, "locale": "ar" }"#);

        let config = load_config(Some(file.path()), Some(Locale::English)).unwrap();
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.kilometer_display_threshold, 950.0);
        // Missing fields keep their defaults
        assert_eq!(
            config.kilometer_heuristic_ceiling,
            LabelConfig::default().kilometer_heuristic_ceiling
        );

        let from_file = load_config(Some(file.path()), None).unwrap();
        assert_eq!(from_file.locale, Locale::Arabic);
    }

    #[test]
    fn test_default_config_without_file() {
        assert_eq!(load_config(None, None).unwrap(), LabelConfig::default());
        assert_eq!(load_config(None, Some(Locale::English)).unwrap().locale, Locale::English);
    }

    #[test]
    fn test_config_errors_carry_context() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_config(Some(missing.as_path()), None).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config"), "{:#}", err);

        let file = write_config("{ not json");
        let err = load_config(Some(file.path()), None).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"), "{:#}", err);
    }

    #[test]
    fn test_label_single() {
        let labeler = DistanceLabeler::default();
        assert_eq!(label_single(&labeler, "500", Some("Makkah")), "500 م من الحرم المكي");
        assert_eq!(label_single(&labeler, "0.5km", Some("Madinah")), "500 م من المسجد النبوي");
        assert_eq!(label_single(&labeler, "", None), "");
    }

    #[test]
    fn test_single_distance_conflicts_with_batch_flags() {
        let args = Args::try_parse_from(["proximity-label", "--distance", "500", "--city", "Makkah"]).unwrap();
        assert_eq!(args.distance.as_deref(), Some("500"));
        assert_eq!(args.format, OutputFormat::Text);

        for extra in [
            ["--format", "json"],
            ["--output", "labels.txt"],
            ["--input", "listings.json"],
            ["--city-center", "24.7,46.7"],
        ] {
            let mut argv = vec!["proximity-label", "--distance", "500"];
            argv.extend(extra);
            assert!(Args::try_parse_from(argv).is_err(), "{:?}", extra);
        }

        assert!(Args::try_parse_from(["proximity-label", "--distance", "500", "--derive-from-coordinates"]).is_err());
    }

    #[test]
    fn test_parse_lat_lon() {
        assert_eq!(parse_lat_lon("21.4225, 39.8262"), Ok(Point::new(39.8262, 21.4225)));
        assert!(parse_lat_lon("21.4225").is_err());
        assert!(parse_lat_lon("95.0,39.8").is_err());
    }
}
