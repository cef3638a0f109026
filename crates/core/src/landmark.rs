//! Reference landmarks a distance is measured from.

use geo::Point;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// The site a listing's distance refers to.
///
/// Variants are declared in match priority: a city naming both Makkah and
/// Madinah resolves to Makkah.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Landmark {
    /// Masjid al-Haram, Makkah
    MasjidAlHaram,
    /// Al-Masjid an-Nabawi, Madinah
    ProphetsMosque,
    /// Generic city center, used for every other city
    CityCenter,
}

impl Landmark {
    /// Lowercase city-name fragments that select this landmark.
    pub fn city_aliases(self) -> &'static [&'static str] {
        match self {
            Landmark::MasjidAlHaram => &["مكة", "makkah", "mecca"],
            Landmark::ProphetsMosque => &["المدينة", "madinah", "medina"],
            Landmark::CityCenter => &[],
        }
    }

    /// Pick the landmark for a city name. Total: anything unrecognized,
    /// including a missing city, maps to [`Landmark::CityCenter`].
    pub fn for_city(city: Option<&str>) -> Self {
        let Some(city) = city else {
            return Landmark::CityCenter;
        };

        let lowered = city.to_lowercase();
        Landmark::iter()
            .find(|landmark| {
                landmark
                    .city_aliases()
                    .iter()
                    .any(|alias| lowered.contains(alias))
            })
            .unwrap_or(Landmark::CityCenter)
    }

    /// Fixed location of the landmark, if it has one.
    pub fn location(self) -> Option<Point> {
        match self {
            Landmark::MasjidAlHaram => Some(Point::new(39.8262, 21.4225)),
            Landmark::ProphetsMosque => Some(Point::new(39.6111, 24.4672)),
            Landmark::CityCenter => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
