//! Display language for unit glyphs and landmark suffixes.

use strum::{Display, EnumString};

use crate::label::DisplayUnit;
use crate::landmark::Landmark;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Locale {
    #[default]
    #[strum(to_string = "ar", serialize = "arabic")]
    #[cfg_attr(feature = "serde", serde(rename = "ar", alias = "arabic"))]
    Arabic,
    #[strum(to_string = "en", serialize = "english")]
    #[cfg_attr(feature = "serde", serde(rename = "en", alias = "english"))]
    English,
}

impl Locale {
    pub fn unit_glyph(self, unit: DisplayUnit) -> &'static str {
        match (self, unit) {
            (Locale::Arabic, DisplayUnit::Meters) => "م",
            (Locale::Arabic, DisplayUnit::Kilometers) => "كم",
            (Locale::English, DisplayUnit::Meters) => "m",
            (Locale::English, DisplayUnit::Kilometers) => "km",
        }
    }

    pub fn landmark_suffix(self, landmark: Landmark) -> &'static str {
        match (self, landmark) {
            (Locale::Arabic, Landmark::MasjidAlHaram) => "من الحرم المكي",
            (Locale::Arabic, Landmark::ProphetsMosque) => "من المسجد النبوي",
            (Locale::Arabic, Landmark::CityCenter) => "من المركز",
            (Locale::English, Landmark::MasjidAlHaram) => "from Masjid al-Haram",
            (Locale::English, Landmark::ProphetsMosque) => "from the Prophet's Mosque",
            (Locale::English, Landmark::CityCenter) => "from the center",
        }
    }
}
