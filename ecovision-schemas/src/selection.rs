use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A metric family monitored by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Air,
    Water,
    Soil,
    Noise,
}

impl Family {
    pub const ALL: [Family; 4] = [Family::Air, Family::Water, Family::Soil, Family::Noise];

    pub fn name(&self) -> &'static str {
        match self {
            Family::Air => "Air",
            Family::Water => "Water",
            Family::Soil => "Soil",
            Family::Noise => "Noise",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Family::Air => "air",
            Family::Water => "water",
            Family::Soil => "soil",
            Family::Noise => "noise",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(Family::Air),
            "water" => Ok(Family::Water),
            "soil" => Ok(Family::Soil),
            "noise" => Ok(Family::Noise),
            other => Err(format!(
                "unknown metric family '{}' (expected air, water, soil or noise)",
                other
            )),
        }
    }
}

/// The dashboard category selector: one family, or every family at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Single(Family),
    All,
}

impl Category {
    /// Families covered by this category, in display order.
    pub fn families(&self) -> Vec<Family> {
        match self {
            Category::Single(family) => vec![*family],
            Category::All => Family::ALL.to_vec(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Single(family) => family.name(),
            Category::All => "All",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::All
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Single(family) => family.slug().to_string(),
            Category::All => "all".to_string(),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Category::All);
        }
        s.parse::<Family>()
            .map(Category::Single)
            .map_err(|_| format!("unknown category '{}' (expected air, water, soil, noise or all)", s.trim()))
    }
}

/// Requested window length in hourly samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Window {
    Day,
    TwoDays,
    ThreeDays,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::Day, Window::TwoDays, Window::ThreeDays];

    pub fn hours(&self) -> usize {
        match self {
            Window::Day => 24,
            Window::TwoDays => 48,
            Window::ThreeDays => 72,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Window::Day
    }
}

impl TryFrom<u32> for Window {
    type Error = String;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        match hours {
            24 => Ok(Window::Day),
            48 => Ok(Window::TwoDays),
            72 => Ok(Window::ThreeDays),
            other => Err(format!("unsupported window of {} hours (expected 24, 48 or 72)", other)),
        }
    }
}

impl From<Window> for u32 {
    fn from(window: Window) -> Self {
        window.hours() as u32
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hours())
    }
}

impl FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['h', 'H']);
        let hours: u32 = trimmed
            .parse()
            .map_err(|_| format!("invalid window '{}' (expected 24, 48 or 72)", s.trim()))?;
        Window::try_from(hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_families_and_all() {
        assert_eq!("Water".parse::<Category>().unwrap(), Category::Single(Family::Water));
        assert_eq!(" ALL ".parse::<Category>().unwrap(), Category::All);
        assert!("weather".parse::<Category>().is_err());
        assert_eq!(Category::All.families().len(), 4);
    }

    #[test]
    fn category_serializes_as_slug() {
        let json = serde_json::to_string(&Category::Single(Family::Noise)).unwrap();
        assert_eq!(json, "\"noise\"");
        let category: Category = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(category, Category::All);
    }

    #[test]
    fn window_accepts_only_enumerated_lengths() {
        assert_eq!("48".parse::<Window>().unwrap().hours(), 48);
        assert_eq!("72h".parse::<Window>().unwrap(), Window::ThreeDays);
        assert!("12".parse::<Window>().is_err());
        assert!("day".parse::<Window>().is_err());
    }

    #[test]
    fn window_serializes_as_hours() {
        assert_eq!(serde_json::to_string(&Window::TwoDays).unwrap(), "48");
        let window: Window = serde_json::from_str("72").unwrap();
        assert_eq!(window, Window::ThreeDays);
    }
}
