use crate::error::{OgcardError, OgcardResult};

/// Card width in device pixels (Open Graph recommended size).
pub const CARD_WIDTH: u32 = 1200;
/// Card height in device pixels.
pub const CARD_HEIGHT: u32 = 630;

/// Number of secondary-stat columns the layout has room for.
pub const MAX_SECONDARY_STATS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string.
    pub fn from_hex(s: &str) -> OgcardResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| OgcardError::validation(format!("color '{s}' must start with '#'")))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(OgcardError::validation(format!(
                "color '{s}' must be '#rrggbb'"
            )));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| OgcardError::validation(format!("color '{s}' has non-hex digits")))
        };
        Ok(Self {
            r: byte(0..2)?,
            g: byte(2..4)?,
            b: byte(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = OgcardError;

    fn try_from(s: String) -> OgcardResult<Self> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Semantic color roles used by both composers. Immutable for a run.
pub struct Palette {
    pub primary: Color,
    pub primary_dark: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub dark: Color,
    pub light: Color,
    pub white: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::new(0x2e, 0x86, 0xab),
            primary_dark: Color::new(0x1a, 0x5a, 0x7a),
            accent: Color::new(0xf1, 0x8f, 0x01),
            success: Color::new(0x28, 0xa7, 0x45),
            warning: Color::new(0xdc, 0x35, 0x45),
            dark: Color::new(0x1a, 0x1a, 0x1a),
            light: Color::new(0xf5, 0xf5, 0xf5),
            white: Color::new(0xff, 0xff, 0xff),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// The highlighted statistic shown inside the panel.
pub struct PrimaryStat {
    /// Headline range, e.g. "3.4x – 9.2x".
    pub range: String,
    /// Descriptor under the range.
    pub label: String,
    /// Confidence qualifier under the descriptor.
    pub qualifier: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One secondary callout: a bold value over a small label.
pub struct Stat {
    pub value: String,
    pub label: String,
}

impl Stat {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Everything the card says. Defaults carry the report's literal values;
/// callers may override the whole record via JSON.
pub struct CardContent {
    pub title: String,
    pub subtitle: String,
    pub primary: PrimaryStat,
    pub secondary: Vec<Stat>,
    pub tagline: String,
    pub url: String,
}

impl Default for CardContent {
    fn default() -> Self {
        Self {
            title: "AI-Accelerated Biological Discovery".to_string(),
            subtitle: "A Quantitative Model".to_string(),
            primary: PrimaryStat {
                range: "3.4x – 9.2x".to_string(),
                label: "Acceleration by 2050".to_string(),
                qualifier: "80% Confidence Interval".to_string(),
            },
            secondary: vec![
                Stat::new("5.7x", "Mean"),
                Stat::new("$47T", "Value"),
                Stat::new("91.5%", "AI Sensitivity"),
            ],
            tagline: "Monte Carlo simulation • Sobol sensitivity analysis • Policy ROI rankings"
                .to_string(),
            url: "ai-bio-acceleration.github.io".to_string(),
        }
    }
}

impl CardContent {
    pub fn validate(&self) -> OgcardResult<()> {
        if self.title.is_empty() {
            return Err(OgcardError::validation("title must be non-empty"));
        }
        if self.url.is_empty() {
            return Err(OgcardError::validation("url must be non-empty"));
        }
        if self.secondary.len() > MAX_SECONDARY_STATS {
            return Err(OgcardError::validation(format!(
                "at most {MAX_SECONDARY_STATS} secondary stats fit the layout (got {})",
                self.secondary.len()
            )));
        }
        for stat in &self.secondary {
            if stat.value.is_empty() || stat.label.is_empty() {
                return Err(OgcardError::validation(
                    "secondary stats must have a value and a label",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_round_trip() {
        let c = Color::from_hex("#2E86AB").unwrap();
        assert_eq!(c, Color::new(0x2e, 0x86, 0xab));
        assert_eq!(c.to_hex(), "#2e86ab");
        assert_eq!(Color::from_hex(&c.to_hex()).unwrap(), c);
    }

    #[test]
    fn bad_hex_colors_are_rejected_with_context() {
        for bad in ["2E86AB", "#2E86A", "#zzzzzz", "#"] {
            let err = Color::from_hex(bad).unwrap_err();
            assert!(err.to_string().contains("validation error:"), "{bad}");
        }
    }

    #[test]
    fn default_content_validates() {
        CardContent::default().validate().unwrap();
    }

    #[test]
    fn too_many_secondary_stats_are_rejected() {
        let mut content = CardContent::default();
        content.secondary.push(Stat::new("7", "Extra"));
        assert!(content.validate().is_err());
    }

    #[test]
    fn short_secondary_list_is_legal() {
        let mut content = CardContent::default();
        content.secondary.truncate(1);
        content.validate().unwrap();
    }

    #[test]
    fn content_round_trips_through_json() {
        let content = CardContent::default();
        let json = serde_json::to_string(&content).unwrap();
        let back: CardContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, content.title);
        assert_eq!(back.secondary.len(), content.secondary.len());
    }

    #[test]
    fn palette_serializes_as_hex_strings() {
        let json = serde_json::to_string(&Palette::default()).unwrap();
        assert!(json.contains("\"#2e86ab\""));
        assert!(json.contains("\"#f18f01\""));
    }
}
