use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Cosmetic background theme derived from a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeLabel {
    Clear,
    Clouds,
    Rain,
    Snow,
    #[default]
    Default,
}

impl ThemeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeLabel::Clear => "clear",
            ThemeLabel::Clouds => "clouds",
            ThemeLabel::Rain => "rain",
            ThemeLabel::Snow => "snow",
            ThemeLabel::Default => "default",
        }
    }

    /// Symbol shown next to a reply in terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            ThemeLabel::Clear => "☀",
            ThemeLabel::Clouds => "☁",
            ThemeLabel::Rain => "☂",
            ThemeLabel::Snow => "❄",
            ThemeLabel::Default => "·",
        }
    }

    pub const fn all() -> &'static [ThemeLabel] {
        &[
            ThemeLabel::Clear,
            ThemeLabel::Clouds,
            ThemeLabel::Rain,
            ThemeLabel::Snow,
            ThemeLabel::Default,
        ]
    }
}

impl fmt::Display for ThemeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown theme '{0}'. Supported themes: clear, clouds, rain, snow, default.")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeLabel {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.to_lowercase();

        ThemeLabel::all()
            .iter()
            .copied()
            .find(|label| label.as_str() == lower)
            .ok_or_else(|| UnknownTheme(value.to_string()))
    }
}

/// Ordered keyword rules. The first rule with a keyword contained in the
/// lowercased reply decides the theme.
const RULES: &[(&[&str], ThemeLabel)] = &[
    (&["clear"], ThemeLabel::Clear),
    (&["cloud"], ThemeLabel::Clouds),
    (&["rain", "drizzle"], ThemeLabel::Rain),
    (&["snow"], ThemeLabel::Snow),
];

/// Map a reply to a theme. Total: anything without a known keyword is
/// [`ThemeLabel::Default`].
pub fn classify(reply: &str) -> ThemeLabel {
    let lower = reply.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, label)| *label)
        .unwrap_or_default()
}
