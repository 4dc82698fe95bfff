use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// A `#RRGGBB` colour token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Colours offered when creating a subject.
    pub const PALETTE: [&'static str; 8] = [
        "#FF6347", "#4A90E2", "#50C878", "#FFD700", "#9370DB", "#FF69B4", "#20B2AA", "#FF7F50",
    ];

    /// Parse a `#RRGGBB` token. Hex digits are normalised to upper case.
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        let token = token.trim();
        let valid = token.len() == 7
            && token.starts_with('#')
            && token[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ValidationError::InvalidValue {
                field: "color".into(),
                message: format!("expected #RRGGBB, got '{token}'"),
            });
        }
        Ok(Self(token.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deserialize a stored colour. A malformed value becomes the default
    /// palette colour so one bad entry doesn't discard the whole record list.
    pub fn deserialize_or_default<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored colour is malformed, using palette default");
            Self::default()
        }))
    }

    /// Palette entry `index`, wrapping around.
    pub fn from_palette(index: usize) -> Self {
        Self(Self::PALETTE[index % Self::PALETTE.len()].to_string())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_palette(0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalises_hex() {
        assert_eq!(Color::parse("#ff6347").unwrap().as_str(), "#FF6347");
        assert_eq!(Color::parse(" #4A90E2 ").unwrap().as_str(), "#4A90E2");
    }

    #[test]
    fn rejects_malformed_tokens() {
        for bad in ["", "FF6347", "#FF634", "#FF63477", "#GG6347", "red"] {
            assert!(Color::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(Color::from_palette(8), Color::from_palette(0));
    }

    #[test]
    fn deserialization_validates() {
        let ok: Color = serde_json::from_str("\"#50c878\"").unwrap();
        assert_eq!(ok.as_str(), "#50C878");
        assert!(serde_json::from_str::<Color>("\"green\"").is_err());
    }

    #[test]
    fn stored_colour_is_repaired() {
        #[derive(Deserialize)]
        struct Stored {
            #[serde(deserialize_with = "Color::deserialize_or_default")]
            color: Color,
        }
        let stored: Stored = serde_json::from_str(r#"{"color":"green"}"#).unwrap();
        assert_eq!(stored.color, Color::default());
        let stored: Stored = serde_json::from_str(r##"{"color":"#9370db"}"##).unwrap();
        assert_eq!(stored.color.as_str(), "#9370DB");
    }
}
