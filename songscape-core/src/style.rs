//! The closed set of art styles a slideshow can be rendered in.

use serde::{Deserialize, Serialize};

/// Visual art style applied to every generated image.
///
/// Exactly one style is selected at any time; the neutral [`ArtStyle::None`]
/// is the default and contributes no prompt fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtStyle {
    #[default]
    None,
    VanGogh,
    Furry,
    Portrait,
    Cartoon,
    Watercolor,
    Cyberpunk,
    Impressionistic,
    Abstract,
    Steampunk,
    Anime,
}

impl ArtStyle {
    /// All styles in display order, the neutral style first.
    pub const ALL: [Self; 11] = [
        Self::None,
        Self::VanGogh,
        Self::Furry,
        Self::Portrait,
        Self::Cartoon,
        Self::Watercolor,
        Self::Cyberpunk,
        Self::Impressionistic,
        Self::Abstract,
        Self::Steampunk,
        Self::Anime,
    ];

    /// Short human-readable label for selection widgets.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::VanGogh => "Van Gogh",
            Self::Furry => "Furry",
            Self::Portrait => "Portrait",
            Self::Cartoon => "Cartoon",
            Self::Watercolor => "Watercolor",
            Self::Cyberpunk => "Cyberpunk",
            Self::Impressionistic => "Impressionistic",
            Self::Abstract => "Abstract",
            Self::Steampunk => "Steampunk",
            Self::Anime => "Anime",
        }
    }

    /// Descriptive fragment appended to every prompt, or `None` for the
    /// neutral style.
    #[must_use]
    pub const fn prompt_fragment(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::VanGogh => Some("Van Gogh style, with bold brushstrokes and vibrant colors"),
            Self::Furry => Some("Furry art style, anthropomorphic animals with expressive features"),
            Self::Portrait => Some("Realistic portrait style, detailed and lifelike"),
            Self::Cartoon => Some("Cartoon style, with bold outlines and simplified forms"),
            Self::Watercolor => {
                Some("Watercolor painting style, with soft washes and fluid transitions")
            }
            Self::Cyberpunk => Some(
                "Cyberpunk art style, futuristic cityscapes with neon lights and dark tones",
            ),
            Self::Impressionistic => Some(
                "Impressionistic painting style, capturing light and atmosphere with visible brushstrokes",
            ),
            Self::Abstract => Some("Abstract art style, non-representational forms and colors"),
            Self::Steampunk => Some(
                "Steampunk art style, Victorian era industrial design with gears and brass",
            ),
            Self::Anime => Some(
                "Anime style, Japanese animation with exaggerated features and dynamic poses",
            ),
        }
    }

    /// Stable string identifier used in config files and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::VanGogh => "van_gogh",
            Self::Furry => "furry",
            Self::Portrait => "portrait",
            Self::Cartoon => "cartoon",
            Self::Watercolor => "watercolor",
            Self::Cyberpunk => "cyberpunk",
            Self::Impressionistic => "impressionistic",
            Self::Abstract => "abstract",
            Self::Steampunk => "steampunk",
            Self::Anime => "anime",
        }
    }
}

impl std::fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(ArtStyle::default(), ArtStyle::None);
    }

    #[test]
    fn test_neutral_has_no_fragment() {
        assert!(ArtStyle::None.prompt_fragment().is_none());
    }

    #[test]
    fn test_every_non_neutral_style_has_a_fragment() {
        for style in ArtStyle::ALL {
            if style != ArtStyle::None {
                assert!(style.prompt_fragment().is_some(), "missing fragment: {style}");
            }
        }
    }

    #[test]
    fn test_all_contains_every_style_once() {
        let mut seen = std::collections::HashSet::new();
        for style in ArtStyle::ALL {
            assert!(seen.insert(style), "duplicate style in ALL: {style}");
        }
        assert_eq!(seen.len(), 11);
    }
}
