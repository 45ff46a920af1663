//! Prompt construction for the generation fan-out.

use crate::style::ArtStyle;

/// Number of fixed phrasing templates cycled during prompt construction.
pub const TEMPLATE_COUNT: usize = 5;

/// Produce one prompt from the fixed template cycle.
///
/// Each template frames the track title differently so the generated images
/// stay visually distinct across a slideshow.
fn template(index: usize, title: &str) -> String {
    match index % TEMPLATE_COUNT {
        0 => format!("A dynamic and vibrant scene illustrating the essence of \"{title}\"."),
        1 => format!("An emotional and expressive interpretation of the theme of \"{title}\"."),
        2 => format!("A surreal and dreamlike landscape inspired by the narrative of \"{title}\"."),
        3 => format!("A powerful abstract representation of the core feeling of \"{title}\"."),
        _ => format!("A character or creature embodying the mood and rhythm of \"{title}\"."),
    }
}

/// Build `count` prompts for `title`, cycling the phrasing templates and
/// appending the style fragment when one is selected.
///
/// The returned order is the template cycle order; the generator preserves it
/// through the concurrent fan-out.
#[must_use]
pub fn build_prompts(title: &str, style: ArtStyle, count: usize) -> Vec<String> {
    (0..count)
        .map(|index| {
            let base = template(index, title);
            match style.prompt_fragment() {
                Some(fragment) => format!("{base} , rendered in a {fragment} style."),
                None => base,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_builds_no_prompts() {
        assert!(build_prompts("Song", ArtStyle::None, 0).is_empty());
    }

    #[test]
    fn test_count_matches_and_templates_cycle() {
        let prompts = build_prompts("Song", ArtStyle::None, 7);
        assert_eq!(prompts.len(), 7);
        // The sixth prompt wraps back to the first template.
        assert_eq!(prompts[5], prompts[0]);
        assert_eq!(prompts[6], prompts[1]);
    }

    #[test]
    fn test_five_templates_are_distinct() {
        let prompts = build_prompts("Song", ArtStyle::None, TEMPLATE_COUNT);
        let unique: std::collections::HashSet<_> = prompts.iter().collect();
        assert_eq!(unique.len(), TEMPLATE_COUNT);
    }

    #[test]
    fn test_title_is_embedded_in_every_prompt() {
        for prompt in build_prompts("Moonlight Drive", ArtStyle::None, TEMPLATE_COUNT) {
            assert!(prompt.contains("\"Moonlight Drive\""));
        }
    }

    #[test]
    fn test_style_fragment_suffixes_every_prompt() {
        let fragment = "Abstract art style, non-representational forms and colors";
        for prompt in build_prompts("Song", ArtStyle::Abstract, TEMPLATE_COUNT) {
            assert!(prompt.ends_with(&format!(", rendered in a {fragment} style.")));
        }
    }

    #[test]
    fn test_neutral_style_appends_nothing() {
        let plain = build_prompts("Song", ArtStyle::None, 1);
        assert!(plain[0].ends_with('.'));
        assert!(!plain[0].contains("rendered in a"));
    }
}
