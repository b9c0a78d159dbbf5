//! Source link derivation from retrieval matches

use serde::Serialize;

use crate::index::Match;

/// Excerpt characters kept in a link preview before the ellipsis
const PREVIEW_CHARS: usize = 100;

/// A display-oriented source reference derived from one match
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub url: String,
    pub text: String,
}

/// Build one link per match, preserving retrieval order.
#[must_use]
pub fn format_links(matches: &[Match]) -> Vec<Link> {
    matches
        .iter()
        .map(|m| Link {
            url: m.metadata.url.clone(),
            text: preview_text(&m.metadata.text),
        })
        .collect()
}

/// First 100 characters of the excerpt, whitespace runs collapsed to a
/// single space, with an ellipsis appended whether or not the excerpt was
/// actually truncated.
fn preview_text(excerpt: &str) -> String {
    let truncated: String = excerpt.chars().take(PREVIEW_CHARS).collect();
    let mut preview = collapse_whitespace(&truncated);
    preview.push('…');
    preview
}

/// Replace each run of whitespace with a single space. Boundary runs become
/// a single space rather than being trimmed.
fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MatchMetadata;

    fn match_with(url: &str, text: &str) -> Match {
        Match {
            id: String::new(),
            score: None,
            metadata: MatchMetadata {
                url: url.to_string(),
                text: text.to_string(),
            },
        }
    }

    #[test]
    fn test_one_link_per_match_in_order() {
        let matches = vec![
            match_with("https://a.example", "first"),
            match_with("https://b.example", "second"),
            match_with("https://c.example", "third"),
        ];
        let links = format_links(&matches);
        assert_eq!(links.len(), matches.len());
        assert_eq!(links[0].url, "https://a.example");
        assert_eq!(links[1].url, "https://b.example");
        assert_eq!(links[2].url, "https://c.example");
    }

    #[test]
    fn test_ellipsis_appended_even_without_truncation() {
        let links = format_links(&[match_with("https://a.example", "short excerpt")]);
        assert_eq!(links[0].text, "short excerpt…");
    }

    #[test]
    fn test_truncation_happens_before_collapsing() {
        // 100 chars of "a b a b ..." truncate mid-stream; collapsing runs
        // after the cut must not restore characters past the 100th.
        let excerpt = "ab  ".repeat(50); // 200 chars, 100-char prefix is 25 reps
        let links = format_links(&[match_with("https://a.example", &excerpt)]);
        // 25 reps of "ab " (collapsed) = 75 chars, plus ellipsis
        assert_eq!(links[0].text, format!("{}…", "ab ".repeat(25)));
    }

    #[test]
    fn test_whitespace_runs_collapse_to_single_space() {
        let links = format_links(&[match_with(
            "https://a.example",
            "Docker\tis   a\n\ncontainer platform",
        )]);
        assert_eq!(links[0].text, "Docker is a container platform…");
    }

    #[test]
    fn test_leading_whitespace_becomes_single_space() {
        let links = format_links(&[match_with("https://a.example", "  padded")]);
        assert_eq!(links[0].text, " padded…");
    }

    #[test]
    fn test_empty_excerpt_yields_bare_ellipsis() {
        let links = format_links(&[match_with("https://a.example", "")]);
        assert_eq!(links[0].text, "…");
    }

    #[test]
    fn test_long_excerpt_truncated_to_100_chars() {
        let excerpt = "x".repeat(500);
        let links = format_links(&[match_with("https://a.example", &excerpt)]);
        assert_eq!(links[0].text, format!("{}…", "x".repeat(100)));
    }

    #[test]
    fn test_no_matches_no_links() {
        assert!(format_links(&[]).is_empty());
    }
}
