//! Renders the analysis service's free-text summary as HTML.

use html_escape::encode_text;

const BOLD_DELIMITER: &str = "**";
const BULLET_MARKERS: [char; 2] = ['-', '•'];

/// Converts a model-generated summary into markup, line by line.
///
/// Consecutive lines starting with `-` or `•` become one `<ul>`; a line wrapped
/// in `**` becomes `<b>`; anything else becomes a `<p>`. Text is HTML-escaped.
pub fn format_analysis_text(text: Option<&str>) -> String {
    let Some(text) = text.filter(|text| !text.is_empty()) else {
        return String::new();
    };

    let mut html = String::with_capacity(text.len() * 2);
    let mut in_list = false;

    for line in text.split('\n') {
        if let Some(item) = line.strip_prefix(BULLET_MARKERS) {
            if !in_list {
                html.push_str("<ul>");
                in_list = true;
            }
            html.push_str("<li>");
            html.push_str(&encode_text(item.trim()));
            html.push_str("</li>");
            continue;
        }

        if in_list {
            html.push_str("</ul>");
            in_list = false;
        }

        match bold_inner(line) {
            Some(inner) => {
                html.push_str("<b>");
                html.push_str(&encode_text(inner));
                html.push_str("</b>");
            }
            None => {
                html.push_str("<p>");
                html.push_str(&encode_text(line));
                html.push_str("</p>");
            }
        }
    }

    if in_list {
        html.push_str("</ul>");
    }

    html
}

// A lone `**` (or `***`) is not a bold line: both delimiters must fit.
fn bold_inner(line: &str) -> Option<&str> {
    if line.len() < 2 * BOLD_DELIMITER.len() {
        return None;
    }
    line.strip_prefix(BOLD_DELIMITER)?
        .strip_suffix(BOLD_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_or_empty_input_is_empty() {
        assert_eq!(format_analysis_text(None), "");
        assert_eq!(format_analysis_text(Some("")), "");
    }

    #[test]
    fn test_bullets_bold_and_paragraphs() {
        assert_eq!(
            format_analysis_text(Some("- a\n- b\n**Bold**\nPlain")),
            "<ul><li>a</li><li>b</li></ul><b>Bold</b><p>Plain</p>"
        );
    }

    #[test]
    fn test_mixed_bullet_markers_share_one_list() {
        assert_eq!(
            format_analysis_text(Some("•first\n-  second  ")),
            "<ul><li>first</li><li>second</li></ul>"
        );
    }

    #[test]
    fn test_list_closed_at_end_of_input() {
        assert_eq!(
            format_analysis_text(Some("Intro\n- point")),
            "<p>Intro</p><ul><li>point</li></ul>"
        );
    }

    #[test]
    fn test_separate_runs_make_separate_lists() {
        assert_eq!(
            format_analysis_text(Some("- a\nbreak\n- b")),
            "<ul><li>a</li></ul><p>break</p><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_short_delimiter_lines_are_paragraphs() {
        assert_eq!(format_analysis_text(Some("**")), "<p>**</p>");
        assert_eq!(format_analysis_text(Some("***")), "<p>***</p>");
        assert_eq!(format_analysis_text(Some("****")), "<b></b>");
    }

    #[test]
    fn test_blank_lines_become_empty_paragraphs() {
        assert_eq!(
            format_analysis_text(Some("One\n\nTwo")),
            "<p>One</p><p></p><p>Two</p>"
        );
    }

    #[test]
    fn test_indented_bullet_is_not_a_bullet() {
        assert_eq!(format_analysis_text(Some("  - nested")), "<p>  - nested</p>");
    }

    #[test]
    fn test_markup_in_text_is_escaped() {
        assert_eq!(
            format_analysis_text(Some("- <script>\n**Tom & Jerry**")),
            "<ul><li>&lt;script&gt;</li></ul><b>Tom &amp; Jerry</b>"
        );
    }

    #[test]
    fn test_quotes_in_element_text_are_kept() {
        assert_eq!(
            format_analysis_text(Some(r#"Fans said "best ever" & it's <true>"#)),
            r#"<p>Fans said "best ever" &amp; it's &lt;true&gt;</p>"#
        );
    }
}
