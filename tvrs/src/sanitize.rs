use regex::{Captures, Regex};
use scraper::Html;
use std::sync::OnceLock;

/// A `<` with, optionally, the rest of a closed tag after it.
fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(/?[A-Za-z!][^<>]*>)?").unwrap())
}

/// Escape every `<` that does not open a complete tag, so the parser keeps
/// it as text instead of swallowing what follows.
fn escape_stray_brackets(text: &str) -> String {
    tag_re()
        .replace_all(text, |caps: &Captures| match caps.get(1) {
            Some(_) => caps[0].to_string(),
            None => "&lt;".to_string(),
        })
        .into_owned()
}

/// Strip HTML tags from `text`, joining the remaining text nodes with no
/// separator.
///
/// Only complete `<...>` tags are removed; a stray `<` or `>` (`<>`, `x<y`,
/// `a < b`) comes back as text.
pub fn strip_html(text: &str) -> String {
    if !text.contains('<') && !text.contains('&') {
        return text.to_string();
    }

    let fragment = Html::parse_fragment(&escape_stray_brackets(text));
    fragment.root_element().text().collect::<Vec<_>>().join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_tags_is_empty() {
        assert_eq!(
            strip_html("<p></p><a></a></b><i></i><title></title><br>"),
            ""
        );
    }

    #[test]
    fn bare_brackets_survive() {
        assert_eq!(strip_html("<>"), "<>");
        assert_eq!(strip_html("1 < 2"), "1 < 2");
        assert_eq!(strip_html("2 > 1"), "2 > 1");
        assert_eq!(strip_html("x<y"), "x<y");
        assert_eq!(strip_html("a <b"), "a <b");
        assert_eq!(strip_html("if a<b"), "if a<b");
        assert_eq!(strip_html("<p>x<y</p>"), "x<y");
    }

    #[test]
    fn only_stray_brackets_are_escaped() {
        assert_eq!(escape_stray_brackets("<p>a<b</p>"), "<p>a&lt;b</p>");
        assert_eq!(escape_stray_brackets("<br/><>"), "<br/>&lt;>");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(strip_html("text without tags!"), "text without tags!");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn summary_markup() {
        let summary = "<p><b>Parks and Recreation</b> is a comedy series based around the main \
                       character Leslie Knope (a bureaucrat) in the parks department of Pawnee.</p>";
        assert_eq!(
            strip_html(summary),
            "Parks and Recreation is a comedy series based around the main character Leslie \
             Knope (a bureaucrat) in the parks department of Pawnee."
        );
    }

    #[test]
    fn adjacent_blocks_are_not_separated() {
        assert_eq!(strip_html("<p>one</p><p>two</p>"), "onetwo");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(strip_html("<p>Tom &amp; Jerry</p>"), "Tom & Jerry");
    }
}
