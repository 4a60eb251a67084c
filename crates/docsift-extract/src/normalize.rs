//! Shared text normalization pipeline.
//!
//! Every adapter's raw output passes through here before landing in the
//! `Document` record. The transforms are tuned to Office Open XML structure
//! and applied in fixed order: paragraph-boundary replacement, tag
//! stripping, entity unescaping. Legacy binary decoders additionally get
//! their control-character artifacts collapsed.

use docsift_core::RawContent;
use once_cell::sync::Lazy;
use regex::Regex;

/// A run of closing paragraph tags (`</w:p>`, `</a:p>`, ...) marks one
/// paragraph break, however long the run.
static PARA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(</[a-z]:p>)+").unwrap());

/// Any run of XML/HTML tags.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(<[^>]*>)+").unwrap());

/// Replacement-character and control-byte artifacts left behind by legacy
/// binary decoding (U+FFFD, 0x13, 0x0B).
static STRANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new("[\u{FFFD}\u{13}\u{0b}]+").unwrap());

/// Flatten a markup fragment into plain text.
///
/// Runs of closing paragraph tags become a single newline, remaining tags
/// are deleted, and entities are decoded. The result still carries the
/// fragment's leading/trailing whitespace; trimming is the join policy's
/// job.
#[must_use]
pub fn flatten_markup(xml: &str) -> String {
    let text = PARA_RE.replace_all(xml, "\n");
    let text = TAG_RE.replace_all(&text, "");
    unescape_entities(&text)
}

/// Decode character entities (`&amp;`, `&lt;`, `&#233;`, ...) in-place.
///
/// Input containing an entity quick-xml does not know is returned
/// unchanged rather than partially decoded.
#[must_use]
pub fn unescape_entities(text: &str) -> String {
    match quick_xml::escape::unescape(text) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Collapse each run of strange characters into a single space.
///
/// Applied only to legacy-format output (.doc/.ppt/.xls); XML-derived text
/// never contains these artifacts.
#[must_use]
pub fn strip_strange_chars(text: &str) -> String {
    STRANGE_RE.replace_all(text, " ").into_owned()
}

/// Join fragments with `\n`, skipping empties so no blank separator is
/// introduced at either end.
#[must_use]
pub fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(fragment);
    }
    out
}

/// Line-array variant of [`join_fragments`]: trimmed, non-empty fragments
/// in order. Carries the same content, delimited as a sequence instead of
/// a blob.
#[must_use]
pub fn fragment_lines<I, S>(fragments: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments
        .into_iter()
        .filter_map(|f| {
            let trimmed = f.as_ref().trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

/// Normalize raw adapter output into the final content blob.
#[must_use]
pub fn normalize(raw: RawContent) -> String {
    match raw {
        RawContent::Markup(xml) => flatten_markup(&xml),
        RawContent::MarkupFragments(fragments) => {
            join_fragments(fragments.iter().map(|f| flatten_markup(f)))
        }
        RawContent::PlainFragments(fragments) => join_fragments(fragment_lines(fragments)),
        RawContent::LegacyFragments(fragments) => {
            strip_strange_chars(&join_fragments(fragment_lines(fragments)))
        }
        RawContent::Plain(text) => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_strip_is_noop_without_tags() {
        let input = "plain text, no markup at all";
        assert_eq!(flatten_markup(input), input);
    }

    #[test]
    fn test_tag_strip_unescape_idempotent() {
        let input = "<w:r><w:t>Tom &amp; Jerry</w:t></w:r>";
        let once = flatten_markup(input);
        let twice = flatten_markup(&once);
        assert_eq!(once, "Tom & Jerry");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_paragraph_run_collapses_to_one_newline() {
        let input = "one</w:p></w:p></w:p>two";
        assert_eq!(flatten_markup(input), "one\ntwo");
    }

    #[test]
    fn test_paragraph_boundary_any_lowercase_prefix() {
        assert_eq!(flatten_markup("a</a:p>b"), "a\nb");
        assert_eq!(flatten_markup("a</w:p>b"), "a\nb");
        // uppercase prefix is not a paragraph tag, just a tag
        assert_eq!(flatten_markup("a</W:p>b"), "ab");
    }

    #[test]
    fn test_flatten_docx_body() {
        let xml = "<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p>\
                   <w:p><w:r><w:t>World</w:t></w:r></w:p></w:body></w:document>";
        assert_eq!(flatten_markup(xml), "Hello\nWorld\n");
    }

    #[test]
    fn test_unescape_entities() {
        assert_eq!(unescape_entities("&lt;a&gt; &amp; &quot;b&quot;"), "<a> & \"b\"");
        assert_eq!(unescape_entities("caf&#233;"), "café");
    }

    #[test]
    fn test_unescape_unknown_entity_left_intact() {
        let input = "a&nbsp;b";
        assert_eq!(unescape_entities(input), input);
    }

    #[test]
    fn test_strange_chars_run_collapses_to_single_space() {
        assert_eq!(strip_strange_chars("\u{13}\u{0b}x"), " x");
    }

    #[test]
    fn test_strange_chars_replacement_char() {
        assert_eq!(strip_strange_chars("a\u{FFFD}\u{FFFD}b"), "a b");
    }

    #[test]
    fn test_strange_chars_noop_on_clean_text() {
        assert_eq!(strip_strange_chars("clean\ttext\n"), "clean\ttext\n");
    }

    #[test]
    fn test_join_fragments_no_outer_newlines() {
        assert_eq!(join_fragments(["A", "B", "C"]), "A\nB\nC");
    }

    #[test]
    fn test_join_fragments_skips_empties() {
        assert_eq!(join_fragments(["", "A", "", "B", ""]), "A\nB");
    }

    #[test]
    fn test_fragment_lines_trims_and_filters() {
        let lines = fragment_lines(["  A ", "", "  ", "B"]);
        assert_eq!(lines, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_blob_and_line_modes_carry_same_content() {
        let fragments = vec![" A ".to_string(), String::new(), "B".to_string()];
        let lines = fragment_lines(&fragments);
        let blob = join_fragments(&lines);
        assert_eq!(blob, "A\nB");
        assert_eq!(blob.split('\n').collect::<Vec<_>>(), lines);
    }

    #[test]
    fn test_normalize_markup_fragments_skips_empty_slides() {
        let raw = RawContent::MarkupFragments(vec![
            "<a:p><a:t>slide one</a:t></a:p>".to_string(),
            "<p:sp></p:sp>".to_string(),
            "<a:t>slide three</a:t>".to_string(),
        ]);
        assert_eq!(normalize(raw), "slide one\nslide three");
    }

    #[test]
    fn test_normalize_plain_passthrough() {
        let raw = RawContent::Plain("as extracted\n".to_string());
        assert_eq!(normalize(raw), "as extracted\n");
    }

    #[test]
    fn test_normalize_legacy_fragments_filtered() {
        let raw = RawContent::LegacyFragments(vec![
            " first line \r".to_string(),
            "\u{13}\u{0b}second".to_string(),
            String::new(),
        ]);
        assert_eq!(normalize(raw), "first line\n second");
    }
}
