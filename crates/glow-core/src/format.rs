// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Markdown-subset → HTML fragment conversion for assistant replies.
//!
//! Best-effort single pass over a constrained subset: inline links, bold
//! emphasis, flat numbered/bulleted lists, and paragraphs.  Nested lists,
//! inline code, and escaped characters are out of scope.  The transform order
//! is fixed — links before bold before lists before paragraph wrapping —
//! because each later stage must not re-match text produced by an earlier one.

use regex::Regex;

/// Convert a reply in the supported Markdown subset into an HTML fragment.
pub fn format_response(text: &str) -> String {
    let link_re = Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("static pattern compiles");
    let bold_re = Regex::new(r"\*\*([^*]+)\*\*").expect("static pattern compiles");
    let numbered_re = Regex::new(r"(?m)^\s*\d+\.\s+(.*)$").expect("static pattern compiles");
    let bullet_re = Regex::new(r"(?m)^\s*[-*]\s+(.*)$").expect("static pattern compiles");
    let para_split_re = Regex::new(r"\n[ \t]*\n").expect("static pattern compiles");

    // 1. Inline links get the safe external-link attributes.
    let text = link_re.replace_all(
        text,
        r#"<a href="$2" target="_blank" rel="noopener noreferrer">$1</a>"#,
    );
    // 2. Bold emphasis.
    let text = bold_re.replace_all(&text, "<strong>$1</strong>");

    // 3 + 4. List lines become items, then blank-line-separated paragraphs are
    // wrapped.  Whether a list paragraph is ordered is decided by its first
    // list line, checked against the raw paragraph before the line rewrite.
    let mut blocks: Vec<String> = Vec::new();
    for para in para_split_re.split(&text) {
        if para.trim().is_empty() {
            continue;
        }

        let first_numbered = first_list_line_is_numbered(para, &numbered_re, &bullet_re);
        let rewritten = numbered_re.replace_all(para, "<li>$1</li>");
        let rewritten = bullet_re.replace_all(&rewritten, "<li>$1</li>");

        if rewritten.contains("<li>") {
            let tag = if first_numbered { "ol" } else { "ul" };
            blocks.push(format!("<{tag}>{}</{tag}>", rewritten.trim()));
        } else {
            blocks.push(format!("<p>{}</p>", rewritten.trim()));
        }
    }
    blocks.join("\n")
}

/// `true` when the paragraph's first list-shaped line is a numbered one.
fn first_list_line_is_numbered(para: &str, numbered: &Regex, bullet: &Regex) -> bool {
    for line in para.lines() {
        if numbered.is_match(line) {
            return true;
        }
        if bullet.is_match(line) {
            return false;
        }
    }
    false
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_becomes_strong() {
        let html = format_response("**bold**");
        assert!(html.contains("<strong>bold</strong>"), "got: {html}");
    }

    #[test]
    fn link_gets_safe_external_attributes() {
        let html = format_response("see [the site](https://example.com) now");
        assert!(
            html.contains(
                r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">the site</a>"#
            ),
            "got: {html}"
        );
    }

    #[test]
    fn numbered_lines_become_an_ordered_list_in_order() {
        let html = format_response("1. a\n2. b");
        assert!(html.starts_with("<ol>"), "got: {html}");
        assert!(html.ends_with("</ol>"), "got: {html}");
        let a = html.find("<li>a</li>").expect("first item present");
        let b = html.find("<li>b</li>").expect("second item present");
        assert!(a < b, "items must keep their order: {html}");
    }

    #[test]
    fn bullet_lines_become_an_unordered_list() {
        let html = format_response("- one\n- two");
        assert!(html.starts_with("<ul>"), "got: {html}");
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li>two</li>"));
    }

    #[test]
    fn asterisk_bullets_are_list_items_not_bold() {
        let html = format_response("* one\n* two");
        assert!(html.contains("<li>one</li>"), "got: {html}");
        assert!(!html.contains("<strong>"), "got: {html}");
    }

    #[test]
    fn list_kind_decided_by_first_list_line() {
        // Numbered first → ordered even with a trailing bullet line
        let html = format_response("1. first\n- second");
        assert!(html.starts_with("<ol>"), "got: {html}");
    }

    #[test]
    fn plain_paragraph_is_wrapped_in_p() {
        let html = format_response("Just a sentence.");
        assert_eq!(html, "<p>Just a sentence.</p>");
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let html = format_response("First.\n\nSecond.");
        assert_eq!(html, "<p>First.</p>\n<p>Second.</p>");
    }

    #[test]
    fn empty_paragraphs_are_dropped() {
        let html = format_response("First.\n\n   \n\nSecond.");
        assert_eq!(html, "<p>First.</p>\n<p>Second.</p>");
    }

    #[test]
    fn mixed_prose_and_list_paragraphs() {
        let html = format_response("Morning routine:\n\n1. Cleanse\n2. Moisturize\n\nDone.");
        assert!(html.contains("<p>Morning routine:</p>"));
        assert!(html.contains("<ol>"));
        assert!(html.contains("<li>Cleanse</li>"));
        assert!(html.contains("<p>Done.</p>"));
    }

    #[test]
    fn bold_inside_list_item_is_transformed_first() {
        let html = format_response("1. use **serum** nightly");
        assert!(html.contains("<li>use <strong>serum</strong> nightly</li>"), "got: {html}");
    }

    #[test]
    fn link_inside_bold_does_not_interfere() {
        let html = format_response("**[label](https://x.test)**");
        assert!(html.contains("<strong><a href=\"https://x.test\""), "got: {html}");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(format_response(""), "");
    }

    #[test]
    fn indented_list_lines_still_match() {
        let html = format_response("  1. a\n  2. b");
        assert!(html.starts_with("<ol>"), "got: {html}");
    }
}
