/*!
 * Post-translation cleanup and reassembly.
 *
 * Backends hand back text with wrapper markup, leaked batch delimiters,
 * re-spelled line breaks, and mangled inline tags. The cleaner runs a
 * fixed sequence of deterministic steps over each translated segment:
 * strip backend noise, canonicalize markup spellings through ordered
 * substitution tables, restore the cue's recorded formatting, and re-wrap
 * when the line structure collapsed. Every step is a no-op when its
 * pattern does not match.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::FormatFamily;
use crate::translation::batch::SPLITTER;
use crate::translation::tags::FormattingDescriptor;
use crate::translation::wrap::{AutoWrap, BalancedWrapper};

/// Backend spellings of a line break, canonicalized in this order
static BREAK_SPELLINGS: &[&str] = &[
    "<br/>", "<br />", "< br/>", "<br/ >", "<br / >", "< br />", "< br / >", "< br/ >",
];

/// Inline override tags come back from translation with the backslash
/// eaten; the SubStation family needs it restored. Ordered, earlier
/// entries win.
static SSA_OVERRIDE_ESCAPES: &[(&str, &str)] = &[
    ("{i1}", "{\\i1}"),
    ("{i0}", "{\\i0}"),
    ("{b1}", "{\\b1}"),
    ("{b0}", "{\\b0}"),
    ("{u1}", "{\\u1}"),
    ("{u0}", "{\\u0}"),
    ("{s1}", "{\\s1}"),
    ("{s0}", "{\\s0}"),
    ("{c&H", "{\\c&H"),
    ("{1&H", "{\\1c&H"),
    ("{2c&H", "{\\2c&H"),
    ("{3c&H", "{\\3c&H"),
    ("{4c&H", "{\\4c&H"),
    ("{alpha&H", "{\\alpha&H"),
    ("{1a&H", "{\\1a&H"),
    ("{2a&H", "{\\2a&H"),
    ("{3a&H", "{\\3a&H"),
    ("{4a&H", "{\\4a&H"),
    ("{fn", "{\\fn"),
    ("{fs", "{\\fs"),
    ("{an", "{\\an"),
    ("{be", "{\\be"),
    ("{pos", "{\\pos"),
    ("{fad", "{\\fad"),
    ("{move", "{\\move"),
    ("{fscx", "{\\fscx"),
    ("{fscy", "{\\fscy"),
    ("{bord", "{\\bord"),
    ("{xbord", "{\\xbord"),
    ("{ybord", "{\\ybord"),
    ("{shad", "{\\shad"),
    ("{xshad", "{\\xshad"),
    ("{yshad", "{\\yshad"),
    ("{fr", "{\\fr"),
    ("{fsp", "{\\fsp"),
    ("{fay", "{\\fay"),
    ("{fax", "{\\fax"),
    ("{org(", "{\\org("),
    ("{t(", "{\\t("),
    ("{clip", "{\\clip"),
    ("{iclip", "{\\iclip"),
    ("{blur", "{\\blur"),
];

/// Case and spacing variants of italic tags, normalized in this order
static ITALIC_SPELLING_FIXES: &[(&str, &str)] = &[
    ("<I>", "<i>"),
    ("< I>", "<i>"),
    ("</ i>", "</i>"),
    ("</ I>", "</i>"),
    ("</I>", "</i>"),
    ("< i >", "<i>"),
];

/// Doubled pairs appear when a backend echoes tags the descriptor restores
static DOUBLED_TAG_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"<i><i>([^<]*)</i></i>").unwrap(), "<i>$1</i>"),
        (Regex::new(r"<b><b>([^<]*)</b></b>").unwrap(), "<b>$1</b>"),
        (Regex::new(r"<u><u>([^<]*)</u></u>").unwrap(), "<u>$1</u>"),
    ]
});

/// Cleans translated segments and restores their recorded formatting
pub struct TextCleaner {
    format_family: FormatFamily,
    wrap_width: usize,
    wrapper: Box<dyn AutoWrap>,
}

impl TextCleaner {
    /// Create a cleaner with the default balanced wrapper
    pub fn new(format_family: FormatFamily, wrap_width: usize) -> Self {
        Self::with_wrapper(format_family, wrap_width, Box::new(BalancedWrapper))
    }

    /// Create a cleaner with a caller-supplied wrap collaborator
    pub fn with_wrapper(
        format_family: FormatFamily,
        wrap_width: usize,
        wrapper: Box<dyn AutoWrap>,
    ) -> Self {
        Self {
            format_family,
            wrap_width,
            wrapper,
        }
    }

    /// Run the full cleanup sequence over one translated segment and
    /// consume its descriptor
    pub fn clean(&self, raw_segment: &str, descriptor: FormattingDescriptor) -> String {
        let original_line_count = descriptor.line_pattern.line_count;
        let force_rewrap = descriptor.force_rewrap;

        let mut text = Self::strip_backend_noise(raw_segment);
        text = self.normalize_markup(&text);
        text = descriptor.reapply(&text);
        text = Self::fix_doubled_tags(&text);

        let line_count = text.split('\n').count();
        if force_rewrap || (original_line_count == 2 && line_count == 1) {
            text = self.wrapper.wrap(&text, self.wrap_width);
        }

        text
    }

    /// Strip wrapper markup and delimiter leakage, canonicalize line
    /// breaks to '\n', tidy spaced ellipses
    fn strip_backend_noise(raw: &str) -> String {
        let mut text = raw.replace("</p>", "").trim().to_string();

        // A delimiter fragment within the first few characters is
        // cross-talk from the neighbouring cue in the same request; cut
        // everything before it
        if let Some(byte_pos) = text.find(SPLITTER) {
            let char_pos = text[..byte_pos].chars().count();
            if char_pos < 4 {
                text = text[byte_pos..].to_string();
            }
        }

        let mut text = text.replace(SPLITTER, "").trim().to_string();

        if text.contains('\r') {
            text = text.replace("\r\n", "\n").replace('\r', "\n");
        }

        text.replace(" ...", "...")
    }

    /// Apply the ordered substitution tables for this run's output format
    fn normalize_markup(&self, text: &str) -> String {
        let mut result = text.to_string();

        for spelling in BREAK_SPELLINGS {
            result = result.replace(spelling, "\n");
        }

        result = result.replace("\n ", "\n");
        result = result.replace(" \n", "\n");

        if self.format_family == FormatFamily::SubStation {
            for (from, to) in SSA_OVERRIDE_ESCAPES {
                result = result.replace(from, to);
            }
        }

        for (from, to) in ITALIC_SPELLING_FIXES {
            result = result.replace(from, to);
        }

        if let Some(rest) = result.strip_prefix("<i> ") {
            result = format!("<i>{}", rest);
        }
        if let Some(front) = result.strip_suffix(" </i>") {
            result = format!("{}</i>", front);
        }

        result = result.replace("\n<i> ", "\n<i>");
        result.replace(" </i>\n", "</i>\n")
    }

    /// Collapse doubled tag pairs left over when a backend echoed markup
    /// the descriptor also restored
    fn fix_doubled_tags(text: &str) -> String {
        let mut result = text.to_string();
        for (pattern, replacement) in DOUBLED_TAG_PATTERNS.iter() {
            result = pattern.replace_all(&result, *replacement).to_string();
        }
        result
    }
}
