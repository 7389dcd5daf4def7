/*!
 * Markup extraction and restoration for cue text.
 *
 * Before a cue goes to a backend, its structural markup is recorded in a
 * `FormattingDescriptor` and removed, and its line breaks are folded to
 * spaces so the backend sees one plain sentence per cue. After translation
 * the descriptor restores the markup in its original structural role.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Consecutive SSA/ASS override blocks at the start of a cue ({\an8}{\i1}...)
static LEADING_OVERRIDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\{\\[^{}]*\})+").unwrap()
});

/// Whole-cue font wrap, attributes preserved
static FONT_WRAP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(<font[^>]*>)(.*)</font>$").unwrap()
});

/// Paired inline tags recognized for structural extraction
const TAG_PAIRS: [(&str, &str); 3] = [("<i>", "</i>"), ("<b>", "</b>"), ("<u>", "</u>")];

/// Structural role a recorded tag pair played in the original cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    /// A single pair wrapped the entire cue
    WholeCue,

    /// Every line carried its own pair
    WholeLine,

    /// Mid-sentence span; the pair stays in the text and rides through
    /// the backend untouched
    Span,
}

/// A tag pair recorded during extraction
#[derive(Debug, Clone)]
pub struct RecordedTag {
    /// Opening tag, attributes included
    pub open: String,

    /// Closing tag
    pub close: String,

    /// Structural role the pair played
    pub role: TagRole,
}

/// Original line structure of a cue, captured independently from markup
#[derive(Debug, Clone)]
pub struct LineBreakPattern {
    /// Number of lines before folding
    pub line_count: usize,

    /// Whether each original line already ended with whitespace; folding
    /// only inserts a space where the line did not carry one
    pub trailing_space: Vec<bool>,
}

/// Reversible record of one cue's markup and line structure.
///
/// Produced once per cue by [`TagExtractor::extract`]. `reapply` takes the
/// descriptor by value, so a run cannot apply it to two different cues.
#[derive(Debug, Clone)]
pub struct FormattingDescriptor {
    /// SSA/ASS override blocks removed from the start of the cue
    pub leading_override: Option<String>,

    /// Structural tag pair removed from (or observed in) the cue
    pub tag: Option<RecordedTag>,

    /// Line structure of the original cue
    pub line_pattern: LineBreakPattern,

    /// Request a re-wrap at reassembly even when the line count held
    pub force_rewrap: bool,
}

impl FormattingDescriptor {
    /// Restore the recorded markup on translated text.
    ///
    /// Every branch is a deterministic no-op when its pattern does not
    /// apply; empty text comes back unchanged.
    pub fn reapply(self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let mut result = match &self.tag {
            Some(tag) => match tag.role {
                TagRole::WholeCue => format!("{}{}{}", tag.open, text, tag.close),
                TagRole::WholeLine => Self::wrap_lines(tag, text, self.line_pattern.line_count),
                TagRole::Span => text.to_string(),
            },
            None => text.to_string(),
        };

        if let Some(prefix) = &self.leading_override {
            result = format!("{}{}", prefix, result);
        }

        result
    }

    /// Wrap each line in the recorded pair when the line count still
    /// matches; otherwise translation reflowed the text and per-line
    /// restoration is ambiguous, so the whole cue is wrapped instead.
    fn wrap_lines(tag: &RecordedTag, text: &str, original_line_count: usize) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() == original_line_count {
            lines
                .iter()
                .map(|line| format!("{}{}{}", tag.open, line, tag.close))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            format!("{}{}{}", tag.open, text, tag.close)
        }
    }
}

/// Extractor for cue markup and line structure
pub struct TagExtractor;

impl TagExtractor {
    /// Split a cue into folded plain text and its formatting descriptor.
    ///
    /// Stripping is lossless for well-formed markup: whole-cue and
    /// whole-line pairs are removed and recorded, mid-sentence spans are
    /// recorded but left in place.
    pub fn extract(text: &str) -> (String, FormattingDescriptor) {
        let mut working = text.trim().to_string();

        // Leading SSA/ASS override blocks come off first
        let leading_override = LEADING_OVERRIDE_REGEX
            .find(&working)
            .map(|m| m.as_str().to_string());
        if let Some(prefix) = &leading_override {
            working = working[prefix.len()..].trim_start().to_string();
        }

        let tag = Self::take_structural_tag(&mut working);
        let (folded, line_pattern) = Self::fold_lines(&working);

        let descriptor = FormattingDescriptor {
            leading_override,
            tag,
            line_pattern,
            force_rewrap: false,
        };

        (folded, descriptor)
    }

    /// Detect the structural tag of a cue, removing it when it wraps the
    /// whole cue or every line
    fn take_structural_tag(text: &mut String) -> Option<RecordedTag> {
        // Whole-cue wrap: one pair around everything
        for (open, close) in TAG_PAIRS {
            if text.starts_with(open) && text.ends_with(close) && text.matches(open).count() == 1 {
                let inner = text[open.len()..text.len() - close.len()].trim().to_string();
                *text = inner;
                return Some(RecordedTag {
                    open: open.to_string(),
                    close: close.to_string(),
                    role: TagRole::WholeCue,
                });
            }
        }

        // Whole-cue font wrap keeps its attributes
        if text.matches("<font").count() == 1 {
            if let Some(caps) = FONT_WRAP_REGEX.captures(text) {
                let open = caps.get(1).map_or("", |m| m.as_str()).to_string();
                let inner = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
                if !open.is_empty() {
                    *text = inner;
                    return Some(RecordedTag {
                        open,
                        close: "</font>".to_string(),
                        role: TagRole::WholeCue,
                    });
                }
            }
        }

        // Whole-line wrap: every line carries the same pair
        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() >= 2 {
            for (open, close) in TAG_PAIRS {
                let all_wrapped = lines.iter().all(|line| {
                    let line = line.trim();
                    line.starts_with(open) && line.ends_with(close) && line.matches(open).count() == 1
                });
                if all_wrapped {
                    let stripped: Vec<String> = lines
                        .iter()
                        .map(|line| {
                            let line = line.trim();
                            line[open.len()..line.len() - close.len()].trim().to_string()
                        })
                        .collect();
                    *text = stripped.join("\n");
                    return Some(RecordedTag {
                        open: open.to_string(),
                        close: close.to_string(),
                        role: TagRole::WholeLine,
                    });
                }
            }
        }

        // A pair somewhere mid-sentence is left in place and recorded;
        // the backend sees it and the cleaner normalizes whatever comes back
        for (open, close) in TAG_PAIRS {
            if text.contains(open) && text.contains(close) {
                return Some(RecordedTag {
                    open: open.to_string(),
                    close: close.to_string(),
                    role: TagRole::Span,
                });
            }
        }

        None
    }

    /// Fold line breaks to spaces, recording the original line count and
    /// per-line trailing-whitespace flags
    fn fold_lines(text: &str) -> (String, LineBreakPattern) {
        let lines: Vec<&str> = text.split('\n').collect();
        let trailing_space: Vec<bool> = lines
            .iter()
            .map(|line| line.ends_with(|c: char| c.is_whitespace()))
            .collect();

        let mut folded = String::with_capacity(text.len());
        for (i, line) in lines.iter().enumerate() {
            folded.push_str(line);
            if i + 1 < lines.len() && !trailing_space[i] {
                folded.push(' ');
            }
        }

        let pattern = LineBreakPattern {
            line_count: lines.len(),
            trailing_space,
        };

        (folded, pattern)
    }
}
