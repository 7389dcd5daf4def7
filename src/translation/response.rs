/*!
 * Reply-tree traversal for translation backends.
 *
 * Backends reply with arbitrarily nested structures and no stable schema.
 * A depth-first walk collects every string leaf in document order, which
 * recovers the translated segments in submission order without
 * special-casing any key name or nesting depth.
 */

use serde_json::Value;

use crate::errors::TranslationError;

/// Walks a backend reply tree into ordered translated segments
pub struct ResponseWalker;

impl ResponseWalker {
    /// Recover exactly `expected` translated segments from a reply tree.
    ///
    /// Zero text leaves, or any count other than `expected`, fails the
    /// batch; blank translations are never fabricated to fill the gap.
    pub fn walk(tree: &Value, expected: usize) -> Result<Vec<String>, TranslationError> {
        let mut segments = Vec::new();
        Self::collect_text_leaves(tree, &mut segments);

        if segments.is_empty() || segments.len() != expected {
            return Err(TranslationError::MalformedResponse {
                expected,
                received: segments.len(),
            });
        }

        Ok(segments)
    }

    /// Depth-first traversal appending every string leaf in document
    /// order. Numbers, booleans and nulls are metadata, not translations.
    pub fn collect_text_leaves(node: &Value, out: &mut Vec<String>) {
        match node {
            Value::String(text) => out.push(Self::unescape(text)),
            Value::Array(items) => {
                for item in items {
                    Self::collect_text_leaves(item, out);
                }
            }
            Value::Object(map) => {
                for (_key, value) in map {
                    Self::collect_text_leaves(value, out);
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    /// Undo backslash escapes that survive JSON decoding when a backend
    /// double-escapes its payload. Unknown or truncated sequences stay
    /// literal rather than failing the segment.
    pub fn unescape(text: &str) -> String {
        if !text.contains('\\') {
            return text.to_string();
        }

        let mut result = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '\\' {
                result.push(c);
                continue;
            }

            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('f') => result.push('\u{000C}'),
                Some('v') => result.push('\u{000B}'),
                Some('0') => result.push('\0'),
                Some('u') => {
                    let hex: String = chars.clone().take(4).collect();
                    let decoded = if hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()) {
                        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                    } else {
                        None
                    };
                    match decoded {
                        Some(decoded) => {
                            for _ in 0..4 {
                                chars.next();
                            }
                            result.push(decoded);
                        }
                        None => result.push_str("\\u"),
                    }
                }
                Some(other) => result.push(other),
                None => result.push('\\'),
            }
        }

        result
    }
}
