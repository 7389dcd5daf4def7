/*!
 * Tests for markup extraction and restoration
 */

use subrelay::translation::tags::{TagExtractor, TagRole};

/// Test that plain text passes through extraction unchanged
#[test]
fn test_extract_withPlainText_shouldLeaveTextUnchanged() {
    let (stripped, descriptor) = TagExtractor::extract("Hello there");

    assert_eq!(stripped, "Hello there");
    assert!(descriptor.tag.is_none());
    assert!(descriptor.leading_override.is_none());
    assert_eq!(descriptor.line_pattern.line_count, 1);
    assert_eq!(descriptor.reapply("Bonjour"), "Bonjour");
}

/// Test that a whole-cue italic pair is stripped and recorded
#[test]
fn test_extract_withWholeCueItalic_shouldStripAndRecordTag() {
    let (stripped, descriptor) = TagExtractor::extract("<i>Hello there</i>");

    assert_eq!(stripped, "Hello there");
    let tag = descriptor.tag.expect("tag should be recorded");
    assert_eq!(tag.open, "<i>");
    assert_eq!(tag.close, "</i>");
    assert_eq!(tag.role, TagRole::WholeCue);
}

/// Test that a recorded whole-cue pair is restored around the translation
#[test]
fn test_reapply_withWholeCueItalic_shouldRestoreTag() {
    let (_, descriptor) = TagExtractor::extract("<i>Hello there</i>");

    assert_eq!(descriptor.reapply("Bonjour"), "<i>Bonjour</i>");
}

/// Test that leading SSA/ASS override blocks are stripped and restored
#[test]
fn test_extract_withLeadingOverride_shouldStripAndRecordPrefix() {
    let (stripped, descriptor) = TagExtractor::extract("{\\an8}Hello");

    assert_eq!(stripped, "Hello");
    assert_eq!(descriptor.leading_override.as_deref(), Some("{\\an8}"));
    assert_eq!(descriptor.reapply("Bonjour"), "{\\an8}Bonjour");
}

/// Test that an override prefix and a whole-cue pair are both restored
#[test]
fn test_extract_withOverrideAndWholeCueTag_shouldRestoreBoth() {
    let (stripped, descriptor) = TagExtractor::extract("{\\an8}<i>Hello</i>");

    assert_eq!(stripped, "Hello");
    assert_eq!(descriptor.reapply("Salut"), "{\\an8}<i>Salut</i>");
}

/// Test that a pair wrapping every line is stripped from each line
#[test]
fn test_extract_withWholeLineItalics_shouldStripEveryLine() {
    let (stripped, descriptor) = TagExtractor::extract("<i>First line</i>\n<i>Second line</i>");

    assert_eq!(stripped, "First line Second line");
    let tag = descriptor.tag.expect("tag should be recorded");
    assert_eq!(tag.role, TagRole::WholeLine);
    assert_eq!(descriptor.line_pattern.line_count, 2);
}

/// Test that whole-line restoration wraps each line when the count held
#[test]
fn test_reapply_withWholeLineItalicsAndMatchingLineCount_shouldWrapEachLine() {
    let (_, descriptor) = TagExtractor::extract("<i>First line</i>\n<i>Second line</i>");

    let restored = descriptor.reapply("Première ligne\nDeuxième ligne");
    assert_eq!(restored, "<i>Première ligne</i>\n<i>Deuxième ligne</i>");
}

/// Test that whole-line restoration falls back to one pair around the
/// whole cue when translation changed the line count
#[test]
fn test_reapply_withWholeLineItalicsAndLineCountMismatch_shouldWrapWholeCue() {
    let (_, descriptor) = TagExtractor::extract("<i>First line</i>\n<i>Second line</i>");

    let restored = descriptor.reapply("Une seule ligne");
    assert_eq!(restored, "<i>Une seule ligne</i>");
}

/// Test that a mid-sentence pair stays in the text and rides through
#[test]
fn test_extract_withMidSentenceSpan_shouldLeaveTagInPlace() {
    let (stripped, descriptor) = TagExtractor::extract("Hello <i>world</i> again");

    assert_eq!(stripped, "Hello <i>world</i> again");
    let tag = descriptor.tag.clone().expect("tag should be recorded");
    assert_eq!(tag.role, TagRole::Span);
    assert_eq!(
        descriptor.reapply("Bonjour <i>monde</i> encore"),
        "Bonjour <i>monde</i> encore"
    );
}

/// Test that a whole-cue font wrap keeps its attributes through restoration
#[test]
fn test_extract_withFontTag_shouldPreserveAttributes() {
    let (stripped, descriptor) =
        TagExtractor::extract("<font color=\"#ff0000\">Hello</font>");

    assert_eq!(stripped, "Hello");
    let tag = descriptor.clone().tag.expect("tag should be recorded");
    assert_eq!(tag.open, "<font color=\"#ff0000\">");
    assert_eq!(tag.close, "</font>");
    assert_eq!(
        descriptor.reapply("Bonjour"),
        "<font color=\"#ff0000\">Bonjour</font>"
    );
}

/// Test that line breaks fold to spaces and the pattern records the count
#[test]
fn test_extract_withMultiLineText_shouldFoldToSingleLine() {
    let (stripped, descriptor) = TagExtractor::extract("First line\nSecond line");

    assert_eq!(stripped, "First line Second line");
    assert_eq!(descriptor.line_pattern.line_count, 2);
    assert_eq!(descriptor.line_pattern.trailing_space, vec![false, false]);
}

/// Test that a line already ending in whitespace folds without doubling it
#[test]
fn test_extract_withTrailingSpaceBeforeBreak_shouldNotDoubleSpace() {
    let (stripped, descriptor) = TagExtractor::extract("First \nSecond");

    assert_eq!(stripped, "First Second");
    assert_eq!(descriptor.line_pattern.trailing_space, vec![true, false]);
}

/// Test that restoring formatting on empty text is a no-op
#[test]
fn test_reapply_withEmptyText_shouldReturnEmpty() {
    let (_, descriptor) = TagExtractor::extract("<i>Hello</i>");

    assert_eq!(descriptor.reapply(""), "");
}
