/*!
 * Tests for post-translation cleanup and reassembly
 */

use subrelay::app_config::FormatFamily;
use subrelay::translation::tags::{FormattingDescriptor, LineBreakPattern};
use subrelay::translation::wrap::AutoWrap;
use subrelay::translation::{TagExtractor, TextCleaner};

fn plain_descriptor(line_count: usize) -> FormattingDescriptor {
    FormattingDescriptor {
        leading_override: None,
        tag: None,
        line_pattern: LineBreakPattern {
            line_count,
            trailing_space: vec![false; line_count],
        },
        force_rewrap: false,
    }
}

fn subrip_cleaner() -> TextCleaner {
    TextCleaner::new(FormatFamily::SubRip, 43)
}

/// Test that a delimiter echoed at the end of a segment is removed
#[test]
fn test_clean_withTrailingDelimiter_shouldRemoveToken() {
    let cleaned = subrip_cleaner().clean("Bonjour <i>monde</i>+-+", plain_descriptor(1));

    assert_eq!(cleaned, "Bonjour <i>monde</i>");
}

/// Test that a delimiter within the first few characters marks leaked
/// text from the neighbouring cue, which is discarded
#[test]
fn test_clean_withLeakedNeighborPrefix_shouldDiscardLeak() {
    let cleaned = subrip_cleaner().clean("ab+-+Bonjour", plain_descriptor(1));

    assert_eq!(cleaned, "Bonjour");
}

/// Test that a delimiter later in the segment only loses the token itself
#[test]
fn test_clean_withLateDelimiter_shouldOnlyRemoveToken() {
    let cleaned = subrip_cleaner().clean("Bonjour le+-+monde", plain_descriptor(1));

    assert_eq!(cleaned, "Bonjour lemonde");
}

/// Test that break tag spellings canonicalize to a newline
#[test]
fn test_clean_withBreakSpellings_shouldCanonicalize() {
    let cleaner = subrip_cleaner();

    assert_eq!(
        cleaner.clean("Première<br/>Deuxième", plain_descriptor(2)),
        "Première\nDeuxième"
    );
    assert_eq!(
        cleaner.clean("A< br / >B", plain_descriptor(2)),
        "A\nB"
    );
}

/// Test that spaces hugging a restored line break are removed
#[test]
fn test_clean_withSpacesAroundBreaks_shouldTightenThem() {
    let cleaned = subrip_cleaner().clean("Première <br/> Deuxième", plain_descriptor(2));

    assert_eq!(cleaned, "Première\nDeuxième");
}

/// Test that SubStation output restores the backslash translation ate
/// from inline override tags
#[test]
fn test_clean_withSubStationFamily_shouldRestoreOverrideEscapes() {
    let cleaner = TextCleaner::new(FormatFamily::SubStation, 43);

    assert_eq!(
        cleaner.clean("{i1}Bonjour{i0}", plain_descriptor(1)),
        "{\\i1}Bonjour{\\i0}"
    );
    assert_eq!(
        cleaner.clean("{1&H00FF00&}texte", plain_descriptor(1)),
        "{\\1c&H00FF00&}texte"
    );
}

/// Test that SubRip output leaves brace spellings alone
#[test]
fn test_clean_withSubRipFamily_shouldLeaveOverrideSpellingsAlone() {
    let cleaned = subrip_cleaner().clean("{i1}Bonjour{i0}", plain_descriptor(1));

    assert_eq!(cleaned, "{i1}Bonjour{i0}");
}

/// Test that italic tag spelling variants normalize to canonical form
#[test]
fn test_clean_withItalicSpellingVariants_shouldNormalize() {
    let cleaner = subrip_cleaner();

    assert_eq!(
        cleaner.clean("< I>Bonjour</ i>", plain_descriptor(1)),
        "<i>Bonjour</i>"
    );
    assert_eq!(
        cleaner.clean("<i> Bonjour </i>", plain_descriptor(1)),
        "<i>Bonjour</i>"
    );
}

/// Test that a backend echoing tags the descriptor also restores does not
/// leave a doubled pair behind
#[test]
fn test_clean_withEchoedTags_shouldCollapseDoubledPair() {
    let (_, descriptor) = TagExtractor::extract("<i>Hello world</i>");

    let cleaned = subrip_cleaner().clean("<i>Bonjour le monde</i>", descriptor);

    assert_eq!(cleaned, "<i>Bonjour le monde</i>");
}

/// Test that a two-line cue collapsed to one line by translation gets
/// re-wrapped at the space nearest the midpoint
#[test]
fn test_clean_withCollapsedTwoLineCue_shouldRewrap() {
    let cleaner = TextCleaner::new(FormatFamily::SubRip, 10);

    let cleaned = cleaner.clean("Bonjour tout le monde mes amis", plain_descriptor(2));

    assert_eq!(cleaned, "Bonjour tout le\nmonde mes amis");
}

/// Test that force_rewrap re-flows even when the line count held
#[test]
fn test_clean_withForceRewrap_shouldRewrapRegardless() {
    let cleaner = TextCleaner::new(FormatFamily::SubRip, 10);
    let mut descriptor = plain_descriptor(1);
    descriptor.force_rewrap = true;

    let cleaned = cleaner.clean("Bonjour tout le monde mes amis", descriptor);

    assert_eq!(cleaned, "Bonjour tout le\nmonde mes amis");
}

/// Test that a spaced ellipsis is tightened
#[test]
fn test_clean_withSpacedEllipsis_shouldTighten() {
    let cleaned = subrip_cleaner().clean("Attends ...", plain_descriptor(1));

    assert_eq!(cleaned, "Attends...");
}

/// Test that a paragraph closer leaking from an HTML-ish backend is removed
#[test]
fn test_clean_withParagraphCloser_shouldStripIt() {
    let cleaned = subrip_cleaner().clean("Bonjour</p>", plain_descriptor(1));

    assert_eq!(cleaned, "Bonjour");
}

/// Test that carriage returns normalize to bare newlines
#[test]
fn test_clean_withCarriageReturns_shouldNormalize() {
    let cleaned = subrip_cleaner().clean("Ligne une\r\nLigne deux", plain_descriptor(2));

    assert_eq!(cleaned, "Ligne une\nLigne deux");
}

/// Test that recorded formatting is restored after cleanup
#[test]
fn test_clean_withRecordedFormatting_shouldRestoreIt() {
    let (_, descriptor) = TagExtractor::extract("{\\an8}<i>Hello world</i>");

    let cleaned = subrip_cleaner().clean("BONJOUR LE MONDE", descriptor);

    assert_eq!(cleaned, "{\\an8}<i>BONJOUR LE MONDE</i>");
}

/// Test that a caller-supplied wrap collaborator is used for re-flow
#[test]
fn test_clean_withCustomWrapper_shouldUseIt() {
    #[derive(Debug)]
    struct FixedWrapper;

    impl AutoWrap for FixedWrapper {
        fn wrap(&self, _text: &str, _target_width: usize) -> String {
            "X\nY".to_string()
        }
    }

    let cleaner = TextCleaner::with_wrapper(FormatFamily::SubRip, 43, Box::new(FixedWrapper));

    let cleaned = cleaner.clean("Une longue ligne unique", plain_descriptor(2));

    assert_eq!(cleaned, "X\nY");
}
