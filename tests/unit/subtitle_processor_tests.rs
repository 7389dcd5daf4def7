/*!
 * Tests for subtitle processing functionality
 */

use std::path::PathBuf;
use std::fmt::Write;
use anyhow::Result;
use subrelay::subtitle_processor::{SubtitleEntry, SubtitleCollection};
use crate::common;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = SubtitleEntry::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = SubtitleEntry::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

/// Test timestamp parsing with a dot millisecond separator
#[test]
fn test_timestamp_parsing_withDotSeparator_shouldParse() {
    let ms = SubtitleEntry::parse_timestamp("00:00:01.500").unwrap();
    assert_eq!(ms, 1500);
}

/// Test timestamp parsing rejects out-of-range components
#[test]
fn test_timestamp_parsing_withInvalidComponents_shouldFail() {
    assert!(SubtitleEntry::parse_timestamp("00:99:00,000").is_err());
    assert!(SubtitleEntry::parse_timestamp("00:00:75,000").is_err());
    assert!(SubtitleEntry::parse_timestamp("garbage").is_err());
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withValidEntry_shouldFormatCorrectly() {
    let entry = SubtitleEntry::new(1, 5000, 10000, "Test subtitle".to_string());
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert!(output.contains("1"));
    assert!(output.contains("00:00:05,000 --> 00:00:10,000"));
    assert!(output.contains("Test subtitle"));
}

/// Test subtitle entry properties and methods
#[test]
fn test_subtitle_entry_properties_withValidEntry_shouldHaveCorrectValues() {
    let entry = SubtitleEntry::new(
        42,
        61234,
        65432,
        "Hello\nWorld".to_string()
    );

    // Check properties
    assert_eq!(entry.seq_num, 42);
    assert_eq!(entry.start_time_ms, 61234);
    assert_eq!(entry.end_time_ms, 65432);
    assert_eq!(entry.text, "Hello\nWorld");

    // Check formatting
    assert_eq!(entry.format_start_time(), "00:01:01,234");
    assert_eq!(entry.format_end_time(), "00:01:05,432");
}

/// Test that an entry with empty text is allowed, since merge-style
/// batching hands the pipeline empty continuation cues
#[test]
fn test_subtitle_entry_new_withEmptyText_shouldBeAllowed() {
    let entry = SubtitleEntry::new(1, 0, 1000, String::new());

    assert_eq!(entry.text, "");
}

/// Test validated construction rejects bad time ranges and empty text
#[test]
fn test_new_validated_withInvalidInput_shouldFail() {
    assert!(SubtitleEntry::new_validated(1, 5000, 5000, "Text".to_string()).is_err());
    assert!(SubtitleEntry::new_validated(1, 5000, 4000, "Text".to_string()).is_err());
    assert!(SubtitleEntry::new_validated(1, 0, 1000, "   ".to_string()).is_err());
}

/// Test in-memory subtitle collection
#[test]
fn test_in_memory_subtitle_collection_withValidEntries_shouldStoreCorrectly() {
    // Create a collection
    let source_file = PathBuf::from("movie.srt");
    let mut collection = SubtitleCollection::new(source_file.clone(), "en".to_string());

    // Add some entries
    collection.entries.push(SubtitleEntry::new(
        1, 0, 5000, "First subtitle".to_string()
    ));
    collection.entries.push(SubtitleEntry::new(
        2, 5500, 10000, "Second subtitle".to_string()
    ));

    // Check properties
    assert_eq!(collection.source_file, source_file);
    assert_eq!(collection.source_language, "en");
    assert_eq!(collection.entries.len(), 2);

    // Check entries
    assert_eq!(collection.entries[0].seq_num, 1);
    assert_eq!(collection.entries[0].text, "First subtitle");
    assert_eq!(collection.entries[1].seq_num, 2);
    assert_eq!(collection.entries[1].text, "Second subtitle");
}

/// Test parsing SRT string content
#[test]
fn test_parse_srt_string_withValidContent_shouldParseCorrectly() -> Result<()> {
    let srt_content = "1\n00:00:01,000 --> 00:00:04,000\nHello world\n\n2\n00:00:05,000 --> 00:00:08,000\nTest subtitle\nSecond line\n\n";

    let entries = SubtitleCollection::parse_srt_string(srt_content)?;

    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[0].start_time_ms, 1000);
    assert_eq!(entries[0].end_time_ms, 4000);
    assert_eq!(entries[0].text, "Hello world");

    assert_eq!(entries[1].seq_num, 2);
    assert_eq!(entries[1].start_time_ms, 5000);
    assert_eq!(entries[1].end_time_ms, 8000);
    assert_eq!(entries[1].text, "Test subtitle\nSecond line");

    Ok(())
}

/// Test that out-of-order entries come back sorted by start time and
/// renumbered sequentially
#[test]
fn test_parse_srt_string_withOutOfOrderEntries_shouldSortAndRenumber() -> Result<()> {
    let srt_content = "7\n00:00:10,000 --> 00:00:12,000\nLater cue\n\n3\n00:00:01,000 --> 00:00:03,000\nEarlier cue\n\n";

    let entries = SubtitleCollection::parse_srt_string(srt_content)?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "Earlier cue");
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[1].text, "Later cue");
    assert_eq!(entries[1].seq_num, 2);

    Ok(())
}

/// Test that the last entry parses even without a trailing blank line
#[test]
fn test_parse_srt_string_withMissingTrailingBlankLine_shouldParseLastEntry() -> Result<()> {
    let srt_content = "1\n00:00:01,000 --> 00:00:04,000\nOnly entry";

    let entries = SubtitleCollection::parse_srt_string(srt_content)?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Only entry");

    Ok(())
}

/// Test that content with no parsable entries is an error
#[test]
fn test_parse_srt_string_withNoEntries_shouldFail() {
    assert!(SubtitleCollection::parse_srt_string("").is_err());
    assert!(SubtitleCollection::parse_srt_string("not a subtitle file").is_err());
}

/// Test write and load round trip through a real file
#[test]
fn test_write_to_srt_thenLoad_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("round_trip.srt");

    let mut collection = SubtitleCollection::new(path.clone(), "en".to_string());
    collection.entries.push(SubtitleEntry::new(
        1, 1000, 4000, "First cue".to_string()
    ));
    collection.entries.push(SubtitleEntry::new(
        2, 5000, 8000, "Second cue\nwith two lines".to_string()
    ));

    collection.write_to_srt(&path)?;

    let loaded = SubtitleCollection::load_from_file(&path, "en")?;
    assert_eq!(loaded.entries.len(), 2);
    assert_eq!(loaded.entries[0].text, "First cue");
    assert_eq!(loaded.entries[0].start_time_ms, 1000);
    assert_eq!(loaded.entries[1].text, "Second cue\nwith two lines");
    assert_eq!(loaded.entries[1].end_time_ms, 8000);

    Ok(())
}

/// Test loading a sample subtitle file from disk
#[test]
fn test_load_from_file_withSampleFile_shouldParseEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subtitle = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "test.srt")?;

    let collection = SubtitleCollection::load_from_file(&test_subtitle, "en")?;

    assert_eq!(collection.source_language, "en");
    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.entries[0].text, "This is a test subtitle.");

    Ok(())
}

/// Test that loading a missing file fails with an error
#[test]
fn test_load_from_file_withMissingFile_shouldFail() {
    let result = SubtitleCollection::load_from_file("/nonexistent/missing.srt", "en");

    assert!(result.is_err());
}

/// Test renumbering after removals
#[test]
fn test_renumber_withGappySequence_shouldRestoreOrder() {
    let mut collection = SubtitleCollection::new(PathBuf::from("movie.srt"), "en".to_string());
    collection.entries.push(SubtitleEntry::new(4, 0, 1000, "a".to_string()));
    collection.entries.push(SubtitleEntry::new(9, 2000, 3000, "b".to_string()));

    collection.renumber();

    assert_eq!(collection.entries[0].seq_num, 1);
    assert_eq!(collection.entries[1].seq_num, 2);
}
