use super::*;

#[test]
fn forward_scan_within_first_line() {
    let source = "line1\nline2\nline3";
    let mut tracker = LineColumnTracker::new(source);
    assert_eq!(tracker.locate(0), Position::new(1, 0));
    assert_eq!(tracker.locate(4), Position::new(1, 4));
}

#[test]
fn forward_scan_across_lines() {
    let source = "line1\nline2\nline3";
    let mut tracker = LineColumnTracker::new(source);
    assert_eq!(tracker.locate(6), Position::new(2, 0));
    assert_eq!(tracker.locate(12), Position::new(3, 0));
    assert_eq!(tracker.locate(17), Position::new(3, 5));
}

#[test]
fn backward_scan_from_later_position() {
    let source = "line1\nline2\nline3";
    let mut tracker = LineColumnTracker::new(source);
    // Warm the cache at the end of the file, then jump back.
    assert_eq!(tracker.locate(17), Position::new(3, 5));
    assert_eq!(tracker.locate(0), Position::new(1, 0));
    assert_eq!(tracker.locate(7), Position::new(2, 1));
}

#[test]
fn repeated_lookup_at_same_offset_is_stable() {
    let source = "abc\ndef";
    let mut tracker = LineColumnTracker::new(source);
    assert_eq!(tracker.locate(5), Position::new(2, 1));
    assert_eq!(tracker.locate(5), Position::new(2, 1));
}

#[test]
fn offset_past_end_of_file_clamps() {
    let source = "abc";
    let mut tracker = LineColumnTracker::new(source);
    assert_eq!(tracker.locate(100), Position::new(1, 3));
}

#[test]
fn empty_source_locates_at_origin() {
    let mut tracker = LineColumnTracker::new("");
    assert_eq!(tracker.locate(0), Position::new(1, 0));
}
