// Integration tests for the keepsake content shown on the page.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

#[test]
fn love_notes_are_unique_sentences() {
    let mut seen = HashSet::new();
    for note in valentine_page::LOVE_NOTES {
        assert!(seen.insert(*note), "duplicate love note '{}'", note);
        assert!(!note.trim().is_empty(), "empty love note");
        assert!(note.ends_with('.'), "love note '{}' should end with a period", note);
    }
}

#[test]
fn memories_have_unique_titles_and_notes() {
    let mut titles = HashSet::new();
    for (title, note) in valentine_page::MEMORIES {
        assert!(titles.insert(*title), "duplicate memory title '{}'", title);
        assert!(!note.is_empty(), "memory '{}' has no note", title);
    }
}

#[test]
fn heart_palette_is_hex_colors() {
    for color in valentine_page::hearts::HEART_COLORS {
        assert_eq!(color.len(), 7, "color '{}' should be #rrggbb", color);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()), "bad color '{}'", color);
    }
}
