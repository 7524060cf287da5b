//! Chapter layout and FFMETADATA rendering.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ChapterError;

/// FFMETADATA format header, first line of every document.
const FFMETADATA_HEADER: &str = ";FFMETADATA1";

/// A named time range `[start, end)` within the final audio stream.
///
/// Entries are contiguous and non-overlapping: each entry's end is the
/// next entry's start, the first entry starts at 0, and every entry's end
/// exceeds its start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    /// Chapter title.
    pub title: String,
    /// Start offset in milliseconds.
    pub start_ms: u64,
    /// End offset in milliseconds.
    pub end_ms: u64,
}

/// Lays out one chapter per source file.
///
/// Boundaries are computed from a running cursor in float seconds and
/// rounded to the nearest millisecond at each boundary. The cursor itself
/// is never re-rounded, so rounding error does not accumulate across
/// chapters: durations `[0.3334, 0.3334]` yield boundaries 0/333/667.
///
/// Titles default to the filename with its extension stripped, falling
/// back to `Chapter {n}` (1-based) when the stripped name is empty.
///
/// # Panics
///
/// Panics if `paths` and `durations` differ in length; the caller resolves
/// durations from the same list, so a mismatch is a programming error.
pub fn build_chapters(
    paths: &[String],
    durations: &[f64],
) -> Result<Vec<ChapterEntry>, ChapterError> {
    assert_eq!(
        paths.len(),
        durations.len(),
        "paths and durations must correspond 1:1"
    );

    let mut entries = Vec::with_capacity(paths.len());
    let mut cursor = 0.0_f64;

    for (index, (path, duration)) in paths.iter().zip(durations).enumerate() {
        let start_ms = (cursor * 1000.0).round() as u64;
        let end_ms = ((cursor + duration) * 1000.0).round() as u64;

        if end_ms <= start_ms {
            return Err(ChapterError::ZeroDuration { path: path.clone() });
        }

        entries.push(ChapterEntry {
            title: chapter_title(path, index),
            start_ms,
            end_ms,
        });

        cursor += duration;
    }

    Ok(entries)
}

/// Renders entries as an FFMETADATA document.
///
/// The header and the per-chapter field order (TIMEBASE, START, END,
/// title) are parsed positionally/by-key downstream; do not reorder.
pub fn render_ffmetadata(entries: &[ChapterEntry]) -> String {
    let mut doc = String::from(FFMETADATA_HEADER);
    doc.push('\n');

    for entry in entries {
        doc.push_str("[CHAPTER]\n");
        doc.push_str("TIMEBASE=1/1000\n");
        doc.push_str(&format!("START={}\n", entry.start_ms));
        doc.push_str(&format!("END={}\n", entry.end_ms));
        doc.push_str(&format!("title={}\n", escape_metadata_value(&entry.title)));
    }

    doc
}

fn chapter_title(path: &str, index: usize) -> String {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    if stem.is_empty() {
        format!("Chapter {}", index + 1)
    } else {
        stem.to_string()
    }
}

/// Backslash-escapes the characters the FFMETADATA parser treats
/// specially in values: `=`, `;`, `#`, `\` and newline.
fn escape_metadata_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '=' | ';' | '#' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_contiguous_boundaries() {
        let entries = build_chapters(
            &paths(&["/in/one.mp3", "/in/two.mp3"]),
            &[10.0, 20.0],
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start_ms, 0);
        assert_eq!(entries[0].end_ms, 10_000);
        assert_eq!(entries[1].start_ms, 10_000);
        assert_eq!(entries[1].end_ms, 30_000);
    }

    #[test]
    fn test_cumulative_rounding_uses_running_cursor() {
        let entries = build_chapters(
            &paths(&["/in/a.mp3", "/in/b.mp3"]),
            &[0.3334, 0.3334],
        )
        .unwrap();

        // 0.3334 -> 333; 0.6668 -> 667. Re-rounding already-rounded
        // boundaries would give 333 + 333 = 666 instead.
        assert_eq!(entries[0].start_ms, 0);
        assert_eq!(entries[0].end_ms, 333);
        assert_eq!(entries[1].start_ms, 333);
        assert_eq!(entries[1].end_ms, 667);
    }

    #[test]
    fn test_titles_from_filename_stem() {
        let entries = build_chapters(
            &paths(&["/in/01 - Prologue.mp3", "/in/.mp3"]),
            &[5.0, 5.0],
        )
        .unwrap();

        assert_eq!(entries[0].title, "01 - Prologue");
        // ".mp3" has no stem to strip, so the fallback kicks in.
        assert_eq!(entries[1].title, "Chapter 2");
    }

    #[test]
    fn test_zero_duration_is_an_error() {
        let err = build_chapters(&paths(&["/in/empty.mp3"]), &[0.0]).unwrap_err();
        assert!(matches!(err, ChapterError::ZeroDuration { ref path } if path == "/in/empty.mp3"));
    }

    #[test]
    fn test_sub_millisecond_duration_is_an_error() {
        let err = build_chapters(&paths(&["/in/blip.mp3"]), &[0.0004]).unwrap_err();
        assert!(matches!(err, ChapterError::ZeroDuration { .. }));
    }

    #[test]
    #[should_panic(expected = "1:1")]
    fn test_length_mismatch_panics() {
        let _ = build_chapters(&paths(&["/in/a.mp3"]), &[1.0, 2.0]);
    }

    #[test]
    fn test_render_layout() {
        let entries = vec![
            ChapterEntry {
                title: "Intro".to_string(),
                start_ms: 0,
                end_ms: 10_000,
            },
            ChapterEntry {
                title: "Outro".to_string(),
                start_ms: 10_000,
                end_ms: 30_000,
            },
        ];

        let doc = render_ffmetadata(&entries);
        assert_eq!(
            doc,
            ";FFMETADATA1\n\
             [CHAPTER]\n\
             TIMEBASE=1/1000\n\
             START=0\n\
             END=10000\n\
             title=Intro\n\
             [CHAPTER]\n\
             TIMEBASE=1/1000\n\
             START=10000\n\
             END=30000\n\
             title=Outro\n"
        );
    }

    #[test]
    fn test_render_escapes_special_characters() {
        let entries = vec![ChapterEntry {
            title: "Q=A; #1".to_string(),
            start_ms: 0,
            end_ms: 1000,
        }];

        let doc = render_ffmetadata(&entries);
        assert!(doc.contains("title=Q\\=A\\; \\#1\n"));
    }

    #[test]
    fn test_idempotent() {
        let p = paths(&["/in/a.mp3", "/in/b.mp3"]);
        let d = [12.345, 67.891];
        assert_eq!(build_chapters(&p, &d).unwrap(), build_chapters(&p, &d).unwrap());
    }
}
