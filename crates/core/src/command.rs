//! Transcode command synthesis.
//!
//! Builds the exact ordered argument list for the ffmpeg invocation. The
//! order is a contract, not a suggestion: ffmpeg is positional and
//! flag-sensitive, and the chapter import relies on the metadata document
//! being input index 0.

use std::path::Path;

/// File extension of the audiobook container.
pub const AUDIOBOOK_EXTENSION: &str = ".m4b";

/// Fixed AAC bitrate for spoken-word content. A deliberate size/quality
/// tradeoff for speech, not music.
const AUDIO_BITRATE: &str = "64k";

/// Builds the ffmpeg argument list for one conversion.
///
/// Layout, in order:
/// 1. `-y` (overwrite output),
/// 2. the metadata document as input 0,
/// 3. each audio source as a further input, in list order,
/// 4. a concat filter over all `n` audio inputs, video disabled,
/// 5. `-vn`, AAC codec, 64 kbps,
/// 6. `-map_metadata 0` so chapters propagate from the document,
/// 7. optional title and artist metadata, in that order,
/// 8. the fixed audiobook genre tag,
/// 9. the output path, `.m4b` appended unless already present
///    (case-insensitive).
///
/// Pure given its inputs; no I/O.
pub fn build_transcode_args(
    paths: &[String],
    output_path: &str,
    metadata_file: &Path,
    title: Option<&str>,
    author: Option<&str>,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-i".to_string(),
        metadata_file.to_string_lossy().to_string(),
    ];

    for path in paths {
        args.push("-i".to_string());
        args.push(path.clone());
    }

    args.extend([
        "-filter_complex".to_string(),
        format!("concat=n={}:v=0:a=1", paths.len()),
        "-vn".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-b:a".to_string(),
        AUDIO_BITRATE.to_string(),
        "-map_metadata".to_string(),
        "0".to_string(),
    ]);

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        args.extend(["-metadata".to_string(), format!("title={}", title)]);
    }
    if let Some(author) = author.filter(|a| !a.is_empty()) {
        args.extend(["-metadata".to_string(), format!("artist={}", author)]);
    }

    args.extend([
        "-metadata".to_string(),
        "genre=Audiobook".to_string(),
        ensure_audiobook_extension(output_path),
    ]);

    args
}

/// Appends the audiobook extension unless the path already ends with it
/// (exact suffix, compared case-insensitively).
pub fn ensure_audiobook_extension(output_path: &str) -> String {
    if output_path.to_lowercase().ends_with(AUDIOBOOK_EXTENSION) {
        output_path.to_string()
    } else {
        format!("{}{}", output_path, AUDIOBOOK_EXTENSION)
    }
}
