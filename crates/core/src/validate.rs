//! Input validation performed before any expensive work begins.

use thiserror::Error;

/// Errors reported by [`validate_inputs`].
///
/// These are user-recoverable input errors: the selection or output path
/// can be edited and validation re-run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The file selection is empty.
    #[error("no input files provided")]
    NoInputFiles,

    /// The output path is empty or blank.
    #[error("output path is required")]
    OutputPathRequired,

    /// One or more selected files do not have an `.mp3` extension.
    /// All offending paths are listed, in input order, original casing.
    #[error("not MP3 files: {}", paths.join(", "))]
    NotMp3Files { paths: Vec<String> },
}

/// Validates a conversion input batch.
///
/// Rules are checked in order and the first failure wins:
/// 1. non-empty source list,
/// 2. non-blank output path,
/// 3. every source path ends in `.mp3` (case-insensitive).
///
/// Pure and deterministic: no I/O, identical inputs yield identical
/// results on every call.
pub fn validate_inputs(sources: &[String], output_path: &str) -> Result<(), ValidationError> {
    if sources.is_empty() {
        return Err(ValidationError::NoInputFiles);
    }

    if output_path.trim().is_empty() {
        return Err(ValidationError::OutputPathRequired);
    }

    let offending: Vec<String> = sources
        .iter()
        .filter(|p| !p.to_lowercase().ends_with(".mp3"))
        .cloned()
        .collect();

    if !offending.is_empty() {
        return Err(ValidationError::NotMp3Files { paths: offending });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_sources() {
        let err = validate_inputs(&[], "out").unwrap_err();
        assert_eq!(err, ValidationError::NoInputFiles);
        assert_eq!(err.to_string(), "no input files provided");
    }

    #[test]
    fn test_missing_output_path() {
        let err = validate_inputs(&paths(&["a.mp3"]), "").unwrap_err();
        assert_eq!(err, ValidationError::OutputPathRequired);
        assert_eq!(err.to_string(), "output path is required");
    }

    #[test]
    fn test_blank_output_path() {
        let err = validate_inputs(&paths(&["a.mp3"]), "   ").unwrap_err();
        assert_eq!(err, ValidationError::OutputPathRequired);
    }

    #[test]
    fn test_non_mp3_listed() {
        let err = validate_inputs(&paths(&["a.wav", "b.mp3"]), "out").unwrap_err();
        match &err {
            ValidationError::NotMp3Files { paths } => {
                assert_eq!(paths, &vec!["a.wav".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("a.wav"));
        assert!(!err.to_string().contains("b.mp3"));
    }

    #[test]
    fn test_all_offenders_listed_in_order() {
        let err =
            validate_inputs(&paths(&["z.Flac", "a.mp3", "b.WAV"]), "out").unwrap_err();
        match err {
            ValidationError::NotMp3Files { paths } => {
                assert_eq!(paths, vec!["z.Flac".to_string(), "b.WAV".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(validate_inputs(&paths(&["a.mp3", "b.MP3"]), "out").is_ok());
    }

    #[test]
    fn test_empty_sources_wins_over_missing_output() {
        let err = validate_inputs(&[], "").unwrap_err();
        assert_eq!(err, ValidationError::NoInputFiles);
    }

    #[test]
    fn test_idempotent() {
        let sources = paths(&["a.wav", "b.mp3"]);
        let first = validate_inputs(&sources, "out");
        let second = validate_inputs(&sources, "out");
        assert_eq!(first, second);
    }
}
