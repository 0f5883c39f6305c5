//! MIREX chord notation parser
//!
//! Grammar: `N` | `X` | `Root [Accidental] ":" Shorthand ["/" Bass]`
//!
//! Any shorthand after the colon is accepted and kept verbatim, so
//! `to_mirex_notation` reproduces the input exactly. `N` and `X` never carry a
//! root or bass, and a `/` must be followed by a bass. Vocabulary checks live
//! in `ChordLabel::is_valid` and the display tables.

use crate::error::{AnnotatorError, Result};
use crate::models::chord::{is_rootless_shorthand, ChordLabel};

/// Split a MIREX label into its parts
pub fn parse(label: &str) -> Result<ChordLabel> {
    if is_rootless_shorthand(label) {
        return Ok(ChordLabel::new("", "", label, ""));
    }

    let mut chars = label.char_indices();
    let (_, root) = chars.next().ok_or_else(|| AnnotatorError::malformed(label))?;
    let root_end = root.len_utf8();

    let colon = match label[root_end..].find(':') {
        Some(offset) => root_end + offset,
        None => return Err(AnnotatorError::malformed(label)),
    };

    let accidental = &label[root_end..colon];
    let remainder = &label[colon + 1..];
    let (shorthand, bass_note) = match remainder.split_once('/') {
        Some((_, "")) => return Err(AnnotatorError::malformed(label)),
        Some((shorthand, bass)) => (shorthand, bass),
        None => (remainder, ""),
    };
    if is_rootless_shorthand(shorthand) {
        return Err(AnnotatorError::malformed(label));
    }

    Ok(ChordLabel {
        root_note: root.to_string(),
        accidental: accidental.to_string(),
        shorthand: shorthand.to_string(),
        bass_note: bass_note.to_string(),
    })
}

/// Rebuild the MIREX string; the left inverse of `parse`
pub fn to_mirex_notation(label: &ChordLabel) -> String {
    if label.is_rootless() {
        return label.shorthand.clone();
    }

    let mut out = String::with_capacity(8);
    out.push_str(&label.root_note);
    out.push_str(&label.accidental);
    out.push(':');
    out.push_str(&label.shorthand);
    if !label.bass_note.is_empty() {
        out.push('/');
        out.push_str(&label.bass_note);
    }
    out
}

/// Parse and re-serialize; malformed labels come back unchanged
pub fn normalize(label: &str) -> String {
    parse(label)
        .map(|parts| to_mirex_notation(&parts))
        .unwrap_or_else(|_| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_label() {
        let parts = parse("C#:maj7/3").unwrap();
        assert_eq!(parts, ChordLabel::new("C", "#", "maj7", "3"));
    }

    #[test]
    fn test_parse_plain_label() {
        assert_eq!(parse("G:min").unwrap(), ChordLabel::new("G", "", "min", ""));
        assert_eq!(parse("Bb:hdim7").unwrap(), ChordLabel::new("B", "b", "hdim7", ""));
    }

    #[test]
    fn test_parse_rootless() {
        for label in ["N", "X"] {
            let parts = parse(label).unwrap();
            assert!(parts.root_note.is_empty());
            assert!(parts.accidental.is_empty());
            assert!(parts.bass_note.is_empty());
            assert_eq!(parts.shorthand, label);
            assert_eq!(to_mirex_notation(&parts), label);
        }
    }

    #[test]
    fn test_missing_colon_is_malformed() {
        assert_eq!(parse("Cmaj"), Err(AnnotatorError::malformed("Cmaj")));
        assert!(parse("").is_err());
        assert!(parse("C").is_err());
    }

    #[test]
    fn test_labels_that_cannot_round_trip_are_malformed() {
        for label in ["C:maj/", "C:N", "G:X/3", "Bb:N", "N/3", "A:/"] {
            assert_eq!(parse(label), Err(AnnotatorError::malformed(label)), "{}", label);
            assert_eq!(normalize(label), label);
        }
    }

    #[test]
    fn test_round_trip() {
        for label in [
            "C#:maj7/3", "N", "X", "A:min", "Eb:7/b7", "F:sus4", "G:maj(9)", "D:min/5/3", "C:",
        ] {
            assert_eq!(to_mirex_notation(&parse(label).unwrap()), label);
        }
    }

    #[test]
    fn test_non_ascii_root_does_not_panic() {
        let parts = parse("É:maj").unwrap();
        assert_eq!(parts.root_note, "É");
        assert_eq!(to_mirex_notation(&parts), "É:maj");
    }

    #[test]
    fn test_normalize_keeps_malformed() {
        assert_eq!(normalize("garbage"), "garbage");
        assert_eq!(normalize("C:maj"), "C:maj");
    }
}
