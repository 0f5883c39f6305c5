//! Region colouring by chord root
//!
//! Labels whose root is not in the palette (including labels that do not
//! parse at all) get `UNMATCHED_COLOR`, a loud red that makes bad data easy
//! to spot on the waveform.

use crate::models::mappings::{color_for_root, UNMATCHED_COLOR};
use crate::parse::chord_label;

/// Colour for the region starting at a marker with this label
pub fn color_for(raw_label: &str) -> &'static str {
    let key = match chord_label::parse(raw_label) {
        Ok(parts) if parts.is_rootless() => parts.shorthand,
        Ok(parts) => parts.root_with_accidental(),
        Err(_) => return UNMATCHED_COLOR,
    };

    color_for_root(&key).unwrap_or_else(|| {
        log::debug!("No region colour for label {:?}", raw_label);
        UNMATCHED_COLOR
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_depends_on_root_only() {
        assert_eq!(color_for("C:maj"), color_for("C:min7/b3"));
        assert_ne!(color_for("C:maj"), color_for("D:maj"));
    }

    #[test]
    fn test_rootless_labels_have_colors() {
        assert_ne!(color_for("N"), UNMATCHED_COLOR);
        assert_ne!(color_for("X"), UNMATCHED_COLOR);
    }

    #[test]
    fn test_fallback_color() {
        assert_eq!(color_for("Cmaj"), UNMATCHED_COLOR);
        assert_eq!(color_for(""), UNMATCHED_COLOR);
        assert_eq!(color_for("H:maj"), UNMATCHED_COLOR);
        assert_eq!(color_for("C##:maj"), UNMATCHED_COLOR);
    }
}
