//! Chord label value types
//!
//! `ChordLabel` is the structured form of a MIREX chord string such as
//! `C#:maj7/3`. `ChordSelection` is the three-field subset the chord picker
//! edits (the picker has no bass column).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::mappings;

pub const NO_CHORD: &str = "N";
pub const UNKNOWN_CHORD: &str = "X";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChordLabel {
    /// Single letter root, empty for `N`/`X`
    pub root_note: String,

    /// `#`, `b` or empty
    pub accidental: String,

    pub shorthand: String,

    /// Scale degree of the bass note (e.g. `3`, `b7`), empty for root position
    pub bass_note: String,
}

impl ChordLabel {
    pub fn new(root_note: &str, accidental: &str, shorthand: &str, bass_note: &str) -> Self {
        Self {
            root_note: root_note.to_string(),
            accidental: accidental.to_string(),
            shorthand: shorthand.to_string(),
            bass_note: bass_note.to_string(),
        }
    }

    pub fn no_chord() -> Self {
        Self::new("", "", NO_CHORD, "")
    }

    pub fn unknown() -> Self {
        Self::new("", "", UNKNOWN_CHORD, "")
    }

    /// `N` or `X`: a label without a root
    pub fn is_rootless(&self) -> bool {
        is_rootless_shorthand(&self.shorthand)
    }

    pub fn is_major(&self) -> bool {
        self.shorthand == "maj"
    }

    /// Root plus accidental, e.g. `C#`
    pub fn root_with_accidental(&self) -> String {
        format!("{}{}", self.root_note, self.accidental)
    }

    /// Check the vocabulary and root invariants
    pub fn is_valid(&self) -> bool {
        if !mappings::is_known_shorthand(&self.shorthand) {
            return false;
        }
        if self.is_rootless() {
            return self.root_note.is_empty() && self.accidental.is_empty() && self.bass_note.is_empty();
        }
        let root_ok = self.root_note.len() == 1
            && matches!(self.root_note.as_bytes()[0], b'A'..=b'G');
        let accidental_ok = matches!(self.accidental.as_str(), "" | "#" | "b");
        root_ok && accidental_ok
    }

    pub fn selection(&self) -> ChordSelection {
        ChordSelection {
            root: self.root_note.clone(),
            accidental: self.accidental.clone(),
            shorthand: self.shorthand.clone(),
        }
    }
}

impl fmt::Display for ChordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::parse::chord_label::to_mirex_notation(self))
    }
}

pub fn is_rootless_shorthand(shorthand: &str) -> bool {
    shorthand == NO_CHORD || shorthand == UNKNOWN_CHORD
}

/// Column of the chord picker table
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChordComponent {
    Root,
    Accidental,
    Variation,
}

/// Root, accidental and shorthand as chosen in the chord picker
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChordSelection {
    pub root: String,
    pub accidental: String,
    pub shorthand: String,
}

impl ChordSelection {
    pub fn new(root: &str, accidental: &str, shorthand: &str) -> Self {
        Self {
            root: root.to_string(),
            accidental: accidental.to_string(),
            shorthand: shorthand.to_string(),
        }
    }

    /// Apply one picker click.
    ///
    /// Picking `N` or `X` clears root and accidental. Picking anything else
    /// while `N`/`X` is selected clears that variation first; a missing root
    /// then defaults to `C` and a missing variation to `maj`.
    pub fn pick(&mut self, component: ChordComponent, value: &str) {
        if component == ChordComponent::Variation && is_rootless_shorthand(value) {
            self.root.clear();
            self.accidental.clear();
            self.shorthand = value.to_string();
            return;
        }

        if is_rootless_shorthand(&self.shorthand) {
            self.shorthand.clear();
        }

        match component {
            ChordComponent::Root => self.root = value.to_string(),
            ChordComponent::Accidental => self.accidental = value.to_string(),
            ChordComponent::Variation => self.shorthand = value.to_string(),
        }

        if self.root.is_empty() {
            self.root = "C".to_string();
        }
        if self.shorthand.is_empty() {
            self.shorthand = "maj".to_string();
        }
    }

    /// Build a root-position label; `N`/`X` keep no root
    pub fn to_label(&self) -> ChordLabel {
        if is_rootless_shorthand(&self.shorthand) {
            return ChordLabel::new("", "", &self.shorthand, "");
        }
        ChordLabel::new(&self.root, &self.accidental, &self.shorthand, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(ChordLabel::new("C", "#", "maj7", "3").is_valid());
        assert!(ChordLabel::no_chord().is_valid());
        assert!(!ChordLabel::new("C", "", "N", "").is_valid());
        assert!(!ChordLabel::new("H", "", "maj", "").is_valid());
        assert!(!ChordLabel::new("C", "", "maj13", "").is_valid());
    }

    #[test]
    fn test_pick_no_chord_clears_root() {
        let mut selection = ChordSelection::new("G", "b", "min7");
        selection.pick(ChordComponent::Variation, "N");
        assert_eq!(selection, ChordSelection::new("", "", "N"));
    }

    #[test]
    fn test_pick_root_after_no_chord_defaults_to_major() {
        let mut selection = ChordSelection::new("", "", "X");
        selection.pick(ChordComponent::Root, "E");
        assert_eq!(selection, ChordSelection::new("E", "", "maj"));
    }

    #[test]
    fn test_pick_variation_after_no_chord_defaults_root() {
        let mut selection = ChordSelection::new("", "", "N");
        selection.pick(ChordComponent::Variation, "min");
        assert_eq!(selection, ChordSelection::new("C", "", "min"));
    }

    #[test]
    fn test_to_label_is_root_position() {
        assert_eq!(ChordSelection::new("", "", "N").to_label(), ChordLabel::no_chord());
        let label = ChordSelection::new("A", "", "min").to_label();
        assert_eq!(label, ChordLabel::new("A", "", "min", ""));
    }
}
