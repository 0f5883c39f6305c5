//! Display forms derived from chord labels
//!
//! Text and symbol-font markup for marker labels, hover text and the region
//! colour palette.

pub mod chord_symbol;
pub mod colors;

pub use chord_symbol::{display_text_for, to_display_text, to_symbol_markup, tooltip_text, SymbolParts};
pub use colors::color_for;
