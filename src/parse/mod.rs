//! Parsing of MIREX chord labels

pub mod chord_label;

pub use chord_label::{normalize, parse, to_mirex_notation};
