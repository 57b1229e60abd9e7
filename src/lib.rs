//! Color-harmony palette synthesis over named color catalogs.
//!
//! [`synth::Synthesizer`] sweeps a [`corpus::Corpus`] through the seven
//! [`harmony::HarmonyType`] rules and emits named [`synth::Theme`] records.
//! The remaining modules load catalogs, sample swatch images and persist
//! theme documents.

pub mod catalog;
pub mod color;
pub mod config;
pub mod corpus;
pub mod error;
pub mod harmony;
pub mod naming;
pub mod swatch;
pub mod synth;
pub mod themes;
pub mod utils;

pub use color::Color;
pub use corpus::Corpus;
pub use error::SwatchError;
pub use harmony::{HarmonyType, Palette};
pub use synth::{run_synthesis, SeedFilter, Synthesizer, Theme, ThemeColor};
