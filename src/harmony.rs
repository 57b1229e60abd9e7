//! Color-wheel harmony rules
//!
//! Each harmony picks target hues around a seed and fills every slot with the
//! best-scoring real color from the corpus. A harmony that cannot fill all
//! slots for a seed returns `None`.

use crate::color::Color;
use crate::error::SwatchError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod generators;
mod scoring;
mod search;

pub use generators::{
    analogous, complementary, monochromatic, split_complementary, tetradic, triadic, warm_cool,
};
pub use scoring::{score, select_best};
pub use search::{candidates_near, find_by_hue_range, DEFAULT_LIMIT, DEFAULT_MIN_SATURATION};

/// Seed first, then one distinct corpus color per remaining slot.
pub type Palette<'a> = Vec<&'a Color>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyType {
    Analogous,
    Complementary,
    SplitComplementary,
    Triadic,
    Monochromatic,
    WarmCool,
    Tetradic,
}

impl HarmonyType {
    pub const ALL: [HarmonyType; 7] = [
        Self::Analogous,
        Self::Complementary,
        Self::SplitComplementary,
        Self::Triadic,
        Self::Monochromatic,
        Self::WarmCool,
        Self::Tetradic,
    ];

    /// Identifier used in theme records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split_complementary",
            Self::Triadic => "triadic",
            Self::Monochromatic => "monochromatic",
            Self::WarmCool => "warm_cool",
            Self::Tetradic => "tetradic",
        }
    }

    /// Return human-readable display name for this harmony.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Analogous => "Analogous",
            Self::Complementary => "Complementary",
            Self::SplitComplementary => "Split-Complementary",
            Self::Triadic => "Triadic",
            Self::Monochromatic => "Monochromatic",
            Self::WarmCool => "Warm/Cool",
            Self::Tetradic => "Tetradic",
        }
    }

    /// Harmonies to try, in order, for a palette of `size` colors.
    ///
    /// Monochromatic leads for the small sizes; six-color palettes start
    /// with the rules that have the most anchor hues.
    pub fn for_size(size: usize) -> &'static [HarmonyType] {
        use HarmonyType::*;

        match size {
            0..=3 => &[Monochromatic, Analogous, Complementary, Triadic, SplitComplementary],
            4 => &[Monochromatic, SplitComplementary, Analogous, Tetradic, WarmCool],
            5 => &[Monochromatic, Triadic, WarmCool, SplitComplementary, Analogous],
            _ => &[Tetradic, WarmCool, Triadic, Analogous, SplitComplementary],
        }
    }

    /// Build a palette with this harmony. Only [`HarmonyType::WarmCool`] draws from `rng`.
    pub fn generate<'a, R: Rng + ?Sized>(
        self,
        seed: &'a Color,
        size: usize,
        corpus: &'a [Color],
        rng: &mut R,
    ) -> Option<Palette<'a>> {
        match self {
            Self::Analogous => analogous(seed, size, corpus),
            Self::Complementary => complementary(seed, size, corpus),
            Self::SplitComplementary => split_complementary(seed, size, corpus),
            Self::Triadic => triadic(seed, size, corpus),
            Self::Monochromatic => monochromatic(seed, size, corpus),
            Self::WarmCool => warm_cool(seed, size, corpus, rng),
            Self::Tetradic => tetradic(seed, size, corpus),
        }
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmonyType {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' ', '/'], "_");
        match normalized.as_str() {
            "analogous" => Ok(Self::Analogous),
            "complementary" | "complement" => Ok(Self::Complementary),
            "split_complementary" | "split" => Ok(Self::SplitComplementary),
            "triadic" | "triad" => Ok(Self::Triadic),
            "monochromatic" | "mono" => Ok(Self::Monochromatic),
            "warm_cool" | "warmcool" => Ok(Self::WarmCool),
            "tetradic" | "tetrad" => Ok(Self::Tetradic),
            _ => Err(SwatchError::UnknownHarmony(s.to_string())),
        }
    }
}
