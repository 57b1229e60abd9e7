//! Mood classification and heuristic theme names.

use crate::color::{is_warm_hue, Color};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Overall feel of a color or palette; picks the adjective list for a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Warm,
    Cool,
    Neutral,
    Vibrant,
}

impl Mood {
    pub fn adjectives(self) -> &'static [&'static str] {
        match self {
            Mood::Warm => &[
                "Sunny", "Golden", "Fiery", "Warm", "Tropical", "Sunset", "Desert", "Autumn",
                "Spicy", "Cozy",
            ],
            Mood::Cool => &[
                "Icy", "Cool", "Fresh", "Crisp", "Arctic", "Ocean", "Winter", "Breezy", "Calm",
                "Serene",
            ],
            Mood::Neutral => &[
                "Soft", "Gentle", "Dreamy", "Elegant", "Subtle", "Delicate", "Smooth", "Muted",
                "Pastel", "Light",
            ],
            Mood::Vibrant => &[
                "Vibrant", "Bold", "Bright", "Electric", "Neon", "Intense", "Lively", "Radiant",
                "Dynamic", "Vivid",
            ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Warm => "warm",
            Mood::Cool => "cool",
            Mood::Neutral => "neutral",
            Mood::Vibrant => "vibrant",
        }
    }
}

/// Temperature of one color. Anything under 0.2 saturation reads as neutral.
pub fn color_temperature(hue: f64, saturation: f64) -> Mood {
    if saturation < 0.2 {
        Mood::Neutral
    } else if is_warm_hue(hue) {
        Mood::Warm
    } else {
        Mood::Cool
    }
}

/// Mood of a whole palette.
///
/// A clear warm or cool majority (by more than one color) wins; otherwise
/// the average saturation decides between vibrant and neutral.
pub fn palette_temperature(palette: &[&Color]) -> Mood {
    if palette.is_empty() {
        return Mood::Neutral;
    }

    let (mut warm, mut cool) = (0usize, 0usize);
    for color in palette {
        match color_temperature(color.hue(), color.saturation()) {
            Mood::Warm => warm += 1,
            Mood::Cool => cool += 1,
            _ => {}
        }
    }

    if warm > cool + 1 {
        return Mood::Warm;
    }
    if cool > warm + 1 {
        return Mood::Cool;
    }

    let avg_sat = palette.iter().map(|c| c.saturation()).sum::<f64>() / palette.len() as f64;
    if avg_sat > 0.6 {
        Mood::Vibrant
    } else {
        Mood::Neutral
    }
}

/// Noun for a harmony identifier; anything unrecognized becomes "Mix".
pub fn harmony_noun(harmony_type: &str) -> &'static str {
    match harmony_type {
        "analogous" => "Blend",
        "complementary" => "Contrast",
        "split_complementary" => "Harmony",
        "triadic" => "Trio",
        "monochromatic" => "Shades",
        "warm_cool" => "Fusion",
        "tetradic" => "Quartet",
        _ => "Mix",
    }
}

/// Random name built from the palette mood, the seed's first word and the harmony noun.
///
/// Draws the adjective first, then one of four templates.
pub fn theme_name<R: Rng + ?Sized>(
    seed: &Color,
    harmony_type: &str,
    palette: &[&Color],
    rng: &mut R,
) -> String {
    let mood = palette_temperature(palette);
    let adjective = mood.adjectives().choose(rng).copied().unwrap_or("Soft");
    let noun = harmony_noun(harmony_type);
    let seed_word = seed.short_name();

    match rng.gen_range(0..4) {
        0 => format!("{adjective} {seed_word} {noun}"),
        1 => format!("{seed_word} {noun}"),
        2 => format!("{adjective} {noun}"),
        _ => format!("{seed_word} {adjective} Mix"),
    }
}
