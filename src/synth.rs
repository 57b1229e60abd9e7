//! Theme synthesis sweep
//!
//! For every eligible seed and every requested size, walk the size's harmony
//! ordering and keep the first few palettes that come out feasible. Each
//! palette becomes a named [`Theme`].

use crate::color::Color;
use crate::error::SwatchError;
use crate::harmony::{HarmonyType, Palette};
use crate::naming::theme_name;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info};

pub const DEFAULT_SIZES: [usize; 4] = [3, 4, 5, 6];

/// Themes kept per (seed, size) pair.
pub const PALETTES_PER_SIZE: usize = 3;

const PROGRESS_EVERY: usize = 50;

/// A palette member as written to theme documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColor {
    pub name: String,
    pub code: String,
    pub hex: String,
}

impl From<&Color> for ThemeColor {
    fn from(color: &Color) -> Self {
        Self {
            name: color.name.clone(),
            code: color.code.clone(),
            hex: color.hex.clone(),
        }
    }
}

/// One named palette and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub seed_color: String,
    pub seed_code: String,
    pub seed_hex: String,
    pub palette_size: usize,
    pub colors: Vec<ThemeColor>,
    pub theme_name: String,
    pub harmony_type: HarmonyType,
}

impl Theme {
    pub fn new(seed: &Color, harmony: HarmonyType, palette: &[&Color], theme_name: String) -> Self {
        Self {
            seed_color: seed.name.clone(),
            seed_code: seed.code.clone(),
            seed_hex: seed.hex.clone(),
            palette_size: palette.len(),
            colors: palette.iter().map(|c| ThemeColor::from(*c)).collect(),
            theme_name,
            harmony_type: harmony,
        }
    }
}

/// Which corpus colors may anchor a palette.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedFilter {
    /// Strict lower bound on saturation
    pub min_saturation: f64,
    /// Strict lower bound on value
    pub min_value: f64,
    /// Marker entries that are not real colors (case-insensitive)
    pub excluded_names: Vec<String>,
}

impl Default for SeedFilter {
    fn default() -> Self {
        Self {
            min_saturation: 0.1,
            min_value: 0.15,
            excluded_names: vec!["Colorless Blender".to_string()],
        }
    }
}

impl SeedFilter {
    pub fn accepts(&self, color: &Color) -> bool {
        color.saturation() > self.min_saturation
            && color.value() > self.min_value
            && !self
                .excluded_names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&color.name))
    }

    /// Eligible seeds in corpus order.
    pub fn select<'a>(&self, corpus: &'a [Color]) -> Vec<&'a Color> {
        corpus.iter().filter(|c| self.accepts(c)).collect()
    }
}

/// First harmony in the size ordering that can fill a palette for `seed`.
pub fn first_feasible<'a, R: Rng + ?Sized>(
    seed: &'a Color,
    size: usize,
    corpus: &'a [Color],
    rng: &mut R,
) -> Option<(HarmonyType, Palette<'a>)> {
    HarmonyType::for_size(size)
        .iter()
        .find_map(|&harmony| harmony.generate(seed, size, corpus, rng).map(|p| (harmony, p)))
}

/// Seeds, sizes and the per-size cap for one sweep over a shared corpus.
#[derive(Debug, Clone)]
pub struct Synthesizer<'a> {
    corpus: &'a [Color],
    seeds: Vec<&'a Color>,
    sizes: Vec<usize>,
    palettes_per_size: usize,
}

impl<'a> Synthesizer<'a> {
    /// Fails with [`SwatchError::InvalidPaletteSize`] for any size below 2.
    pub fn new(corpus: &'a [Color], filter: &SeedFilter, sizes: &[usize]) -> Result<Self, SwatchError> {
        if let Some(&bad) = sizes.iter().find(|&&s| s < 2) {
            return Err(SwatchError::InvalidPaletteSize(bad));
        }

        Ok(Self {
            corpus,
            seeds: filter.select(corpus),
            sizes: sizes.to_vec(),
            palettes_per_size: PALETTES_PER_SIZE,
        })
    }

    pub fn with_palettes_per_size(mut self, count: usize) -> Self {
        self.palettes_per_size = count;
        self
    }

    pub fn seeds(&self) -> &[&'a Color] {
        &self.seeds
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Upper bound on the number of themes a full sweep can produce.
    pub fn max_themes(&self) -> usize {
        self.seeds.len() * self.sizes.len() * self.palettes_per_size
    }

    /// Themes for one seed, size order then harmony order.
    pub fn themes_for_seed<R: Rng + ?Sized>(&self, seed: &'a Color, rng: &mut R) -> Vec<Theme> {
        let mut themes = Vec::new();

        for &size in &self.sizes {
            let mut made = 0;
            for &harmony in HarmonyType::for_size(size) {
                if made >= self.palettes_per_size {
                    break;
                }
                let Some(palette) = harmony.generate(seed, size, self.corpus, rng) else {
                    debug!(seed = %seed.code, size, %harmony, "harmony infeasible");
                    continue;
                };
                let name = theme_name(seed, harmony.as_str(), &palette, rng);
                themes.push(Theme::new(seed, harmony, &palette, name));
                made += 1;
            }
        }

        themes
    }

    /// Single-threaded sweep drawing everything from `rng`.
    ///
    /// Stops between seeds once `cancel` is set and returns what it has.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R, cancel: &AtomicBool) -> Vec<Theme> {
        let total = self.seeds.len();
        let mut themes = Vec::new();

        for (i, seed) in self.seeds.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                info!("Synthesis cancelled after {}/{} seeds", i, total);
                break;
            }
            themes.extend(self.themes_for_seed(*seed, rng));

            let done = i + 1;
            if done % PROGRESS_EVERY == 0 || done == total {
                info!("Processed {}/{} seeds ({} themes)", done, total, themes.len());
            }
        }

        themes
    }

    /// Parallel sweep over seeds. Seed `i` draws from its own
    /// `StdRng::seed_from_u64(base_seed + i)`, so the output for a given
    /// `base_seed` does not depend on scheduling.
    pub fn run_parallel(&self, base_seed: u64, cancel: &AtomicBool) -> Vec<Theme> {
        let total = self.seeds.len();
        let processed = AtomicUsize::new(0);

        let per_seed: Vec<Vec<Theme>> = self
            .seeds
            .par_iter()
            .enumerate()
            .map(|(i, seed)| {
                if cancel.load(Ordering::Relaxed) {
                    return Vec::new();
                }
                let mut rng = seed_rng(base_seed, i);
                let themes = self.themes_for_seed(*seed, &mut rng);

                let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                if count % PROGRESS_EVERY == 0 || count == total {
                    info!("Processed {}/{} seeds", count, total);
                }
                themes
            })
            .collect();

        if cancel.load(Ordering::Relaxed) {
            info!(
                "Synthesis cancelled after {}/{} seeds",
                processed.load(Ordering::Relaxed),
                total
            );
        }

        per_seed.into_iter().flatten().collect()
    }
}

/// RNG for the seed at `index` in a parallel sweep.
pub fn seed_rng(base_seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add(index as u64))
}

/// Full sequential sweep: filter seeds, then build up to
/// [`PALETTES_PER_SIZE`] themes per seed and size.
pub fn run_synthesis<R: Rng + ?Sized>(
    corpus: &[Color],
    filter: &SeedFilter,
    sizes: &[usize],
    rng: &mut R,
) -> Result<Vec<Theme>, SwatchError> {
    let synth = Synthesizer::new(corpus, filter, sizes)?;
    Ok(synth.run(rng, &AtomicBool::new(false)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hsv_to_hex;

    fn hsv(code: &str, hue: f64, sat: f64, val: f64) -> Color {
        Color::new(code, code, hsv_to_hex(hue, sat, val)).unwrap()
    }

    fn wheel(steps: usize) -> Vec<Color> {
        let step_deg = 360.0 / steps as f64;
        (0..steps)
            .flat_map(|step| {
                let hue = step as f64 * step_deg;
                [
                    hsv(&format!("h{step}a"), hue, 0.6, 0.9),
                    hsv(&format!("h{step}b"), hue, 0.5, 0.6),
                    hsv(&format!("h{step}c"), hue, 0.7, 0.4),
                    hsv(&format!("h{step}d"), hue, 0.4, 0.75),
                ]
            })
            .collect()
    }

    // --- seed filter ---

    #[test]
    fn test_seed_filter_rules() {
        let filter = SeedFilter::default();
        assert!(filter.accepts(&hsv("ok", 120.0, 0.5, 0.5)));
        assert!(!filter.accepts(&hsv("gray", 120.0, 0.05, 0.5)));
        assert!(!filter.accepts(&hsv("dark", 120.0, 0.5, 0.1)));

        let marker = Color::new("colorless blender", "0", "#ff0000").unwrap();
        assert!(!filter.accepts(&marker));
    }

    #[test]
    fn test_seed_filter_keeps_corpus_order() {
        let corpus = vec![
            hsv("a", 10.0, 0.5, 0.5),
            hsv("gray", 10.0, 0.0, 0.5),
            hsv("b", 200.0, 0.5, 0.5),
        ];
        let codes: Vec<&str> = SeedFilter::default()
            .select(&corpus)
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(codes, vec!["a", "b"]);
    }

    // --- synthesizer ---

    #[test]
    fn test_rejects_tiny_sizes() {
        let corpus = wheel(12);
        let err = Synthesizer::new(&corpus, &SeedFilter::default(), &[3, 1]).unwrap_err();
        assert_eq!(err, SwatchError::InvalidPaletteSize(1));
    }

    #[test]
    fn test_sweep_respects_cap_and_sizes() {
        let corpus = wheel(36);
        let synth = Synthesizer::new(&corpus, &SeedFilter::default(), &DEFAULT_SIZES).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let themes = synth.run(&mut rng, &AtomicBool::new(false));

        assert!(!themes.is_empty());
        assert!(themes.len() <= synth.max_themes());
        assert_eq!(synth.max_themes(), corpus.len() * 4 * 3);

        for theme in &themes {
            assert_eq!(theme.colors.len(), theme.palette_size);
            assert!(DEFAULT_SIZES.contains(&theme.palette_size));
            assert_eq!(theme.colors[0].code, theme.seed_code);
            assert!(HarmonyType::for_size(theme.palette_size).contains(&theme.harmony_type));
        }

        for seed in synth.seeds() {
            for size in DEFAULT_SIZES {
                let count = themes
                    .iter()
                    .filter(|t| t.seed_code == seed.code && t.palette_size == size)
                    .count();
                assert!(count <= PALETTES_PER_SIZE);
            }
        }
    }

    #[test]
    fn test_output_order_seed_then_size_then_harmony() {
        let corpus = wheel(36);
        let synth = Synthesizer::new(&corpus, &SeedFilter::default(), &[3, 6]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let themes = synth.run(&mut rng, &AtomicBool::new(false));

        let seed_pos = |code: &str| synth.seeds().iter().position(|s| s.code == code).unwrap();
        for pair in themes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (sa, sb) = (seed_pos(&a.seed_code), seed_pos(&b.seed_code));
            assert!(sa <= sb);
            if sa == sb {
                assert!(a.palette_size <= b.palette_size);
                if a.palette_size == b.palette_size {
                    let order = HarmonyType::for_size(a.palette_size);
                    let ia = order.iter().position(|h| *h == a.harmony_type).unwrap();
                    let ib = order.iter().position(|h| *h == b.harmony_type).unwrap();
                    assert!(ia < ib);
                }
            }
        }
    }

    #[test]
    fn test_small_size_leads_with_monochromatic() {
        let corpus = wheel(36);
        let synth = Synthesizer::new(&corpus, &SeedFilter::default(), &[3]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let themes = synth.themes_for_seed(&corpus[0], &mut rng);
        assert_eq!(themes.len(), 3);
        assert_eq!(themes[0].harmony_type, HarmonyType::Monochromatic);
    }

    #[test]
    fn test_palettes_per_size_override() {
        let corpus = wheel(36);
        let synth = Synthesizer::new(&corpus, &SeedFilter::default(), &[4])
            .unwrap()
            .with_palettes_per_size(1);
        let themes = synth.themes_for_seed(&corpus[4], &mut StdRng::seed_from_u64(0));
        assert_eq!(themes.len(), 1);
    }

    #[test]
    fn test_sparse_corpus_yields_fewer_themes() {
        // two colors can never fill a 3-color palette
        let corpus = vec![hsv("a", 10.0, 0.5, 0.5), hsv("b", 200.0, 0.5, 0.5)];
        let themes = run_synthesis(
            &corpus,
            &SeedFilter::default(),
            &[3],
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert!(themes.is_empty());
    }

    #[test]
    fn test_sequential_is_reproducible() {
        let corpus = wheel(18);
        let run = |seed| {
            run_synthesis(&corpus, &SeedFilter::default(), &DEFAULT_SIZES, &mut StdRng::seed_from_u64(seed))
                .unwrap()
        };
        assert_eq!(run(21), run(21));
    }

    // --- parallel ---

    #[test]
    fn test_parallel_matches_per_seed_rngs() {
        let corpus = wheel(18);
        let synth = Synthesizer::new(&corpus, &SeedFilter::default(), &DEFAULT_SIZES).unwrap();
        let parallel = synth.run_parallel(99, &AtomicBool::new(false));

        let expected: Vec<Theme> = synth
            .seeds()
            .iter()
            .enumerate()
            .flat_map(|(i, seed)| synth.themes_for_seed(*seed, &mut seed_rng(99, i)))
            .collect();
        assert_eq!(parallel, expected);
        assert_eq!(parallel, synth.run_parallel(99, &AtomicBool::new(false)));
    }

    #[test]
    fn test_cancelled_sweep_is_empty() {
        let corpus = wheel(18);
        let synth = Synthesizer::new(&corpus, &SeedFilter::default(), &DEFAULT_SIZES).unwrap();
        let cancel = AtomicBool::new(true);
        assert!(synth.run(&mut StdRng::seed_from_u64(0), &cancel).is_empty());
        assert!(synth.run_parallel(0, &cancel).is_empty());
    }

    // --- palette command helper ---

    #[test]
    fn test_first_feasible_follows_size_order() {
        let corpus = wheel(36);
        let mut rng = StdRng::seed_from_u64(2);
        let (harmony, palette) = first_feasible(&corpus[0], 6, &corpus, &mut rng).unwrap();
        assert_eq!(harmony, HarmonyType::Tetradic);
        assert_eq!(palette.len(), 6);

        let lonely = vec![hsv("solo", 0.0, 0.5, 0.5)];
        assert!(first_feasible(&lonely[0], 3, &lonely, &mut rng).is_none());
    }

    #[test]
    fn test_theme_serializes_expected_fields() {
        let seed = Color::new("Crimson", "R01", "#dc143c").unwrap();
        let teal = Color::new("Teal", "G01", "#008080").unwrap();
        let theme = Theme::new(&seed, HarmonyType::Complementary, &[&seed, &teal], "Bold Contrast".into());
        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["seed_color"], "Crimson");
        assert_eq!(json["palette_size"], 2);
        assert_eq!(json["harmony_type"], "complementary");
        assert_eq!(json["colors"][1]["hex"], "#008080");
    }
}
