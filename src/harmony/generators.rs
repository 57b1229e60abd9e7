use super::scoring::select_best;
use super::search::candidates_near;
use super::Palette;
use crate::color::{hue_distance, is_warm_hue, normalize_hue, Color};
use rand::Rng;
use std::cmp::Ordering;

/// Best-scoring corpus color for one slot, excluding everything already in `palette`.
fn best_for<'a>(
    corpus: &'a [Color],
    palette: &[&'a Color],
    target_hue: f64,
    tolerance: f64,
) -> Option<&'a Color> {
    let candidates = candidates_near(corpus, target_hue, tolerance, palette);
    select_best(candidates, target_hue, 1, palette, None)
        .into_iter()
        .next()
}

fn finish(mut palette: Palette<'_>, size: usize) -> Option<Palette<'_>> {
    if palette.len() < size {
        return None;
    }
    palette.truncate(size);
    Some(palette)
}

/// Neighbors at `seed ± (30 + 20·i)`; the lower half is inserted right after the seed.
pub fn analogous<'a>(seed: &'a Color, size: usize, corpus: &'a [Color]) -> Option<Palette<'a>> {
    if size < 2 {
        return Some(vec![seed]);
    }

    let mut palette = vec![seed];
    let remaining = size - 1;
    let lower_count = remaining / 2;
    let higher_count = remaining - lower_count;

    for i in 0..lower_count {
        let target = normalize_hue(seed.hue() - (30.0 + i as f64 * 20.0));
        if let Some(color) = best_for(corpus, &palette, target, 35.0) {
            palette.insert(1, color);
        }
    }

    for i in 0..higher_count {
        let target = normalize_hue(seed.hue() + (30.0 + i as f64 * 20.0));
        if let Some(color) = best_for(corpus, &palette, target, 35.0) {
            palette.push(color);
        }
    }

    finish(palette, size)
}

/// The 180° complement, then bridges alternating off the complement and the seed.
pub fn complementary<'a>(
    seed: &'a Color,
    size: usize,
    corpus: &'a [Color],
) -> Option<Palette<'a>> {
    if size < 2 {
        return Some(vec![seed]);
    }

    let mut palette = vec![seed];
    let complement = normalize_hue(seed.hue() + 180.0);
    if let Some(color) = best_for(corpus, &palette, complement, 30.0) {
        palette.push(color);
    }

    let remaining = size.saturating_sub(palette.len());
    for i in 0..remaining {
        let offset = 30.0 + i as f64 * 15.0;
        let target = if i % 2 == 0 {
            normalize_hue(complement + offset)
        } else {
            normalize_hue(seed.hue() + offset)
        };
        if let Some(color) = best_for(corpus, &palette, target, 25.0) {
            palette.push(color);
        }
    }

    finish(palette, size)
}

/// Both sides of the complement (+150°, +210°), then accents at `seed ± (60 + 10·i)`.
pub fn split_complementary<'a>(
    seed: &'a Color,
    size: usize,
    corpus: &'a [Color],
) -> Option<Palette<'a>> {
    if size < 2 {
        return Some(vec![seed]);
    }

    let mut palette = vec![seed];
    for offset in [150.0, 210.0] {
        let target = normalize_hue(seed.hue() + offset);
        if let Some(color) = best_for(corpus, &palette, target, 30.0) {
            palette.push(color);
        }
    }

    let remaining = size.saturating_sub(palette.len());
    for i in 0..remaining {
        let step = 60.0 + i as f64 * 10.0;
        let target = if i % 2 == 0 {
            normalize_hue(seed.hue() + step)
        } else {
            normalize_hue(seed.hue() - step)
        };
        if let Some(color) = best_for(corpus, &palette, target, 30.0) {
            palette.push(color);
        }
    }

    finish(palette, size)
}

/// Anchors at +120° and +240°, then bridges between successive anchors.
pub fn triadic<'a>(seed: &'a Color, size: usize, corpus: &'a [Color]) -> Option<Palette<'a>> {
    if size < 2 {
        return Some(vec![seed]);
    }

    let mut palette = vec![seed];
    let anchors = [
        seed.hue(),
        normalize_hue(seed.hue() + 120.0),
        normalize_hue(seed.hue() + 240.0),
    ];
    for &target in &anchors[1..] {
        if let Some(color) = best_for(corpus, &palette, target, 35.0) {
            palette.push(color);
        }
    }

    let remaining = size.saturating_sub(palette.len());
    for i in 0..remaining {
        let from = anchors[i % 3];
        let to = anchors[(i + 1) % 3];
        // plain average, not the circular midpoint
        let target = normalize_hue((from + to) / 2.0);
        if let Some(color) = best_for(corpus, &palette, target, 25.0) {
            palette.push(color);
        }
    }

    finish(palette, size)
}

/// Same hue family, ranked by how much value and saturation differ from the seed.
///
/// Only colors within 25° are ranked; if that leaves slots open, the
/// remaining colors within 40° fill them in corpus order.
pub fn monochromatic<'a>(
    seed: &'a Color,
    size: usize,
    corpus: &'a [Color],
) -> Option<Palette<'a>> {
    if size < 2 {
        return Some(vec![seed]);
    }

    let mut ranked: Vec<(f64, &'a Color)> = corpus
        .iter()
        .filter(|c| c.code != seed.code)
        .filter(|c| hue_distance(c.hue(), seed.hue()) <= 25.0)
        .map(|c| {
            let variety = (c.value() - seed.value()).abs()
                + (c.saturation() - seed.saturation()).abs() * 0.5;
            (variety, c)
        })
        .collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut palette = vec![seed];
    palette.extend(ranked.into_iter().take(size - 1).map(|(_, c)| c));

    if palette.len() < size {
        for color in corpus {
            if palette.len() >= size {
                break;
            }
            if palette.iter().any(|p| p.code == color.code) {
                continue;
            }
            if hue_distance(color.hue(), seed.hue()) <= 40.0 {
                palette.push(color);
            }
        }
    }

    finish(palette, size)
}

/// Degrees drawn for warm slots: 330..=360 and 0..=60.
const WARM_HUE_COUNT: u32 = 31 + 61;

fn random_warm_hue<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let pick = rng.gen_range(0..WARM_HUE_COUNT);
    if pick < 31 {
        (330 + pick) as f64
    } else {
        (pick - 31) as f64
    }
}

fn random_cool_hue<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(61..300u32) as f64
}

/// `(warm, cool)` slot counts. The seed's bucket gets `size / 2 + 1`, the seed included.
fn bucket_shares(size: usize, seed_is_warm: bool) -> (usize, usize) {
    let own_share = (size / 2 + 1).min(size);
    if seed_is_warm {
        (own_share, size - own_share)
    } else {
        (size - own_share, own_share)
    }
}

/// Fill warm and cool buckets from random hues in each range.
///
/// A bucket stops at its first random hue with no candidate, so this can
/// come up short.
pub fn warm_cool<'a, R: Rng + ?Sized>(
    seed: &'a Color,
    size: usize,
    corpus: &'a [Color],
    rng: &mut R,
) -> Option<Palette<'a>> {
    if size < 2 {
        return Some(vec![seed]);
    }

    let seed_is_warm = is_warm_hue(seed.hue());
    let (warm_count, cool_count) = bucket_shares(size, seed_is_warm);

    let mut palette = vec![seed];

    let mut warm_added = usize::from(seed_is_warm);
    while warm_added < warm_count {
        let target = random_warm_hue(rng);
        match best_for(corpus, &palette, target, 40.0) {
            Some(color) => {
                palette.push(color);
                warm_added += 1;
            }
            None => break,
        }
    }

    let mut cool_added = usize::from(!seed_is_warm);
    while cool_added < cool_count {
        let target = random_cool_hue(rng);
        match best_for(corpus, &palette, target, 40.0) {
            Some(color) => {
                palette.push(color);
                cool_added += 1;
            }
            None => break,
        }
    }

    finish(palette, size)
}

/// Rectangle on the wheel (+60°, +180°, +240°), then bridges between neighbors.
pub fn tetradic<'a>(seed: &'a Color, size: usize, corpus: &'a [Color]) -> Option<Palette<'a>> {
    if size < 2 {
        return Some(vec![seed]);
    }

    let mut palette = vec![seed];
    for offset in [60.0, 180.0, 240.0] {
        let target = normalize_hue(seed.hue() + offset);
        if let Some(color) = best_for(corpus, &palette, target, 30.0) {
            palette.push(color);
        }
    }

    let remaining = size.saturating_sub(palette.len());
    for i in 0..remaining {
        let len = palette.len();
        let target = if len >= 2 {
            normalize_hue((palette[i % len].hue() + palette[(i + 1) % len].hue()) / 2.0)
        } else {
            normalize_hue(seed.hue() + 90.0 + i as f64 * 45.0)
        };
        if let Some(color) = best_for(corpus, &palette, target, 25.0) {
            palette.push(color);
        }
    }

    finish(palette, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hsv_to_hex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hsv(code: &str, hue: f64, sat: f64, val: f64) -> Color {
        Color::new(code, code, hsv_to_hex(hue, sat, val)).unwrap()
    }

    /// Four colors every 10° around the wheel at alternating brightness.
    fn wheel() -> Vec<Color> {
        (0..36)
            .flat_map(|step| {
                let hue = step as f64 * 10.0;
                [
                    hsv(&format!("h{step}a"), hue, 0.6, 0.9),
                    hsv(&format!("h{step}b"), hue, 0.5, 0.6),
                    hsv(&format!("h{step}c"), hue, 0.7, 0.4),
                    hsv(&format!("h{step}d"), hue, 0.4, 0.75),
                ]
            })
            .collect()
    }

    fn assert_valid(palette: &Palette<'_>, seed: &Color, size: usize) {
        assert_eq!(palette.len(), size);
        assert_eq!(palette[0].code, seed.code);
        let mut codes: Vec<&str> = palette.iter().map(|c| c.code.as_str()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), size, "duplicate codes in {palette:?}");
    }

    // --- shared contract ---

    #[test]
    fn test_size_below_two_returns_seed() {
        let corpus = wheel();
        let seed = &corpus[0];
        let mut rng = StdRng::seed_from_u64(1);
        for size in [0, 1] {
            assert_eq!(analogous(seed, size, &corpus).unwrap().len(), 1);
            assert_eq!(complementary(seed, size, &corpus).unwrap().len(), 1);
            assert_eq!(split_complementary(seed, size, &corpus).unwrap().len(), 1);
            assert_eq!(triadic(seed, size, &corpus).unwrap().len(), 1);
            assert_eq!(monochromatic(seed, size, &corpus).unwrap().len(), 1);
            assert_eq!(warm_cool(seed, size, &corpus, &mut rng).unwrap().len(), 1);
            assert_eq!(tetradic(seed, size, &corpus).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_full_wheel_fills_every_generator() {
        let corpus = wheel();
        let mut rng = StdRng::seed_from_u64(7);
        for seed in corpus.iter().step_by(13) {
            for size in 3..=6 {
                assert_valid(&analogous(seed, size, &corpus).unwrap(), seed, size);
                assert_valid(&complementary(seed, size, &corpus).unwrap(), seed, size);
                assert_valid(&split_complementary(seed, size, &corpus).unwrap(), seed, size);
                assert_valid(&triadic(seed, size, &corpus).unwrap(), seed, size);
                assert_valid(&monochromatic(seed, size, &corpus).unwrap(), seed, size);
                assert_valid(&warm_cool(seed, size, &corpus, &mut rng).unwrap(), seed, size);
                assert_valid(&tetradic(seed, size, &corpus).unwrap(), seed, size);
            }
        }
    }

    #[test]
    fn test_infeasible_returns_none() {
        let corpus = vec![hsv("lonely", 0.0, 0.8, 0.8)];
        let seed = &corpus[0];
        assert!(complementary(seed, 3, &corpus).is_none());
        assert!(triadic(seed, 3, &corpus).is_none());
        assert!(monochromatic(seed, 2, &corpus).is_none());
    }

    // --- analogous ---

    #[test]
    fn test_analogous_lower_hues_precede_higher() {
        let seed = hsv("seed", 180.0, 0.6, 0.6);
        let corpus = vec![
            seed.clone(),
            hsv("low", 150.0, 0.6, 0.9),
            hsv("high", 210.0, 0.6, 0.3),
        ];
        let palette = analogous(&corpus[0], 3, &corpus).unwrap();
        let codes: Vec<&str> = palette.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["seed", "low", "high"]);
    }

    // --- complementary ---

    #[test]
    fn test_complementary_crimson() {
        let corpus = vec![
            Color::new("Crimson", "R01", "#DC143C").unwrap(),
            Color::new("Teal", "G01", hsv_to_hex(168.0, 0.7, 0.6)).unwrap(),
            Color::new("Sky", "B01", hsv_to_hex(198.0, 0.6, 0.9)).unwrap(),
            Color::new("Lemon", "Y01", hsv_to_hex(55.0, 0.7, 0.9)).unwrap(),
        ];
        let palette = complementary(&corpus[0], 3, &corpus).unwrap();
        assert_valid(&palette, &corpus[0], 3);
        assert_eq!(palette[1].code, "G01");
        // first bridge aims at the complement + 30°
        assert_eq!(palette[2].code, "B01");
    }

    // --- split-complementary ---

    #[test]
    fn test_split_complementary_accent_order() {
        let corpus = vec![
            hsv("seed", 0.0, 0.6, 0.5),
            hsv("a290", 290.0, 0.6, 0.7),
            hsv("a60", 60.0, 0.6, 0.7),
            hsv("s210", 210.0, 0.6, 0.3),
            hsv("s150", 150.0, 0.6, 0.9),
        ];
        let palette = split_complementary(&corpus[0], 5, &corpus).unwrap();
        let codes: Vec<&str> = palette.iter().map(|c| c.code.as_str()).collect();
        // +150, +210, then seed + 60 before seed - 70
        assert_eq!(codes, vec!["seed", "s150", "s210", "a60", "a290"]);
    }

    // --- triadic ---

    #[test]
    fn test_triadic_bridge_uses_plain_average() {
        // anchors 300, 60, 180: the first bridge aims at (300 + 60) / 2 = 180,
        // not at 0 across the wrap
        let corpus = vec![
            hsv("seed", 300.0, 0.6, 0.5),
            hsv("r0", 0.0, 0.6, 0.7),
            hsv("t60", 60.0, 0.6, 0.9),
            hsv("t180", 180.0, 0.6, 0.3),
            hsv("b200", 200.0, 0.6, 0.7),
        ];
        let palette = triadic(&corpus[0], 4, &corpus).unwrap();
        let codes: Vec<&str> = palette.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["seed", "t60", "t180", "b200"]);
    }

    // --- monochromatic ---

    #[test]
    fn test_monochromatic_prefers_variety() {
        let corpus = vec![
            hsv("seed", 100.0, 0.5, 0.5),
            hsv("same", 102.0, 0.5, 0.52),
            hsv("light", 105.0, 0.3, 0.95),
            hsv("dark", 95.0, 0.8, 0.15),
        ];
        let palette = monochromatic(&corpus[0], 3, &corpus).unwrap();
        let codes: Vec<&str> = palette.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["seed", "light", "dark"]);
    }

    #[test]
    fn test_monochromatic_widens_to_forty_degrees() {
        let corpus = vec![
            hsv("seed", 200.0, 0.5, 0.5),
            hsv("near", 210.0, 0.5, 0.8),
            hsv("wide", 235.0, 0.5, 0.3),
            hsv("too_far", 250.0, 0.5, 0.3),
        ];
        let palette = monochromatic(&corpus[0], 3, &corpus).unwrap();
        let codes: Vec<&str> = palette.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["seed", "near", "wide"]);
        assert!(monochromatic(&corpus[0], 4, &corpus).is_none());
    }

    #[test]
    fn test_monochromatic_accepts_grays_in_family() {
        // the gray floor only applies to hue searches, not to monochromatic ranking
        let corpus = vec![
            hsv("seed", 0.0, 0.6, 0.6),
            hsv("gray", 0.0, 0.0, 0.3),
            hsv("pink", 5.0, 0.3, 0.9),
        ];
        assert!(monochromatic(&corpus[0], 3, &corpus).is_some());
    }

    // --- warm/cool ---

    #[test]
    fn test_bucket_shares_favor_seed_temperature() {
        assert_eq!(bucket_shares(3, true), (2, 1));
        assert_eq!(bucket_shares(4, true), (3, 1));
        assert_eq!(bucket_shares(5, true), (3, 2));
        assert_eq!(bucket_shares(4, false), (1, 3));
        assert_eq!(bucket_shares(6, false), (2, 4));
        assert_eq!(bucket_shares(2, false), (0, 2));
    }

    #[test]
    fn test_warm_cool_deterministic_for_seeded_rng() {
        let corpus = wheel();
        let seed = &corpus[60];
        let a = warm_cool(seed, 4, &corpus, &mut StdRng::seed_from_u64(3));
        let b = warm_cool(seed, 4, &corpus, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_warm_cool_underfills_without_cool_colors() {
        let corpus = vec![
            hsv("seed", 10.0, 0.7, 0.7),
            hsv("orange", 20.0, 0.7, 0.5),
            hsv("red", 355.0, 0.7, 0.9),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        assert!(warm_cool(&corpus[0], 3, &corpus, &mut rng).is_none());
    }

    #[test]
    fn test_random_hues_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let warm = random_warm_hue(&mut rng);
            assert!(warm >= 330.0 || warm <= 60.0, "{warm}");
            let cool = random_cool_hue(&mut rng);
            assert!(cool > 60.0 && cool < 300.0, "{cool}");
        }
    }

    // --- tetradic ---

    #[test]
    fn test_tetradic_rectangle_order() {
        let corpus = vec![
            hsv("seed", 0.0, 0.6, 0.6),
            hsv("t60", 60.0, 0.6, 0.9),
            hsv("t180", 180.0, 0.6, 0.3),
            hsv("t240", 240.0, 0.6, 0.8),
        ];
        let palette = tetradic(&corpus[0], 4, &corpus).unwrap();
        let codes: Vec<&str> = palette.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["seed", "t60", "t180", "t240"]);
    }
}
