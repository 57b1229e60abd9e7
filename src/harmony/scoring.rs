use crate::color::{hue_distance, Color};
use std::cmp::Ordering;

/// Desirability of `candidate` for a slot aimed at `target_hue`. Higher is better.
///
/// Rewards hue proximity, saturation close to the palette average (or
/// `target_saturation`), value separation from every existing member and
/// mid-range saturation; punishes near-grays.
pub fn score(
    candidate: &Color,
    target_hue: f64,
    existing: &[&Color],
    target_saturation: Option<f64>,
) -> f64 {
    let mut score = (1.0 - hue_distance(candidate.hue(), target_hue) / 180.0) * 30.0;

    if !existing.is_empty() {
        let avg_sat = target_saturation.unwrap_or_else(|| {
            existing.iter().map(|c| c.saturation()).sum::<f64>() / existing.len() as f64
        });
        let sat_diff = (candidate.saturation() - avg_sat).abs();
        score += (1.0 - (sat_diff * 2.0).min(1.0)) * 20.0;

        let min_value_diff = existing
            .iter()
            .map(|c| (candidate.value() - c.value()).abs())
            .fold(f64::INFINITY, f64::min);
        if min_value_diff > 0.1 {
            score += 25.0;
        } else if min_value_diff > 0.05 {
            score += 10.0;
        }
    }

    if candidate.saturation() < 0.1 {
        score -= 30.0;
    }
    if (0.3..=0.8).contains(&candidate.saturation()) {
        score += 10.0;
    }

    score
}

/// Descending by score; equal scores compare equal so a stable sort keeps input order.
pub(super) fn compare_scored(a: &(f64, &Color), b: &(f64, &Color)) -> Ordering {
    b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal)
}

/// The `count` best candidates by [`score`], or all of them when there are no more than `count`.
pub fn select_best<'a>(
    candidates: Vec<&'a Color>,
    target_hue: f64,
    count: usize,
    existing: &[&Color],
    target_saturation: Option<f64>,
) -> Vec<&'a Color> {
    if candidates.len() <= count {
        return candidates;
    }

    let mut scored: Vec<(f64, &'a Color)> = candidates
        .into_iter()
        .map(|c| (score(c, target_hue, existing, target_saturation), c))
        .collect();
    scored.sort_by(compare_scored);
    scored.into_iter().take(count).map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{hsv_to_hex, normalize_hue};

    fn hsv(code: &str, hue: f64, sat: f64, val: f64) -> Color {
        Color::new(code, code, hsv_to_hex(hue, sat, val)).unwrap()
    }

    // --- score ---

    #[test]
    fn test_score_hue_proximity_only_without_palette() {
        // sat 0.9 avoids both saturation adjustments
        let exact = hsv("exact", 90.0, 0.9, 0.8);
        let opposite = hsv("opp", 270.0, 0.9, 0.8);
        assert!((score(&exact, exact.hue(), &[], None) - 30.0).abs() < 1e-9);
        let opp = score(&opposite, normalize_hue(opposite.hue() + 180.0), &[], None);
        assert!(opp.abs() < 1e-9, "got {opp}");
    }

    #[test]
    fn test_score_penalizes_grays() {
        let gray = hsv("gray", 30.0, 0.05, 0.5);
        let vivid = hsv("vivid", 30.0, 0.5, 0.5);
        assert!(score(&gray, 30.0, &[], None) < score(&vivid, 30.0, &[], None));
        // 30 for hue, -30 for gray
        assert!(score(&gray, gray.hue(), &[], None).abs() < 1e-9);
    }

    #[test]
    fn test_score_rewards_value_contrast() {
        let seed = hsv("seed", 0.0, 0.5, 0.5);
        let flat = hsv("flat", 120.0, 0.5, 0.5);
        let bright = hsv("bright", 120.0, 0.5, 0.9);
        let existing = [&seed];
        let diff = score(&bright, 120.0, &existing, None) - score(&flat, 120.0, &existing, None);
        assert!((diff - 25.0).abs() < 0.5, "diff {diff}");
    }

    #[test]
    fn test_score_target_saturation_overrides_average() {
        let seed = hsv("seed", 0.0, 0.9, 0.5);
        let cand = hsv("cand", 10.0, 0.3, 0.9);
        let existing = [&seed];
        assert!(score(&cand, 10.0, &existing, Some(0.3)) > score(&cand, 10.0, &existing, None));
    }

    // --- select_best ---

    #[test]
    fn test_select_best_returns_all_when_few() {
        let a = hsv("a", 10.0, 0.5, 0.5);
        let b = hsv("b", 20.0, 0.5, 0.5);
        let picked = select_best(vec![&a, &b], 10.0, 2, &[], None);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_select_best_picks_highest_score() {
        let seed = hsv("seed", 200.0, 0.6, 0.5);
        let gray = hsv("gray", 20.0, 0.06, 0.5);
        let good = hsv("good", 22.0, 0.6, 0.9);
        let existing = [&seed];
        let picked = select_best(vec![&gray, &good], 20.0, 1, &existing, None);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].code, "good");
    }

    #[test]
    fn test_select_best_ties_keep_input_order() {
        let a = hsv("a", 50.0, 0.5, 0.5);
        let b = hsv("b", 50.0, 0.5, 0.5);
        let c = hsv("c", 50.0, 0.5, 0.5);
        let picked = select_best(vec![&a, &b, &c], 50.0, 2, &[], None);
        let codes: Vec<&str> = picked.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["a", "b"]);
    }

    #[test]
    fn test_select_best_subset_of_input() {
        let pool: Vec<Color> = (0..8)
            .map(|i| hsv(&format!("p{i}"), 40.0 + i as f64 * 3.0, 0.2 + i as f64 * 0.1, 0.6))
            .collect();
        let refs: Vec<&Color> = pool.iter().collect();
        let picked = select_best(refs.clone(), 45.0, 3, &[], None);
        assert!(picked.len() <= 3);
        assert!(picked.iter().all(|p| refs.iter().any(|r| r.code == p.code)));
    }
}
