use crate::color::{hue_distance, Color};
use std::cmp::Ordering;

/// Colors below this saturation are treated as gray and never offered.
pub const DEFAULT_MIN_SATURATION: f64 = 0.05;
/// Candidates kept per hue query.
pub const DEFAULT_LIMIT: usize = 10;

/// Corpus colors within `tolerance` degrees of `target_hue`, nearest first.
///
/// Colors whose code appears in `exclude`, or whose saturation is below
/// `min_saturation`, are skipped. Equal distances keep corpus order.
pub fn find_by_hue_range<'a>(
    corpus: &'a [Color],
    target_hue: f64,
    tolerance: f64,
    exclude: &[&Color],
    min_saturation: f64,
    limit: usize,
) -> Vec<&'a Color> {
    let mut candidates: Vec<(f64, &'a Color)> = corpus
        .iter()
        .filter(|c| !exclude.iter().any(|e| e.code == c.code))
        .filter(|c| c.saturation() >= min_saturation)
        .map(|c| (hue_distance(c.hue(), target_hue), c))
        .filter(|(dist, _)| *dist <= tolerance)
        .collect();

    candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    candidates.into_iter().take(limit).map(|(_, c)| c).collect()
}

/// [`find_by_hue_range`] with the default saturation floor and limit.
pub fn candidates_near<'a>(
    corpus: &'a [Color],
    target_hue: f64,
    tolerance: f64,
    exclude: &[&Color],
) -> Vec<&'a Color> {
    find_by_hue_range(
        corpus,
        target_hue,
        tolerance,
        exclude,
        DEFAULT_MIN_SATURATION,
        DEFAULT_LIMIT,
    )
}
