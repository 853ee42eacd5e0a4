use super::clamp_score;
use super::config::DomainWeights;

/// Weighted blend of the three domain scores, rounded to the nearest point.
pub fn aggregate_scores(
    safeguarding: u8,
    overseas: u8,
    income: u8,
    weights: &DomainWeights,
) -> u8 {
    let weighted = weights.safeguarding * f64::from(safeguarding)
        + weights.overseas * f64::from(overseas)
        + weights.income * f64::from(income);

    if !weighted.is_finite() {
        return 0;
    }
    clamp_score(weighted.round() as i64)
}
