use crate::region::{FirmRecord, Region};
use crate::scoring::{
    calculate_buyer_score, calculate_growth_score, estimate_valuation, CohortMaxima,
    ScoreResult, ScoringConfig, Valuation,
};
use std::cmp::Ordering;

/// A region paired with its score.
#[derive(Debug, Clone)]
pub struct RankedRegion {
    pub region: Region,
    pub result: ScoreResult,
}

/// Score every region by growth and sort best first.
pub fn rank_by_growth(regions: Vec<Region>, scoring: &ScoringConfig) -> Vec<RankedRegion> {
    let config = scoring.growth_or_default();
    let ranked = regions
        .into_iter()
        .map(|region| {
            let result = calculate_growth_score(&region.metrics, &config);
            RankedRegion { region, result }
        })
        .collect();
    sort_ranked(ranked)
}

/// Score every region by buyer fit against the whole input set and sort best first.
pub fn rank_by_buyer_fit(regions: Vec<Region>, scoring: &ScoringConfig) -> Vec<RankedRegion> {
    let config = scoring.buyer_or_default();
    let maxima = CohortMaxima::from_regions(&regions);
    tracing::debug!(?maxima, cohort = regions.len(), "computed cohort maxima");

    let ranked = regions
        .into_iter()
        .map(|region| {
            let result = calculate_buyer_score(&region.metrics, &maxima, &config);
            RankedRegion { region, result }
        })
        .collect();
    sort_ranked(ranked)
}

/// Sort by score descending, then by key ascending for ties.
fn sort_ranked(mut ranked: Vec<RankedRegion>) -> Vec<RankedRegion> {
    ranked.sort_by(|a, b| {
        let score_cmp = b
            .result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(Ordering::Equal);
        if score_cmp != Ordering::Equal {
            return score_cmp;
        }
        a.region.key.cmp(&b.region.key)
    });

    let incomplete = ranked.iter().filter(|r| r.result.incomplete).count();
    if incomplete > 0 {
        tracing::debug!(incomplete, "regions scored with missing metrics");
    }
    ranked
}

/// Value every firm and sort by estimated value, highest first.
pub fn value_firms(firms: Vec<FirmRecord>, scoring: &ScoringConfig) -> Vec<(FirmRecord, Valuation)> {
    let config = scoring.valuation_or_default();
    let mut valued: Vec<_> = firms
        .into_iter()
        .map(|firm| {
            let valuation = estimate_valuation(&firm.valuation_input(), &config);
            (firm, valuation)
        })
        .collect();

    valued.sort_by(|a, b| {
        b.1.value
            .partial_cmp(&a.1.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.name.cmp(&b.0.name))
    });
    valued
}
