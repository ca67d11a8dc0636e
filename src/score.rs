use serde::Serialize;

use crate::config::{
    self, CROSS_SELL_BASELINE, CROSS_SELL_CEILING, SegmentRange,
};
use crate::types::{Segment, Tier};

/// The fifteen slider-style business inputs for a single entity.
/// Values are never rejected: anything out of range is clamped during
/// normalization, so extreme inputs still yield a score in [0,100].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreInputs {
    /// New-business volume, EUR per year.
    pub new_business: f64,
    /// In-force portfolio volume, EUR.
    pub backbook: f64,
    /// Margin, already a 0–100 percentage.
    pub margin: f64,
    /// Products per customer.
    pub cross_sell: f64,
    /// Claims/combined ratio, percent.
    pub claims_ratio: f64,
    /// Share of large claims, percent.
    pub large_claims_ratio: f64,
    /// Underwriting quality, 0–100.
    pub underwriting_quality: f64,
    /// Cancellation rate, percent per year.
    pub cancellation_rate: f64,
    /// Average contract duration, years.
    pub contract_duration: f64,
    /// Capacity utilization, 0–100.
    pub utilization: f64,
    /// Net promoter score, −100 to 100.
    pub nps: f64,
    /// Advisory quality, 0–100.
    pub advisory_quality: f64,
    /// Complaints per 1000 contracts.
    pub complaint_rate: f64,
    /// Contribution margin, EUR per year.
    pub contribution_margin: f64,
    /// Cost-to-income ratio, percent.
    pub cost_income_ratio: f64,
}

/// The five weighted sub-scores, each already clamped to [0,100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub performance: f64,
    pub risk: f64,
    pub stability: f64,
    pub customer: f64,
    pub profit: f64,
}

impl ScoreBreakdown {
    pub fn weighted_total(&self) -> f64 {
        self.performance * config::PERFORMANCE_WEIGHT
            + self.risk * config::RISK_WEIGHT
            + self.stability * config::STABILITY_WEIGHT
            + self.customer * config::CUSTOMER_WEIGHT
            + self.profit * config::PROFIT_WEIGHT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub breakdown: ScoreBreakdown,
    pub total: f64,
    pub tier: Tier,
}

fn clamp100(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

/// New business / back book / margin / cross-sell, averaged. Weight 0.20.
fn performance_score(inputs: &ScoreInputs) -> f64 {
    let new_business = clamp100(inputs.new_business / config::NEW_BUSINESS_CEILING * 100.0);
    let backbook = clamp100(inputs.backbook / config::BACKBOOK_CEILING * 100.0);
    let margin = clamp100(inputs.margin);
    let cross_sell = clamp100(
        (inputs.cross_sell - CROSS_SELL_BASELINE) / (CROSS_SELL_CEILING - CROSS_SELL_BASELINE)
            * 100.0,
    );
    clamp100((new_business + backbook + margin + cross_sell) / 4.0)
}

/// Claims-ratio position within the segment band.
/// ≤ min → 100; min..optimal → linear 100→90; optimal..max → linear 90→50;
/// beyond max → 50 − 2·(ratio − max), floored at 0.
pub(crate) fn claims_ratio_component(claims_ratio: f64, range: SegmentRange) -> f64 {
    if claims_ratio <= range.min {
        100.0
    } else if claims_ratio <= range.optimal {
        100.0 - 10.0 * (claims_ratio - range.min) / (range.optimal - range.min)
    } else if claims_ratio <= range.max {
        90.0 - 40.0 * (claims_ratio - range.optimal) / (range.max - range.optimal)
    } else {
        (50.0 - 2.0 * (claims_ratio - range.max)).max(0.0)
    }
}

/// Claims band position, large-claims penalty, underwriting quality,
/// averaged. Weight 0.40, the dominant sub-score.
fn risk_score(inputs: &ScoreInputs, range: SegmentRange) -> f64 {
    let claims = claims_ratio_component(inputs.claims_ratio, range);
    let large_claims = (100.0 - inputs.large_claims_ratio * 10.0).max(0.0);
    let underwriting = clamp100(inputs.underwriting_quality);
    clamp100((claims + large_claims + underwriting) / 3.0)
}

/// Cancellation penalty, contract duration, utilization, averaged. Weight 0.15.
fn stability_score(inputs: &ScoreInputs) -> f64 {
    let cancellation = (100.0 - inputs.cancellation_rate * 2.5).max(0.0);
    let duration = (inputs.contract_duration * 5.0).min(100.0);
    let utilization = clamp100(inputs.utilization);
    clamp100((cancellation + duration + utilization) / 3.0)
}

/// NPS rescaled from [−100,100], advisory quality, complaint penalty,
/// averaged. Weight 0.10.
fn customer_score(inputs: &ScoreInputs) -> f64 {
    let nps = clamp100((inputs.nps + 100.0) / 2.0);
    let advisory = clamp100(inputs.advisory_quality);
    let complaints = (100.0 - inputs.complaint_rate * 5.0).max(0.0);
    clamp100((nps + advisory + complaints) / 3.0)
}

/// Contribution margin against its ceiling and cost-income penalty,
/// averaged. Weight 0.15.
fn profit_score(inputs: &ScoreInputs) -> f64 {
    let contribution =
        clamp100(inputs.contribution_margin / config::CONTRIBUTION_MARGIN_CEILING * 100.0);
    let cost_income = (100.0 - (inputs.cost_income_ratio - 50.0)).max(0.0);
    clamp100((contribution + cost_income) / 2.0)
}

/// Map fifteen business inputs to five weighted sub-scores, a total score in
/// [0,100], and a tier. Pure and deterministic; the segment selects the
/// claims-ratio band (derived views fall back to the generic band).
pub fn compute_score(inputs: &ScoreInputs, segment: Segment) -> ScoreResult {
    let range = SegmentRange::for_segment(segment);
    let breakdown = ScoreBreakdown {
        performance: performance_score(inputs),
        risk: risk_score(inputs, range),
        stability: stability_score(inputs),
        customer: customer_score(inputs),
        profit: profit_score(inputs),
    };
    let total = breakdown.weighted_total().clamp(0.0, 100.0);
    ScoreResult { breakdown, total, tier: Tier::of(total) }
}
