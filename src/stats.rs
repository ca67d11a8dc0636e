use rand::Rng;
use rand_distr::{Distribution as _, Normal};
use serde::Serialize;

use crate::config::{GENERIC_RANGE, SegmentRange};
use crate::types::{Distribution, Segment, Tier, TierCounts};

/// Aggregate KPIs over a population distribution. Averages are per entity;
/// `avg_score` is the count-weighted bin average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: u64,
    pub avg_score: f64,
    pub avg_new_business: f64,
    pub avg_backbook: f64,
    pub avg_claims_ratio: f64,
    pub avg_profit: f64,
    pub avg_cancellation: f64,
    pub avg_cross_sell: f64,
    pub tier_counts: TierCounts,
}

impl Stats {
    /// The all-zero record returned for an empty distribution.
    pub fn zero() -> Self {
        Stats {
            total: 0,
            avg_score: 0.0,
            avg_new_business: 0.0,
            avg_backbook: 0.0,
            avg_claims_ratio: 0.0,
            avg_profit: 0.0,
            avg_cancellation: 0.0,
            avg_cross_sell: 0.0,
            tier_counts: TierCounts::default(),
        }
    }
}

/// Before/after pair produced when measures are active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub before: Stats,
    pub after: Stats,
}

// ── Per-individual estimators ────────────────────────────────────────────────
// Illustrative heuristics, not actuarial models: tier sets the base range,
// the segment scales volumes and selects the claims band and profit model.

/// Volume scale per segment. Derived views use a mix-representative factor.
fn volume_factor(segment: Option<Segment>) -> f64 {
    match segment {
        Some(Segment::ExclusiveAgency) => 1.0,
        Some(Segment::LargeBroker) => 2.2,
        Some(Segment::SmallBroker) => 0.35,
        Some(Segment::DealerChannel) => 0.15,
        Some(Segment::BrokerCombined) => 0.6,
        Some(Segment::All) => 0.55,
        None => 1.0,
    }
}

fn new_business_estimate(tier: Tier, factor: f64, rng: &mut impl Rng) -> f64 {
    let base = match tier {
        Tier::A => rng.random_range(1_200_000.0..2_000_000.0),
        Tier::B => rng.random_range(600_000.0..1_200_000.0),
        Tier::C => rng.random_range(250_000.0..600_000.0),
        Tier::D => rng.random_range(50_000.0..250_000.0),
    };
    base * factor
}

fn backbook_estimate(tier: Tier, factor: f64, rng: &mut impl Rng) -> f64 {
    let base = match tier {
        Tier::A => rng.random_range(5_500_000.0..9_000_000.0),
        Tier::B => rng.random_range(3_000_000.0..5_500_000.0),
        Tier::C => rng.random_range(1_200_000.0..3_000_000.0),
        Tier::D => rng.random_range(300_000.0..1_200_000.0),
    };
    base * factor
}

/// Claims ratio drawn around the segment band; the band defaults to the
/// generic range for derived views or an absent segment, never an error.
fn claims_ratio_estimate(tier: Tier, range: SegmentRange, rng: &mut impl Rng) -> f64 {
    let (center, spread) = match tier {
        Tier::A => ((range.min + range.optimal) / 2.0, 2.5),
        Tier::B => (range.optimal, 3.0),
        Tier::C => ((range.optimal + range.max) / 2.0, 3.5),
        Tier::D => (range.max + 5.0, 5.0),
    };
    let normal = Normal::new(center, spread).expect("invalid claims-ratio params");
    normal.sample(rng).max(0.0)
}

/// Profit per entity. The exclusive agency is a profit center (positive,
/// tier-scaled); broker and dealer channels run as cost centers (negative,
/// worsening by tier). Derived views and an absent segment use the
/// cost-center model, since broker entities dominate those populations.
fn profit_estimate(tier: Tier, segment: Option<Segment>, rng: &mut impl Rng) -> f64 {
    match segment {
        Some(Segment::ExclusiveAgency) => match tier {
            Tier::A => rng.random_range(80_000.0..150_000.0),
            Tier::B => rng.random_range(40_000.0..80_000.0),
            Tier::C => rng.random_range(10_000.0..40_000.0),
            Tier::D => rng.random_range(0.0..10_000.0),
        },
        _ => match tier {
            Tier::A => rng.random_range(-15_000.0..-5_000.0),
            Tier::B => rng.random_range(-30_000.0..-15_000.0),
            Tier::C => rng.random_range(-55_000.0..-30_000.0),
            Tier::D => rng.random_range(-90_000.0..-55_000.0),
        },
    }
}

fn cancellation_estimate(tier: Tier, rng: &mut impl Rng) -> f64 {
    match tier {
        Tier::A => rng.random_range(2.0..4.0),
        Tier::B => rng.random_range(4.0..7.0),
        Tier::C => rng.random_range(7.0..11.0),
        Tier::D => rng.random_range(11.0..18.0),
    }
}

fn cross_sell_estimate(tier: Tier, rng: &mut impl Rng) -> f64 {
    match tier {
        Tier::A => rng.random_range(2.5..3.5),
        Tier::B => rng.random_range(1.8..2.6),
        Tier::C => rng.random_range(1.3..1.9),
        Tier::D => rng.random_range(1.0..1.4),
    }
}

/// Estimate aggregate KPIs for a population by drawing per-individual
/// estimates and averaging. Stochastic: repeated calls with a fresh RNG
/// differ slightly; a seeded RNG reproduces results exactly. An empty
/// distribution returns the zero record.
pub fn aggregate(dist: &Distribution, segment: Option<Segment>, rng: &mut impl Rng) -> Stats {
    let total = dist.total();
    if total == 0 {
        return Stats::zero();
    }

    let factor = volume_factor(segment);
    let range = segment.map(SegmentRange::for_segment).unwrap_or(GENERIC_RANGE);

    let mut new_business = 0.0;
    let mut backbook = 0.0;
    let mut claims = 0.0;
    let mut profit = 0.0;
    let mut cancellation = 0.0;
    let mut cross_sell = 0.0;

    for (score, count) in dist.filled() {
        let tier = Tier::of(score as f64);
        for _ in 0..count {
            new_business += new_business_estimate(tier, factor, rng);
            backbook += backbook_estimate(tier, factor, rng);
            claims += claims_ratio_estimate(tier, range, rng);
            profit += profit_estimate(tier, segment, rng);
            cancellation += cancellation_estimate(tier, rng);
            cross_sell += cross_sell_estimate(tier, rng);
        }
    }

    let n = total as f64;
    Stats {
        total,
        avg_score: dist.weighted_mean(),
        avg_new_business: new_business / n,
        avg_backbook: backbook / n,
        avg_claims_ratio: claims / n,
        avg_profit: profit / n,
        avg_cancellation: cancellation / n,
        avg_cross_sell: cross_sell / n,
        tier_counts: dist.tier_counts(),
    }
}
