use serde::Serialize;

use crate::types::Segment;

// ── Sub-score weights ────────────────────────────────────────────────────────
// Risk dominates: it alone can swing the tier outcome more than any other
// sub-score. The five weights sum to 1.0.

pub const PERFORMANCE_WEIGHT: f64 = 0.20;
pub const RISK_WEIGHT: f64 = 0.40;
pub const STABILITY_WEIGHT: f64 = 0.15;
pub const CUSTOMER_WEIGHT: f64 = 0.10;
pub const PROFIT_WEIGHT: f64 = 0.15;

// ── Normalization reference ceilings ─────────────────────────────────────────
// Volumes at or above the ceiling score 100. All monetary values in EUR.

pub const NEW_BUSINESS_CEILING: f64 = 2_000_000.0;
pub const BACKBOOK_CEILING: f64 = 8_000_000.0;
pub const CONTRIBUTION_MARGIN_CEILING: f64 = 500_000.0;

/// Cross-sell ratio of 1.0 (single product per customer) scores 0.
pub const CROSS_SELL_BASELINE: f64 = 1.0;
/// Cross-sell ratio at or above 5.0 scores 100.
pub const CROSS_SELL_CEILING: f64 = 5.0;

/// Acceptable claims/combined-ratio band for a segment. Used by the risk
/// sub-score and the per-tier claims-ratio estimators. Lower is better:
/// at or below `min` the risk component is 100, at `optimal` it is 90,
/// at `max` it is 50, beyond that it decays toward 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentRange {
    pub min: f64,
    pub optimal: f64,
    pub max: f64,
}

/// Fallback band for derived views and anything without its own calibration.
/// An unknown segment gets this generic tier-based estimate, never an error.
pub const GENERIC_RANGE: SegmentRange = SegmentRange { min: 85.0, optimal: 95.0, max: 105.0 };

impl SegmentRange {
    pub fn for_segment(segment: Segment) -> SegmentRange {
        match segment {
            Segment::ExclusiveAgency => SegmentRange { min: 75.0, optimal: 85.0, max: 95.0 },
            Segment::LargeBroker => SegmentRange { min: 80.0, optimal: 90.0, max: 100.0 },
            Segment::SmallBroker => SegmentRange { min: 85.0, optimal: 95.0, max: 105.0 },
            Segment::DealerChannel => SegmentRange { min: 100.0, optimal: 107.0, max: 115.0 },
            Segment::BrokerCombined | Segment::All => GENERIC_RANGE,
        }
    }
}

/// Generation parameters for one base segment's synthetic population.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SegmentProfile {
    pub segment: Segment,
    pub population: u32,
    pub mean: f64,
    pub std_dev: f64,
}

impl SegmentProfile {
    /// The four base-segment populations generated at initialization.
    /// Derived views are summed from these, never generated independently.
    pub fn canonical() -> [SegmentProfile; 4] {
        [
            SegmentProfile {
                segment: Segment::ExclusiveAgency,
                population: 500,
                mean: 78.0,
                std_dev: 7.0,
            },
            SegmentProfile {
                segment: Segment::LargeBroker,
                population: 2_000,
                mean: 62.0,
                std_dev: 10.0,
            },
            SegmentProfile {
                segment: Segment::SmallBroker,
                population: 11_800,
                mean: 52.0,
                std_dev: 12.0,
            },
            SegmentProfile {
                segment: Segment::DealerChannel,
                population: 100,
                mean: 35.0,
                std_dev: 13.0,
            },
        ]
    }
}

/// Top-level engine configuration: the RNG seed plus the per-segment
/// generation profiles. Tests pin a seed; interactive sessions normally use
/// a fresh one.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub seed: u64,
    pub profiles: Vec<SegmentProfile>,
}

impl EngineConfig {
    pub fn canonical() -> Self {
        EngineConfig { seed: 42, profiles: SegmentProfile::canonical().to_vec() }
    }

    pub fn with_seed(seed: u64) -> Self {
        EngineConfig { seed, ..EngineConfig::canonical() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = PERFORMANCE_WEIGHT + RISK_WEIGHT + STABILITY_WEIGHT + CUSTOMER_WEIGHT
            + PROFIT_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn segment_ranges_are_ordered() {
        for seg in Segment::ALL_VIEWS {
            let r = SegmentRange::for_segment(seg);
            assert!(r.min < r.optimal, "{seg}: min must be below optimal");
            assert!(r.optimal < r.max, "{seg}: optimal must be below max");
        }
    }

    #[test]
    fn derived_views_fall_back_to_generic_range() {
        assert_eq!(SegmentRange::for_segment(Segment::BrokerCombined), GENERIC_RANGE);
        assert_eq!(SegmentRange::for_segment(Segment::All), GENERIC_RANGE);
    }

    #[test]
    fn canonical_profiles_cover_all_base_segments() {
        let profiles = SegmentProfile::canonical();
        let segments: Vec<Segment> = profiles.iter().map(|p| p.segment).collect();
        assert_eq!(segments, Segment::BASE.to_vec());
    }

    #[test]
    fn canonical_populations_match_calibration() {
        let total: u32 = SegmentProfile::canonical().iter().map(|p| p.population).sum();
        assert_eq!(total, 14_400);
    }

    #[test]
    fn dealer_channel_band_checkpoints() {
        let r = SegmentRange::for_segment(Segment::DealerChannel);
        assert_eq!((r.min, r.optimal, r.max), (100.0, 107.0, 115.0));
    }
}
