use serde::Serialize;

use crate::score::ScoreInputs;
use crate::types::Segment;

/// A named preset that populates all fifteen score inputs at once.
#[derive(Debug, Clone, Serialize)]
pub struct ArchetypeProfile {
    pub name: &'static str,
    pub label: &'static str,
    pub segment: Segment,
    pub inputs: ScoreInputs,
}

impl ArchetypeProfile {
    /// The shipped archetypes, one per base segment, spanning the tier range.
    pub fn catalog() -> Vec<ArchetypeProfile> {
        vec![
            ArchetypeProfile {
                name: "top-exclusive-agency",
                label: "Top-performing exclusive agency",
                segment: Segment::ExclusiveAgency,
                inputs: ScoreInputs {
                    new_business: 1_800_000.0,
                    backbook: 7_500_000.0,
                    margin: 28.0,
                    cross_sell: 2.8,
                    claims_ratio: 82.0,
                    large_claims_ratio: 2.0,
                    underwriting_quality: 85.0,
                    cancellation_rate: 3.0,
                    contract_duration: 12.0,
                    utilization: 75.0,
                    nps: 85.0,
                    advisory_quality: 90.0,
                    complaint_rate: 1.5,
                    contribution_margin: 450_000.0,
                    cost_income_ratio: 65.0,
                },
            },
            ArchetypeProfile {
                name: "established-large-broker",
                label: "Established large broker",
                segment: Segment::LargeBroker,
                inputs: ScoreInputs {
                    new_business: 900_000.0,
                    backbook: 4_500_000.0,
                    margin: 22.0,
                    cross_sell: 2.2,
                    claims_ratio: 91.0,
                    large_claims_ratio: 4.0,
                    underwriting_quality: 70.0,
                    cancellation_rate: 6.0,
                    contract_duration: 9.0,
                    utilization: 68.0,
                    nps: 35.0,
                    advisory_quality: 72.0,
                    complaint_rate: 4.0,
                    contribution_margin: 280_000.0,
                    cost_income_ratio: 78.0,
                },
            },
            ArchetypeProfile {
                name: "struggling-small-broker",
                label: "Struggling small broker",
                segment: Segment::SmallBroker,
                inputs: ScoreInputs {
                    new_business: 300_000.0,
                    backbook: 1_500_000.0,
                    margin: 15.0,
                    cross_sell: 1.5,
                    claims_ratio: 103.0,
                    large_claims_ratio: 7.0,
                    underwriting_quality: 55.0,
                    cancellation_rate: 12.0,
                    contract_duration: 6.0,
                    utilization: 55.0,
                    nps: 0.0,
                    advisory_quality: 58.0,
                    complaint_rate: 9.0,
                    contribution_margin: 120_000.0,
                    cost_income_ratio: 92.0,
                },
            },
            ArchetypeProfile {
                name: "dealer-channel-startup",
                label: "Dealer-channel startup",
                segment: Segment::DealerChannel,
                inputs: ScoreInputs {
                    new_business: 120_000.0,
                    backbook: 400_000.0,
                    margin: 10.0,
                    cross_sell: 1.2,
                    claims_ratio: 118.0,
                    large_claims_ratio: 9.0,
                    underwriting_quality: 45.0,
                    cancellation_rate: 18.0,
                    contract_duration: 3.0,
                    utilization: 45.0,
                    nps: -20.0,
                    advisory_quality: 50.0,
                    complaint_rate: 12.0,
                    contribution_margin: 40_000.0,
                    cost_income_ratio: 105.0,
                },
            },
        ]
    }

    pub fn find(name: &str) -> Option<ArchetypeProfile> {
        ArchetypeProfile::catalog().into_iter().find(|p| p.name == name)
    }
}
