use serde::Serialize;

use crate::types::{Distribution, NUM_BINS, Tier};

/// Score above which measure effects diminish toward the ceiling.
const DIMINISHING_THRESHOLD: f64 = 80.0;
/// No measure can push an entity past this score; the cap applies before
/// flooring into a bin.
const EFFECT_CEILING: f64 = 95.0;

/// Point deltas a measure grants to an entity currently in each tier.
/// Effects grow toward the weaker tiers; the diminishing-returns curve
/// near the ceiling shrinks them again for high scorers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierEffects {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl TierEffects {
    pub fn for_tier(&self, tier: Tier) -> f64 {
        match tier {
            Tier::A => self.a,
            Tier::B => self.b,
            Tier::C => self.c,
            Tier::D => self.d,
        }
    }
}

/// A named improvement action with a per-tier effect table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measure {
    pub name: &'static str,
    pub label: &'static str,
    pub effects: TierEffects,
}

/// The improvement measures shipped with the engine.
#[derive(Debug, Clone)]
pub struct MeasureCatalog {
    measures: Vec<Measure>,
}

impl MeasureCatalog {
    pub fn canonical() -> Self {
        MeasureCatalog {
            measures: vec![
                Measure {
                    name: "sales-training",
                    label: "Sales and advisory training",
                    effects: TierEffects { a: 2.0, b: 4.0, c: 6.0, d: 8.0 },
                },
                Measure {
                    name: "claims-management",
                    label: "Active claims management",
                    effects: TierEffects { a: 4.0, b: 6.0, c: 8.0, d: 10.0 },
                },
                Measure {
                    name: "process-optimization",
                    label: "Back-office process optimization",
                    effects: TierEffects { a: 3.0, b: 5.0, c: 6.0, d: 7.0 },
                },
                Measure {
                    name: "digital-tooling",
                    label: "Digital sales tooling rollout",
                    effects: TierEffects { a: 2.0, b: 3.0, c: 5.0, d: 6.0 },
                },
                Measure {
                    name: "cross-sell-campaign",
                    label: "Cross-selling campaign",
                    effects: TierEffects { a: 3.0, b: 4.0, c: 5.0, d: 5.0 },
                },
                Measure {
                    name: "portfolio-cleanup",
                    label: "Back-book portfolio cleanup",
                    effects: TierEffects { a: 1.0, b: 3.0, c: 6.0, d: 9.0 },
                },
            ],
        }
    }

    pub fn all(&self) -> &[Measure] {
        &self.measures
    }

    pub fn find(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    /// Resolve a set of measure names. Unrecognized names contribute nothing
    /// rather than failing.
    pub fn resolve<'a, I>(&self, names: I) -> Vec<&Measure>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().filter_map(|n| self.find(n)).collect()
    }
}

/// Effectiveness multiplier for an entity at `score`: full effect below 80,
/// then a linear decay toward the ceiling, floored at 0.3.
fn diminishing_factor(score: f64) -> f64 {
    if score < DIMINISHING_THRESHOLD {
        1.0
    } else {
        (1.0 - (score - DIMINISHING_THRESHOLD) / 20.0 * 0.7).max(0.3)
    }
}

/// Apply the selected measures to a population, producing the reshaped
/// histogram. For each non-empty bin: tier lookup, summed tier deltas,
/// diminishing-returns scaling at scores ≥ 80, destination
/// `clamp(floor(min(95, score + delta)), 0, 99)`; the full count moves.
/// Bins whose summed delta is zero (including an empty measure list) stay in
/// place, so the no-op is an exact identity. Total count is conserved.
pub fn apply_measures(original: &Distribution, measures: &[&Measure]) -> Distribution {
    let mut modified = Distribution::zero();

    for (score, count) in original.filled() {
        let tier = Tier::of(score as f64);
        let delta: f64 = measures.iter().map(|m| m.effects.for_tier(tier)).sum();

        if delta == 0.0 {
            modified.add(score, count);
            continue;
        }

        let scaled = delta * diminishing_factor(score as f64);
        let shifted = (score as f64 + scaled).min(EFFECT_CEILING);
        let destination = (shifted.floor().max(0.0) as usize).min(NUM_BINS - 1);
        modified.add(destination, count);
    }

    modified
}
