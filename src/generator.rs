use std::collections::HashMap;

use rand::Rng;

use crate::config::SegmentProfile;
use crate::types::{Distribution, NUM_BINS, Segment};

/// Probability that a drawn score receives an extra uniform offset in
/// [−10, +10] to emulate outliers.
const OUTLIER_PROBABILITY: f64 = 0.05;

/// Below this mean a segment counts as high-risk and gets the empirical
/// shaping pass applied after generation.
const SHAPING_MEAN_THRESHOLD: f64 = 60.0;

/// One standard-normal draw via the Box–Muller transform:
/// two independent uniform draws → one normal draw.
fn standard_normal(rng: &mut impl Rng) -> f64 {
    // 1 − u keeps the argument of ln strictly positive.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Synthesize a population histogram of `total` entities with scores drawn
/// from N(mean, std_dev²).
///
/// Each entity: draw via Box–Muller; with 5% probability perturb by a
/// uniform offset in [−10, +10]; re-draw (never bin) while the candidate
/// lies outside [0,100]; floor and clamp into an integer bin 0–99.
///
/// For `mean < 60` a shaping pass then scales bins [20,25) by 0.7 and bins
/// [15,20) by 1.1 (integer floor both), mimicking the valley/cluster
/// pattern observed in low-performing populations. The pass is reproduced
/// exactly; it may change the generated total, which only the measure
/// engine is required to conserve.
pub fn generate(total: u32, mean: f64, std_dev: f64, rng: &mut impl Rng) -> Distribution {
    let mut dist = Distribution::zero();

    for _ in 0..total {
        let score = loop {
            let mut candidate = mean + standard_normal(rng) * std_dev;
            if rng.random_bool(OUTLIER_PROBABILITY) {
                candidate += rng.random_range(-10.0..10.0);
            }
            if (0.0..=100.0).contains(&candidate) {
                break candidate;
            }
        };
        let bin = (score.floor() as usize).min(NUM_BINS - 1);
        dist.add(bin, 1);
    }

    if mean < SHAPING_MEAN_THRESHOLD {
        dist.scale_bins(20..25, 0.7);
        dist.scale_bins(15..20, 1.1);
    }

    dist
}

/// Generate every base-segment baseline once and derive the two aggregate
/// views by element-wise summation. Profiles are drawn in slice order, so a
/// fixed seed reproduces the exact same baselines.
pub fn baseline_distributions(
    profiles: &[SegmentProfile],
    rng: &mut impl Rng,
) -> HashMap<Segment, Distribution> {
    let mut baselines: HashMap<Segment, Distribution> = HashMap::new();

    for profile in profiles {
        let dist = generate(profile.population, profile.mean, profile.std_dev, rng);
        baselines.insert(profile.segment, dist);
    }

    for view in [Segment::BrokerCombined, Segment::All] {
        let mut merged = Distribution::zero();
        for member in view.base_members() {
            if let Some(dist) = baselines.get(member) {
                merged.merge(dist);
            }
        }
        baselines.insert(view, merged);
    }

    baselines
}
