use proptest::prelude::*;

use brisk::measures::{Measure, MeasureCatalog, apply_measures};
use brisk::score::{ScoreInputs, compute_score};
use brisk::types::{Distribution, NUM_BINS, Segment};

fn arb_distribution() -> impl Strategy<Value = Distribution> {
    proptest::collection::vec(0u32..500, NUM_BINS).prop_map(|counts| {
        let mut bins = [0u32; NUM_BINS];
        bins.copy_from_slice(&counts);
        Distribution::from_bins(bins)
    })
}

fn arb_measure_selection() -> impl Strategy<Value = Vec<String>> {
    let names: Vec<String> = MeasureCatalog::canonical()
        .all()
        .iter()
        .map(|m| m.name.to_string())
        .collect();
    proptest::sample::subsequence(names, 0..=6)
}

fn arb_inputs() -> impl Strategy<Value = ScoreInputs> {
    (
        (
            -1e9..1e9f64,   // new_business
            -1e9..1e9f64,   // backbook
            -500.0..500.0,  // margin
            -10.0..50.0,    // cross_sell
            0.0..400.0,     // claims_ratio
        ),
        (
            0.0..100.0,     // large_claims_ratio
            -100.0..1000.0, // underwriting_quality
            0.0..100.0,     // cancellation_rate
            -10.0..100.0,   // contract_duration
            -100.0..1000.0, // utilization
        ),
        (
            -300.0..300.0,  // nps
            -100.0..1000.0, // advisory_quality
            0.0..100.0,     // complaint_rate
            -1e9..1e9f64,   // contribution_margin
            -100.0..500.0,  // cost_income_ratio
        ),
    )
        .prop_map(|(a, b, c)| ScoreInputs {
            new_business: a.0,
            backbook: a.1,
            margin: a.2,
            cross_sell: a.3,
            claims_ratio: a.4,
            large_claims_ratio: b.0,
            underwriting_quality: b.1,
            cancellation_rate: b.2,
            contract_duration: b.3,
            utilization: b.4,
            nps: c.0,
            advisory_quality: c.1,
            complaint_rate: c.2,
            contribution_margin: c.3,
            cost_income_ratio: c.4,
        })
}

proptest! {
    /// Measure application never creates or drops entities.
    #[test]
    fn measure_application_conserves_total(
        dist in arb_distribution(),
        names in arb_measure_selection(),
    ) {
        let catalog = MeasureCatalog::canonical();
        let selected: Vec<&Measure> =
            catalog.resolve(names.iter().map(String::as_str));
        let modified = apply_measures(&dist, &selected);
        prop_assert_eq!(modified.total(), dist.total());
    }

    /// The empty measure set is an exact element-wise identity.
    #[test]
    fn empty_measure_set_is_identity(dist in arb_distribution()) {
        let modified = apply_measures(&dist, &[]);
        prop_assert_eq!(modified, dist);
    }

    /// Positive tier deltas never lower the weighted mean of a population
    /// that sits at or below the effect ceiling (entities above bin 95 are
    /// pulled back to it by the capped shift formula, so they are excluded).
    #[test]
    fn catalog_measures_never_lower_the_mean_below_ceiling(
        dist in arb_distribution(),
        names in arb_measure_selection(),
    ) {
        let mut bins = *dist.bins();
        for bin in &mut bins[96..] {
            *bin = 0;
        }
        let dist = Distribution::from_bins(bins);

        let catalog = MeasureCatalog::canonical();
        let selected: Vec<&Measure> =
            catalog.resolve(names.iter().map(String::as_str));
        let modified = apply_measures(&dist, &selected);
        prop_assert!(modified.weighted_mean() >= dist.weighted_mean() - 1e-9);
    }

    /// Scores stay in [0,100] for arbitrary (even absurd) inputs, and the
    /// total is the weighted sub-score sum.
    #[test]
    fn score_bounds_hold_for_arbitrary_inputs(
        inputs in arb_inputs(),
        seg_idx in 0usize..Segment::ALL_VIEWS.len(),
    ) {
        let segment = Segment::ALL_VIEWS[seg_idx];
        let result = compute_score(&inputs, segment);

        prop_assert!((0.0..=100.0).contains(&result.total));
        let b = result.breakdown;
        for v in [b.performance, b.risk, b.stability, b.customer, b.profit] {
            prop_assert!((0.0..=100.0).contains(&v));
        }

        let weighted = b.performance * 0.20
            + b.risk * 0.40
            + b.stability * 0.15
            + b.customer * 0.10
            + b.profit * 0.15;
        prop_assert!((result.total - weighted.clamp(0.0, 100.0)).abs() < 1e-9);
    }
}
