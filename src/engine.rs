use std::collections::{BTreeSet, HashMap};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::generator;
use crate::measures::{self, MeasureCatalog};
use crate::stats::{self, ComparisonResult, Stats};
use crate::types::{Distribution, Segment};

/// Everything the presentation layer needs for the current selection:
/// the baseline population and its stats, plus the reshaped population and a
/// before/after comparison while measures are active.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentView {
    pub segment: Segment,
    pub baseline: Distribution,
    pub stats: Stats,
    pub modified: Option<Distribution>,
    pub comparison: Option<ComparisonResult>,
}

/// Owned selection state and cached baselines. Baselines are generated once
/// at construction and treated as immutable; modified distributions are
/// derived fresh on every snapshot and never cached. All randomness flows
/// through the engine's seeded RNG, so two engines built from the same
/// config produce identical baselines.
pub struct Engine {
    rng: ChaCha20Rng,
    baselines: HashMap<Segment, Distribution>,
    catalog: MeasureCatalog,
    segment: Segment,
    /// Selected measure names. BTreeSet keeps application order deterministic.
    measures: BTreeSet<String>,
}

impl Engine {
    pub fn from_config(config: EngineConfig) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
        let baselines = generator::baseline_distributions(&config.profiles, &mut rng);
        Engine {
            rng,
            baselines,
            catalog: MeasureCatalog::canonical(),
            segment: Segment::All,
            measures: BTreeSet::new(),
        }
    }

    /// Fresh-seeded engine for interactive sessions.
    pub fn from_entropy() -> Self {
        Engine::from_config(EngineConfig::with_seed(rand::random()))
    }

    pub fn catalog(&self) -> &MeasureCatalog {
        &self.catalog
    }

    pub fn selected_segment(&self) -> Segment {
        self.segment
    }

    pub fn selected_measures(&self) -> impl Iterator<Item = &str> {
        self.measures.iter().map(String::as_str)
    }

    pub fn measures_active(&self) -> bool {
        !self.measures.is_empty()
    }

    pub fn baseline(&self, segment: Segment) -> &Distribution {
        &self.baselines[&segment]
    }

    /// Switch the current segment. The baseline is cached; only derived
    /// outputs are recomputed on the next snapshot.
    pub fn select_segment(&mut self, segment: Segment) {
        self.segment = segment;
    }

    /// Toggle a measure by name; returns whether it is active afterwards.
    /// Unknown names are tracked too; they simply resolve to no effect.
    pub fn toggle_measure(&mut self, name: &str) -> bool {
        if self.measures.remove(name) {
            false
        } else {
            self.measures.insert(name.to_string());
            true
        }
    }

    pub fn set_measures<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measures = names.into_iter().map(Into::into).collect();
    }

    pub fn clear_measures(&mut self) {
        self.measures.clear();
    }

    /// Recompute the full view for the current selection. The modified
    /// distribution and comparison exist only while measures are selected;
    /// deactivating measures discards them.
    pub fn snapshot(&mut self) -> SegmentView {
        let segment = self.segment;
        let baseline = self.baselines[&segment].clone();
        let stats = stats::aggregate(&baseline, Some(segment), &mut self.rng);

        let (modified, comparison) = if self.measures.is_empty() {
            (None, None)
        } else {
            let selected = self.catalog.resolve(self.measures.iter().map(String::as_str));
            let modified = measures::apply_measures(&baseline, &selected);
            let after = stats::aggregate(&modified, Some(segment), &mut self.rng);
            let comparison = ComparisonResult { before: stats.clone(), after };
            (Some(modified), Some(comparison))
        };

        SegmentView { segment, baseline, stats, modified, comparison }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NUM_BINS;

    fn engine() -> Engine {
        Engine::from_config(EngineConfig::canonical())
    }

    // ── Baselines ─────────────────────────────────────────────────────────────

    #[test]
    fn same_config_produces_identical_baselines() {
        let a = engine();
        let b = engine();
        for seg in Segment::ALL_VIEWS {
            assert_eq!(a.baseline(seg), b.baseline(seg), "baseline mismatch for {seg}");
        }
    }

    #[test]
    fn all_view_sums_base_segments() {
        let e = engine();
        let base_total: u64 = Segment::BASE.iter().map(|s| e.baseline(*s).total()).sum();
        assert_eq!(e.baseline(Segment::All).total(), base_total);
    }

    // ── Selection state ───────────────────────────────────────────────────────

    #[test]
    fn select_segment_updates_snapshot() {
        let mut e = engine();
        e.select_segment(Segment::DealerChannel);
        let view = e.snapshot();
        assert_eq!(view.segment, Segment::DealerChannel);
        assert_eq!(&view.baseline, e.baseline(Segment::DealerChannel));
    }

    #[test]
    fn toggle_measure_flips_state() {
        let mut e = engine();
        assert!(e.toggle_measure("sales-training"));
        assert!(e.measures_active());
        assert!(!e.toggle_measure("sales-training"));
        assert!(!e.measures_active());
    }

    #[test]
    fn set_measures_replaces_selection() {
        let mut e = engine();
        e.set_measures(["sales-training", "digital-tooling"]);
        let selected: Vec<&str> = e.selected_measures().collect();
        assert_eq!(selected, vec!["digital-tooling", "sales-training"]); // BTreeSet order
        e.set_measures(["portfolio-cleanup"]);
        assert_eq!(e.selected_measures().count(), 1);
    }

    // ── Snapshot semantics ────────────────────────────────────────────────────

    #[test]
    fn snapshot_without_measures_has_no_comparison() {
        let mut e = engine();
        let view = e.snapshot();
        assert!(view.modified.is_none());
        assert!(view.comparison.is_none());
    }

    #[test]
    fn snapshot_with_measures_conserves_population() {
        let mut e = engine();
        e.select_segment(Segment::SmallBroker);
        e.set_measures(["claims-management", "sales-training"]);
        let view = e.snapshot();
        let modified = view.modified.expect("modified distribution expected");
        assert_eq!(modified.total(), view.baseline.total());
    }

    #[test]
    fn snapshot_comparison_before_matches_baseline_stats() {
        let mut e = engine();
        e.set_measures(["claims-management"]);
        let view = e.snapshot();
        let cmp = view.comparison.expect("comparison expected");
        assert_eq!(cmp.before, view.stats);
        assert_eq!(cmp.after.total, view.stats.total);
    }

    #[test]
    fn measures_shift_population_upward() {
        let mut e = engine();
        e.select_segment(Segment::DealerChannel);
        e.set_measures(["claims-management", "sales-training", "portfolio-cleanup"]);
        let view = e.snapshot();
        let modified = view.modified.expect("modified distribution expected");
        assert!(
            modified.weighted_mean() > view.baseline.weighted_mean(),
            "positive deltas must raise the average score"
        );
    }

    #[test]
    fn deactivating_measures_discards_modified_state() {
        let mut e = engine();
        e.set_measures(["claims-management"]);
        let with = e.snapshot();
        assert!(with.modified.is_some());

        e.clear_measures();
        let without = e.snapshot();
        assert!(without.modified.is_none());
        assert!(without.comparison.is_none());
        // The baseline itself must be untouched by the previous application.
        assert_eq!(with.baseline, without.baseline);
    }

    #[test]
    fn unknown_measure_selection_is_harmless() {
        let mut e = engine();
        e.set_measures(["definitely-not-a-measure"]);
        let view = e.snapshot();
        let modified = view.modified.expect("selection active → modified present");
        for bin in 0..NUM_BINS {
            assert_eq!(modified.count(bin), view.baseline.count(bin));
        }
    }

    #[test]
    fn baseline_not_regenerated_between_snapshots() {
        let mut e = engine();
        let first = e.snapshot();
        let second = e.snapshot();
        assert_eq!(first.baseline, second.baseline);
        // Stochastic aggregation differs call to call; the histogram may not.
        assert_eq!(first.stats.total, second.stats.total);
    }
}
