use serde::Serialize;

/// Number of score bins in a population histogram. Bin index = integer score.
pub const NUM_BINS: usize = 100;

/// Broker/channel archetype. The four base segments carry their own
/// statistical profile; the last two are derived views produced by
/// element-wise summation of base distributions, never generated directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Segment {
    ExclusiveAgency,
    LargeBroker,
    SmallBroker,
    DealerChannel,
    /// Large + small brokers combined.
    BrokerCombined,
    /// Sum of all four base segments.
    All,
}

impl Segment {
    pub const BASE: [Segment; 4] = [
        Segment::ExclusiveAgency,
        Segment::LargeBroker,
        Segment::SmallBroker,
        Segment::DealerChannel,
    ];

    pub const ALL_VIEWS: [Segment; 6] = [
        Segment::ExclusiveAgency,
        Segment::LargeBroker,
        Segment::SmallBroker,
        Segment::DealerChannel,
        Segment::BrokerCombined,
        Segment::All,
    ];

    pub fn is_base(self) -> bool {
        !matches!(self, Segment::BrokerCombined | Segment::All)
    }

    /// Which base segments a derived view sums. Base segments return themselves.
    pub fn base_members(self) -> &'static [Segment] {
        match self {
            Segment::ExclusiveAgency => &[Segment::ExclusiveAgency],
            Segment::LargeBroker => &[Segment::LargeBroker],
            Segment::SmallBroker => &[Segment::SmallBroker],
            Segment::DealerChannel => &[Segment::DealerChannel],
            Segment::BrokerCombined => &[Segment::LargeBroker, Segment::SmallBroker],
            Segment::All => &Segment::BASE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Segment::ExclusiveAgency => "exclusive-agency",
            Segment::LargeBroker => "large-broker",
            Segment::SmallBroker => "small-broker",
            Segment::DealerChannel => "dealer-channel",
            Segment::BrokerCombined => "broker-combined",
            Segment::All => "all",
        }
    }

    pub fn parse(s: &str) -> Option<Segment> {
        Segment::ALL_VIEWS.into_iter().find(|seg| seg.as_str() == s)
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance tier. Boundaries are fixed constants: A ≥ 80, B ≥ 60, C ≥ 40,
/// D below. Never configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::A, Tier::B, Tier::C, Tier::D];

    pub fn of(score: f64) -> Tier {
        if score >= 80.0 {
            Tier::A
        } else if score >= 60.0 {
            Tier::B
        } else if score >= 40.0 {
            Tier::C
        } else {
            Tier::D
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity counts per tier, derived from a distribution by threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub a: u64,
    pub b: u64,
    pub c: u64,
    pub d: u64,
}

impl TierCounts {
    pub fn get(&self, tier: Tier) -> u64 {
        match tier {
            Tier::A => self.a,
            Tier::B => self.b,
            Tier::C => self.c,
            Tier::D => self.d,
        }
    }

    pub fn total(&self) -> u64 {
        self.a + self.b + self.c + self.d
    }
}

/// Population histogram: 100 ordered bins, index = score (0–99), value =
/// entity count at that score. Always exactly 100 bins; reshaping operations
/// (measure application) conserve the total, clamping only at the top bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Distribution {
    #[serde(serialize_with = "serialize_bins")]
    bins: [u32; NUM_BINS],
}

fn serialize_bins<S>(bins: &[u32; NUM_BINS], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(bins.iter())
}

impl Distribution {
    pub fn zero() -> Self {
        Distribution { bins: [0; NUM_BINS] }
    }

    pub fn from_bins(bins: [u32; NUM_BINS]) -> Self {
        Distribution { bins }
    }

    pub fn count(&self, bin: usize) -> u32 {
        self.bins[bin.min(NUM_BINS - 1)]
    }

    /// Add `n` entities at `bin`. Out-of-range indices clamp to the top bin
    /// rather than drop counts.
    pub fn add(&mut self, bin: usize, n: u32) {
        self.bins[bin.min(NUM_BINS - 1)] += n;
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Element-wise sum; used to build the derived segment views.
    pub fn merge(&mut self, other: &Distribution) {
        for (b, o) in self.bins.iter_mut().zip(other.bins.iter()) {
            *b += o;
        }
    }

    /// Count-weighted average score. Zero for an empty distribution.
    pub fn weighted_mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let sum: u64 = self.bins.iter().enumerate().map(|(s, &c)| s as u64 * c as u64).sum();
        sum as f64 / total as f64
    }

    pub fn tier_counts(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for (score, &c) in self.bins.iter().enumerate() {
            match Tier::of(score as f64) {
                Tier::A => counts.a += c as u64,
                Tier::B => counts.b += c as u64,
                Tier::C => counts.c += c as u64,
                Tier::D => counts.d += c as u64,
            }
        }
        counts
    }

    /// Scale the counts of `bins` by `factor`, flooring to integers.
    pub fn scale_bins(&mut self, bins: std::ops::Range<usize>, factor: f64) {
        for b in bins {
            if b < NUM_BINS {
                self.bins[b] = (self.bins[b] as f64 * factor).floor() as u32;
            }
        }
    }

    /// Bins with a non-zero count, as `(score, count)` pairs.
    pub fn filled(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.bins.iter().enumerate().filter(|&(_, &c)| c > 0).map(|(s, &c)| (s, c))
    }

    pub fn bins(&self) -> &[u32; NUM_BINS] {
        &self.bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Tier boundaries ───────────────────────────────────────────────────────

    #[test]
    fn tier_boundaries_are_exact() {
        assert_eq!(Tier::of(80.0), Tier::A);
        assert_eq!(Tier::of(79.999), Tier::B);
        assert_eq!(Tier::of(60.0), Tier::B);
        assert_eq!(Tier::of(59.999), Tier::C);
        assert_eq!(Tier::of(40.0), Tier::C);
        assert_eq!(Tier::of(39.999), Tier::D);
        assert_eq!(Tier::of(0.0), Tier::D);
        assert_eq!(Tier::of(100.0), Tier::A);
    }

    // ── Segment parsing ───────────────────────────────────────────────────────

    #[test]
    fn segment_parse_round_trips() {
        for seg in Segment::ALL_VIEWS {
            assert_eq!(Segment::parse(seg.as_str()), Some(seg));
        }
        assert_eq!(Segment::parse("no-such-segment"), None);
    }

    #[test]
    fn derived_views_have_expected_members() {
        assert_eq!(
            Segment::BrokerCombined.base_members(),
            &[Segment::LargeBroker, Segment::SmallBroker]
        );
        assert_eq!(Segment::All.base_members(), &Segment::BASE);
        assert!(!Segment::All.is_base());
        assert!(Segment::DealerChannel.is_base());
    }

    // ── Distribution ──────────────────────────────────────────────────────────

    #[test]
    fn add_clamps_out_of_range_bin_to_top() {
        let mut d = Distribution::zero();
        d.add(250, 3);
        assert_eq!(d.count(99), 3);
        assert_eq!(d.total(), 3);
    }

    #[test]
    fn merge_sums_elementwise() {
        let mut a = Distribution::zero();
        a.add(10, 5);
        a.add(50, 2);
        let mut b = Distribution::zero();
        b.add(10, 1);
        b.add(99, 4);
        a.merge(&b);
        assert_eq!(a.count(10), 6);
        assert_eq!(a.count(50), 2);
        assert_eq!(a.count(99), 4);
        assert_eq!(a.total(), 12);
    }

    #[test]
    fn weighted_mean_of_known_histogram() {
        let mut d = Distribution::zero();
        d.add(40, 1);
        d.add(60, 1);
        assert!((d.weighted_mean() - 50.0).abs() < 1e-12);
        assert_eq!(Distribution::zero().weighted_mean(), 0.0);
    }

    #[test]
    fn tier_counts_split_on_thresholds() {
        let mut d = Distribution::zero();
        d.add(79, 1); // B
        d.add(80, 2); // A
        d.add(59, 3); // C
        d.add(39, 4); // D
        let tc = d.tier_counts();
        assert_eq!((tc.a, tc.b, tc.c, tc.d), (2, 1, 3, 4));
        assert_eq!(tc.total(), 10);
        assert_eq!(tc.get(Tier::C), 3);
    }

    #[test]
    fn scale_bins_floors_counts() {
        let mut d = Distribution::zero();
        d.add(20, 10);
        d.add(21, 3);
        d.scale_bins(20..25, 0.7);
        assert_eq!(d.count(20), 7);
        assert_eq!(d.count(21), 2); // floor(2.1)
    }

    #[test]
    fn distribution_serializes_as_flat_array() {
        let mut d = Distribution::zero();
        d.add(0, 1);
        d.add(99, 2);
        let v = serde_json::to_value(&d).unwrap();
        let arr = v.as_array().expect("flat array");
        assert_eq!(arr.len(), NUM_BINS);
        assert_eq!(arr[0], 1);
        assert_eq!(arr[99], 2);
    }
}
