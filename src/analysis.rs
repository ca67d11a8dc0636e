use serde::Serialize;

use crate::stats::Stats;

/// Distribution statistics for a continuous metric across N independent runs.
#[derive(Debug, Clone, Serialize)]
pub struct DistStats {
    pub n: usize,
    pub min: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

fn percentile_stats(values: &mut Vec<f64>) -> Option<DistStats> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();

    let interp = |p: f64| -> f64 {
        let h = p * (n - 1) as f64;
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        let frac = h - lo as f64;
        values[lo] * (1.0 - frac) + values[hi] * frac
    };

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Some(DistStats {
        n,
        min: values[0],
        p5: interp(0.05),
        p25: interp(0.25),
        p50: interp(0.50),
        p75: interp(0.75),
        p95: interp(0.95),
        max: values[n - 1],
        mean,
        std_dev: variance.sqrt(),
    })
}

/// Cross-run distributions of the key aggregate KPIs.
#[derive(Debug, Clone, Serialize)]
pub struct RunDist {
    pub avg_score: DistStats,
    pub avg_claims_ratio: DistStats,
    pub avg_profit: DistStats,
    pub avg_cancellation: DistStats,
}

/// Summarize the spread of aggregate KPIs across independently seeded runs.
/// Fewer than 2 runs carry no distribution information and return `None`.
pub fn analyse_runs(runs: &[Stats]) -> Option<RunDist> {
    if runs.len() < 2 {
        return None;
    }

    let mut score_vals: Vec<f64> = runs.iter().map(|s| s.avg_score).collect();
    let mut claims_vals: Vec<f64> = runs.iter().map(|s| s.avg_claims_ratio).collect();
    let mut profit_vals: Vec<f64> = runs.iter().map(|s| s.avg_profit).collect();
    let mut cancel_vals: Vec<f64> = runs.iter().map(|s| s.avg_cancellation).collect();

    // All vecs share the runs' length (≥ 2), so unwrap is safe.
    Some(RunDist {
        avg_score: percentile_stats(&mut score_vals).unwrap(),
        avg_claims_ratio: percentile_stats(&mut claims_vals).unwrap(),
        avg_profit: percentile_stats(&mut profit_vals).unwrap(),
        avg_cancellation: percentile_stats(&mut cancel_vals).unwrap(),
    })
}
