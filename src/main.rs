use std::fs::File;
use std::io::{BufWriter, Write};

use brisk::analysis::{self, DistStats};
use brisk::config::EngineConfig;
use brisk::engine::{Engine, SegmentView};
use brisk::stats::Stats;
use brisk::types::Segment;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut seed_override: Option<u64> = None;
    let mut segment = Segment::All;
    let mut measure_names: Vec<String> = Vec::new();
    let mut runs: Option<u64> = None;
    let mut output_path: Option<String> = None;
    let mut csv_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed_override = Some(args[i].parse().expect("--seed requires a u64"));
            }
            "--segment" => {
                i += 1;
                segment = Segment::parse(&args[i])
                    .unwrap_or_else(|| panic!("unknown segment '{}'", args[i]));
            }
            "--measures" => {
                i += 1;
                measure_names = args[i].split(',').map(str::to_string).collect();
            }
            "--runs" => {
                i += 1;
                runs = Some(args[i].parse().expect("--runs requires a positive integer"));
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--csv" => {
                i += 1;
                csv_path = Some(args[i].clone());
            }
            "--quiet" => quiet = true,
            _ => {}
        }
        i += 1;
    }

    let base_config = EngineConfig::canonical();
    let start_seed = seed_override.unwrap_or(base_config.seed);

    if let Some(n) = runs {
        use rayon::prelude::*;

        let all_stats: Vec<Stats> = (0u64..n)
            .into_par_iter()
            .map(|i| {
                let mut engine = Engine::from_config(EngineConfig::with_seed(start_seed + i));
                engine.select_segment(segment);
                engine.set_measures(measure_names.iter().cloned());
                let view = engine.snapshot();
                // The after-stats are the run result when measures are active.
                match view.comparison {
                    Some(cmp) => cmp.after,
                    None => view.stats,
                }
            })
            .collect();

        if let Some(ref path) = csv_path {
            write_runs_csv(&all_stats, start_seed, path);
        }

        if !quiet {
            print_run_rows(&all_stats, start_seed, segment);
            match analysis::analyse_runs(&all_stats) {
                Some(dist) => print_run_distributions(&dist, n, segment),
                None => eprintln!("Warning: distribution requires >= 2 runs"),
            }
        }
    } else {
        let mut engine = Engine::from_config(EngineConfig::with_seed(start_seed));
        engine.set_measures(measure_names.iter().cloned());

        let views: Vec<SegmentView> = Segment::ALL_VIEWS
            .into_iter()
            .map(|seg| {
                engine.select_segment(seg);
                engine.snapshot()
            })
            .collect();

        if let Some(ref path) = output_path {
            let file = File::create(path).expect("failed to create output file");
            let mut writer = BufWriter::new(file);
            for view in &views {
                serde_json::to_writer(&mut writer, view).expect("failed to serialize view");
                writeln!(writer).expect("failed to write newline");
            }
            if !quiet {
                println!("{} segment views → {path}", views.len());
            }
        }

        if !quiet {
            print_segment_table(&views);
            if let Some(view) = views.iter().find(|v| v.segment == segment) {
                print_selected_detail(view, &measure_names);
            }
        }
    }
}

fn print_segment_table(views: &[SegmentView]) {
    println!("\n=== Segment overview (seeded baselines) ===");
    println!(
        "{:<18} | {:>7} | {:>6} | {:>9} | {:>9} | {:>7} | {:>6} | {:>5} | {:>5} | {:>5} | {:>5}",
        "Segment", "Total", "Score", "NewBus(k)", "Profit(k)", "Claims%", "Canc%", "A", "B", "C", "D"
    );
    println!("{}", "-".repeat(110));
    for view in views {
        let s = &view.stats;
        println!(
            "{:<18} | {:>7} | {:>6.1} | {:>9.0} | {:>9.1} | {:>6.1}% | {:>5.1}% | {:>5} | {:>5} | {:>5} | {:>5}",
            view.segment.to_string(),
            s.total,
            s.avg_score,
            s.avg_new_business / 1_000.0,
            s.avg_profit / 1_000.0,
            s.avg_claims_ratio,
            s.avg_cancellation,
            s.tier_counts.a,
            s.tier_counts.b,
            s.tier_counts.c,
            s.tier_counts.d,
        );
    }
}

fn print_selected_detail(view: &SegmentView, measure_names: &[String]) {
    let Some(cmp) = &view.comparison else {
        return;
    };

    println!("\n=== Measure impact on {} ({}) ===", view.segment, measure_names.join(", "));
    println!("{:<16} | {:>12} | {:>12} | {:>10}", "Metric", "Before", "After", "Delta");
    println!("{}", "-".repeat(58));

    let rows: [(&str, f64, f64); 6] = [
        ("Avg score", cmp.before.avg_score, cmp.after.avg_score),
        ("New business", cmp.before.avg_new_business, cmp.after.avg_new_business),
        ("Back book", cmp.before.avg_backbook, cmp.after.avg_backbook),
        ("Claims ratio", cmp.before.avg_claims_ratio, cmp.after.avg_claims_ratio),
        ("Profit", cmp.before.avg_profit, cmp.after.avg_profit),
        ("Cancellation", cmp.before.avg_cancellation, cmp.after.avg_cancellation),
    ];

    for (name, before, after) in rows {
        println!(
            "{:<16} | {:>12.2} | {:>12.2} | {:>+10.2}",
            name,
            before,
            after,
            after - before
        );
    }

    println!(
        "Tiers before: A={} B={} C={} D={}",
        cmp.before.tier_counts.a,
        cmp.before.tier_counts.b,
        cmp.before.tier_counts.c,
        cmp.before.tier_counts.d
    );
    println!(
        "Tiers after:  A={} B={} C={} D={}",
        cmp.after.tier_counts.a,
        cmp.after.tier_counts.b,
        cmp.after.tier_counts.c,
        cmp.after.tier_counts.d
    );
}

fn print_run_rows(all_stats: &[Stats], start_seed: u64, segment: Segment) {
    println!("\n=== Per-run aggregates ({segment}) ===");
    println!(
        "{:>6} | {:>6} | {:>9} | {:>9} | {:>7} | {:>6}",
        "Seed", "Score", "NewBus(k)", "Profit(k)", "Claims%", "Canc%"
    );
    println!("{}", "-".repeat(56));
    for (i, s) in all_stats.iter().enumerate() {
        println!(
            "{:>6} | {:>6.1} | {:>9.0} | {:>9.1} | {:>6.1}% | {:>5.1}%",
            start_seed + i as u64,
            s.avg_score,
            s.avg_new_business / 1_000.0,
            s.avg_profit / 1_000.0,
            s.avg_claims_ratio,
            s.avg_cancellation,
        );
    }
}

fn print_dist_row(name: &str, d: &DistStats, scale: f64) {
    println!(
        "{:<14} | {:>8.2} | {:>8.2} | {:>8.2} | {:>8.2} | {:>8.2} | {:>8.2} | {:>8.2} | {:>8.3}",
        name,
        d.min * scale,
        d.p5 * scale,
        d.p25 * scale,
        d.p50 * scale,
        d.p75 * scale,
        d.p95 * scale,
        d.max * scale,
        d.std_dev * scale,
    );
}

fn print_run_distributions(dist: &analysis::RunDist, n_runs: u64, segment: Segment) {
    println!("\n=== Cross-run distribution ({segment}, N={n_runs}) ===");
    println!(
        "{:<14} | {:>8} | {:>8} | {:>8} | {:>8} | {:>8} | {:>8} | {:>8} | {:>8}",
        "Metric", "min", "p5", "p25", "p50", "p75", "p95", "max", "stddev"
    );
    println!("{}", "-".repeat(108));
    print_dist_row("Avg score", &dist.avg_score, 1.0);
    print_dist_row("Claims %", &dist.avg_claims_ratio, 1.0);
    print_dist_row("Profit (k)", &dist.avg_profit, 0.001);
    print_dist_row("Canc %", &dist.avg_cancellation, 1.0);
}

fn write_runs_csv(all_stats: &[Stats], start_seed: u64, path: &str) {
    let file = File::create(path).unwrap_or_else(|e| panic!("failed to create {path}: {e}"));
    let mut w = BufWriter::new(file);
    writeln!(
        w,
        "seed,total,avg_score,avg_new_business,avg_backbook,avg_claims_ratio,avg_profit,avg_cancellation,avg_cross_sell,tier_a,tier_b,tier_c,tier_d"
    )
    .expect("write");
    for (i, s) in all_stats.iter().enumerate() {
        writeln!(
            w,
            "{},{},{:.4},{:.2},{:.2},{:.4},{:.2},{:.4},{:.4},{},{},{},{}",
            start_seed + i as u64,
            s.total,
            s.avg_score,
            s.avg_new_business,
            s.avg_backbook,
            s.avg_claims_ratio,
            s.avg_profit,
            s.avg_cancellation,
            s.avg_cross_sell,
            s.tier_counts.a,
            s.tier_counts.b,
            s.tier_counts.c,
            s.tier_counts.d,
        )
        .expect("write");
    }
}
