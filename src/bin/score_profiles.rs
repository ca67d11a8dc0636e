use std::env;

use brisk::profiles::ArchetypeProfile;
use brisk::score::compute_score;

fn main() {
    let filter = env::args().nth(1);

    let profiles = match filter {
        Some(name) => match ArchetypeProfile::find(&name) {
            Some(p) => vec![p],
            None => {
                eprintln!("unknown archetype '{name}'; available:");
                for p in ArchetypeProfile::catalog() {
                    eprintln!("  {}", p.name);
                }
                std::process::exit(1);
            }
        },
        None => ArchetypeProfile::catalog(),
    };

    println!(
        "{:<26} | {:<18} | {:>5} | {:>5} | {:>5} | {:>5} | {:>5} | {:>6} | {:>4}",
        "Archetype", "Segment", "Perf", "Risk", "Stab", "Cust", "Prof", "Total", "Tier"
    );
    println!("{}", "-".repeat(100));

    for profile in &profiles {
        let result = compute_score(&profile.inputs, profile.segment);
        let b = result.breakdown;
        println!(
            "{:<26} | {:<18} | {:>5.1} | {:>5.1} | {:>5.1} | {:>5.1} | {:>5.1} | {:>6.2} | {:>4}",
            profile.name,
            profile.segment.to_string(),
            b.performance,
            b.risk,
            b.stability,
            b.customer,
            b.profit,
            result.total,
            result.tier,
        );
    }
}
