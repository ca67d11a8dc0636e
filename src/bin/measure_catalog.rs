use brisk::measures::MeasureCatalog;
use brisk::types::Tier;

fn main() {
    let catalog = MeasureCatalog::canonical();

    // Write NDJSON to stdout.
    for measure in catalog.all() {
        println!("{}", serde_json::to_string(measure).expect("serialisation failed"));
    }

    // Per-tier effect summary to stderr.
    eprintln!("measure_catalog: {} measures", catalog.all().len());
    for tier in Tier::ALL {
        let total: f64 = catalog.all().iter().map(|m| m.effects.for_tier(tier)).sum();
        let mean = total / catalog.all().len() as f64;
        let max = catalog
            .all()
            .iter()
            .map(|m| m.effects.for_tier(tier))
            .fold(f64::MIN, f64::max);
        eprintln!("  tier={tier}  total_delta={total:>5.1}  mean={mean:.2}  max={max:.1}");
    }
}
