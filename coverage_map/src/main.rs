// An example of how to use the `coverage_map` library.
//
// Builds a synthetic 5x5 map whose only legend color sits one pixel away from the
// query point, resolves it alongside one national game, and prints the ordered
// result as JSON. `COVERAGE_*` variables override the query; `RUST_LOG` sets verbosity.

use coverage_map::{
    BatchConfig, BatchOrchestrator, ColorKey, EventRecord, Legend, MapEntry, Point, RasterGrid,
};
use log::info;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("Coverage Map Engine - Example Runner");

    let config = BatchConfig::from_env(BatchConfig::with_query(Point::new(2, 3)))?;

    let region = ColorKey::new(10, 20, 30, 255);
    let mut pixels = RasterGrid::filled(5, 5, ColorKey::opaque(0, 0, 0));
    pixels.set(Point::new(2, 2), region);

    let legend = Legend::from_entries([(
        region,
        EventRecord::new("Sunday", "A@B")
            .with_time("1:00")
            .with_broadcast("FOX")
            .with_announcers("Kevin Burkhardt, Greg Olsen"),
    )])?;

    let national = vec![
        EventRecord::new("Thursday", "X@Y")
            .with_time("8:15")
            .with_broadcast("Prime Video"),
    ];

    let report = BatchOrchestrator::new(config).run(national, &[MapEntry::new("Early Games", legend, pixels)])?;
    for title in &report.unresolved {
        info!("no regional game found on {title}");
    }

    println!("{}", serde_json::to_string_pretty(&report.events)?);
    Ok(())
}
