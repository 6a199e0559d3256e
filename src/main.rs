use sunmap_rs::{SolarView, Spa, SunmapError, ViewConfig};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), SunmapError> {
    let level = std::env::var("SUNMAP_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SunmapError::ConfigError(e.to_string()))?;

    // Optional JSON view config as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => ViewConfig::from_json_file(path)?,
        None => ViewConfig::default(),
    };

    let view = SolarView::new(config, Spa);
    let region = view.region();
    info!(
        lat = region.center_latitude,
        lon = region.center_longitude,
        date = %view.date(),
        "rendering view"
    );

    let grid = view.heat_grid();
    let cells = u64::from(grid.grid_size()).pow(2);
    println!("Visible tiles: {} of {}", grid.len(), cells);
    if let Some(max) = grid.max_score() {
        println!("Best score: {:.3}", max);
    }

    let snapshot = view.snapshot()?;
    println!("Sun: {}", snapshot);
    match (snapshot.sunrise, snapshot.sunset) {
        (Some(rise), Some(set)) => println!("Sunrise {} / Sunset {}", rise, set),
        _ => println!("No sunrise or sunset today"),
    }

    let shadow = view.shadow()?;
    println!(
        "Shadow: {:.2} m to ({:.6}, {:.6})",
        shadow.length, shadow.tip.latitude, shadow.tip.longitude
    );

    for point in &view.sun_path()?.points {
        println!(
            "{:02}:00  {:5.1}°  ({:.6}, {:.6})",
            point.hour, point.elevation_degrees, point.tip.latitude, point.tip.longitude
        );
    }

    let legend: Vec<String> = view.legend().iter().map(|c| c.to_string()).collect();
    println!("Legend: {}", legend.join(" "));

    Ok(())
}
