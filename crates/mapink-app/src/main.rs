//! Scripted demo session (native).
//!
//! Plays the gestures a user of the map-drawing demo would make - lines,
//! a freehand squiggle, a polygon with a corner nudged in select mode - and
//! writes the exported GeoJSON document to disk.

use mapink_core::{geojson, Color, DrawMode, DrawSession, Point, SessionConfig};
use std::path::PathBuf;

fn main() {
    env_logger::init();
    log::info!("Starting mapink demo session");

    if let Err(err) = run() {
        log::error!("demo session failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Coordinates below are geographic, so the screen-space defaults for the
    // tolerances are far too wide.
    let mut session = DrawSession::with_config(SessionConfig {
        vertex_hit_tolerance: 0.05,
        freehand_min_spacing: 0.001,
    });

    // The host selects a mode before the map finishes loading; the engine
    // queues it until the surface is ready.
    session.set_mode(Some(DrawMode::Line));
    session.mark_ready();

    // A line from London to Paris.
    session.on_pointer_down(Point::new(-0.1276, 51.5072));
    session.on_pointer_down(Point::new(2.3522, 48.8566));
    session.on_double_click(Point::new(2.3522, 48.8566));

    // A dashed leg onwards to Berlin, restyled.
    session.set_mode(Some(DrawMode::DashedLine));
    session.set_color(Color::from_hex("#e11d48")?);
    session.set_thickness(3.0);
    session.on_pointer_down(Point::new(2.3522, 48.8566));
    session.on_pointer_down(Point::new(13.4050, 52.5200));
    session.on_double_click(Point::new(13.4050, 52.5200));

    // A freehand squiggle east of Amsterdam.
    session.set_mode(Some(DrawMode::Freehand));
    session.on_pointer_down(Point::new(4.9041, 52.3676));
    for i in 1..=20 {
        let t = i as f64 / 20.0;
        let wave = (t * std::f64::consts::TAU).sin() * 0.2;
        session.on_pointer_move(Point::new(4.9041 + t, 52.3676 + wave), true);
    }
    session.on_pointer_up(Point::new(5.9041, 52.3676));

    // A polygon, then nudge one of its corners in select mode.
    session.set_mode(Some(DrawMode::Polygon));
    session.set_color(Color::from_hex("#3388ff")?);
    session.on_pointer_down(Point::new(8.0, 50.0));
    session.on_pointer_down(Point::new(9.0, 50.0));
    session.on_pointer_down(Point::new(9.0, 51.0));
    session.on_pointer_down(Point::new(8.0, 51.0));
    session.on_double_click(Point::new(8.0, 51.0));

    session.set_mode(Some(DrawMode::Select));
    session.on_pointer_down(Point::new(9.0, 51.0));
    session.on_pointer_move(Point::new(9.4, 51.3), true);
    session.on_pointer_up(Point::new(9.4, 51.3));

    let document = session.export_document();
    let text = geojson::to_pretty_json(&document)?;
    let path = output_path();
    std::fs::write(&path, &text)?;
    log::info!(
        "exported {} features to {}",
        document.features.len(),
        path.display()
    );

    Ok(())
}

/// First CLI argument, or the demo's dated default name.
fn output_path() -> PathBuf {
    std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(format!(
            "drawing-{}.geojson",
            chrono::Local::now().format("%Y-%m-%d")
        ))
    })
}
