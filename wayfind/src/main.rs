//! Headless wayfind: logs the event stream of every solver.
//!
//! Run: `cargo run --bin wayfind [config.json]`

use std::thread;

use wayfind::RunConfig;
use wayfind_core::Event;

fn log_event(event: &Event) {
    match event {
        Event::Status(s) => log::info!("[{}] {}", s.tag, s.text),
        Event::Path(p) => log::trace!("[{}] path through {} points", p.tag, p.points.len()),
        Event::Overlay(o) => log::debug!(
            "graph overlay: {} nodes, {} edges",
            o.circles.len(),
            o.segments.len()
        ),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    let (tx, rx) = crossbeam_channel::bounded(config.channel_capacity);
    let driver = thread::Builder::new()
        .name("wayfind".into())
        .spawn(move || wayfind::run(&config, tx))?;

    let mut received = 0usize;
    for event in rx {
        received += 1;
        log_event(&event);
    }

    let summary = driver.join().map_err(|_| "solver driver panicked")??;
    log::info!("seed {}: {received} events", summary.seed);
    for report in &summary.reports {
        match report.length {
            Some(length) => log::info!(
                "[{}] {}: {length:.2} via {:?} ({} steps)",
                report.tag,
                report.name,
                report.path.as_deref().unwrap_or_default(),
                report.steps
            ),
            None => log::info!("[{}] {}: no path", report.tag, report.name),
        }
    }
    Ok(())
}
