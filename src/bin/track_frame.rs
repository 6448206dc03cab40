//! Run one perception cycle on an image file.
//!
//! Usage: `track_frame <config.json>`; see `config::frame` for the schema.
use std::env;
use std::path::Path;
use track_vision::config::frame::load_config;
use track_vision::image::io::{load_grayscale_image, save_grayscale_u8, write_json_file};
use track_vision::pipeline::TrackPipeline;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let mut pipeline = TrackPipeline::new(config.pipeline.clone()).map_err(|e| e.to_string())?;
    let out = pipeline
        .process(&gray.as_view())
        .map_err(|e| format!("Processing {} failed: {e}", config.input.display()))?;

    println!(
        "{}: element={} (raw {}) anchor=({}, {}) left={} right={} corners=L{:?}/R{:?}",
        config.input.display(),
        out.stable,
        out.raw,
        out.anchor.x,
        out.anchor.y,
        out.snapshot.left.len(),
        out.snapshot.right.len(),
        (out.snapshot.corners[0].outward, out.snapshot.corners[0].inward),
        (out.snapshot.corners[1].outward, out.snapshot.corners[1].inward),
    );
    println!("timing: {}", out.timing.summary());

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &out)?;
        println!("Saved report to {}", path.display());
    }
    if let Some(path) = &config.output.birdseye_image {
        let map = config
            .pipeline
            .perspective
            .build((gray.w, gray.h))
            .map_err(|e| e.to_string())?;
        save_grayscale_u8(&map.map_image(&gray.as_view()), path)?;
        println!("Saved bird's-eye view to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: track_frame <config.json>".to_string()
}
