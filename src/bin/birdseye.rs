//! Warp an image into the calibrated ground plane.
//!
//! Usage: `birdseye <config.json>`; needs `output.birdseye_image`.
use log::info;
use std::env;
use std::path::Path;
use std::time::Instant;
use track_vision::config::frame::load_config;
use track_vision::image::io::{load_grayscale_image, save_grayscale_u8};

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
    let out_path = config
        .output
        .birdseye_image
        .as_ref()
        .ok_or("Config is missing output.birdseye_image")?;

    let gray = load_grayscale_image(&config.input)?;
    let map = config
        .pipeline
        .perspective
        .build((gray.w, gray.h))
        .map_err(|e| e.to_string())?;

    let start = Instant::now();
    let warped = map.map_image(&gray.as_view());
    info!(
        "warped {}x{} -> {}x{} in {:.3} ms",
        gray.w,
        gray.h,
        warped.w,
        warped.h,
        start.elapsed().as_secs_f64() * 1000.0
    );
    save_grayscale_u8(&warped, out_path)?;
    println!("Saved bird's-eye view to {}", out_path.display());
    Ok(())
}

fn usage() -> String {
    "Usage: birdseye <config.json>".to_string()
}
