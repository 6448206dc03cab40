mod common;

use common::synthetic_image::{intersection, leaning_track, mirrored, straight_track};
use track_vision::classifier::classify;
use track_vision::image::ImageU8;
use track_vision::pipeline::{PerspectiveMode, PipelineParams, TrackPipeline};
use track_vision::threshold::Polarity;
use track_vision::{ElementType, Point};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dark_track_params() -> PipelineParams {
    let mut params = PipelineParams {
        perspective: PerspectiveMode::Identity,
        ..Default::default()
    };
    params.tracer.polarity = Polarity::DarkTrack;
    params
}

#[test]
fn straight_track_stays_a_line() {
    init_logger();
    let (w, h) = (80usize, 60usize);
    let buffer = straight_track(w, h, 30, 50);
    let grid = ImageU8::new(w, h, &buffer);
    let mut pipeline = TrackPipeline::new(dark_track_params()).expect("valid params");

    for cycle in 0..6 {
        let out = pipeline
            .process_with_seed(&grid, Point::new(40, 50))
            .expect("cycle runs");
        assert_eq!(out.raw, ElementType::Line, "cycle {cycle}");
        assert_eq!(out.stable, ElementType::Line, "cycle {cycle}");
        for slope in out.snapshot.slope {
            assert!(slope.abs() <= 0.05, "slope {slope} on cycle {cycle}");
        }
        assert!(out.snapshot.left.iter().all(|p| p.x == 30));
        assert!(out.snapshot.right.iter().all(|p| p.x == 49));
        assert_eq!(out.anchor, Point::new(40, 30));
    }
}

fn crossing_frame() -> (usize, usize, Vec<u8>) {
    let (w, h) = (160usize, 120usize);
    (w, h, intersection(w, h, (70, 90), (20, 140), (40, 80)))
}

#[test]
fn intersection_walks_through_the_cross_states() {
    init_logger();
    let (w, h, buffer) = crossing_frame();
    let grid = ImageU8::new(w, h, &buffer);
    let mut pipeline = TrackPipeline::new(dark_track_params()).expect("valid params");
    let classifier = pipeline.params().classifier;

    // Seeds approach, overlap and leave the crossing band.
    let seeds = [(80, 30), (80, 110), (80, 70), (80, 30)];
    let mut state = ElementType::Line;
    let mut states = Vec::new();
    for (x, y) in seeds {
        let out = pipeline
            .process_with_seed(&grid, Point::new(x, y))
            .expect("cycle runs");
        state = classify(&out.snapshot.features(), state, &classifier);
        states.push(state);
    }
    assert_eq!(
        states,
        vec![
            ElementType::Line,
            ElementType::CrossBegin,
            ElementType::CrossIn,
            ElementType::Line
        ]
    );
}

#[test]
fn stabilizer_lags_the_raw_cross_sequence() {
    init_logger();
    let (w, h, buffer) = crossing_frame();
    let grid = ImageU8::new(w, h, &buffer);
    let mut pipeline = TrackPipeline::new(dark_track_params()).expect("valid params");

    let mut seeds = vec![Point::new(80, 30); 3];
    seeds.extend([Point::new(80, 110); 3]);
    seeds.extend([Point::new(80, 70); 4]);
    seeds.extend([Point::new(80, 30); 5]);

    let mut stable = Vec::new();
    for seed in seeds {
        let out = pipeline.process_with_seed(&grid, seed).expect("cycle runs");
        stable.push(out.stable);
    }
    use ElementType::*;
    assert_eq!(
        stable,
        vec![
            Line, Line, Line, Line, Line, CrossBegin, CrossBegin, CrossBegin, CrossIn, CrossIn,
            CrossIn, CrossIn, Line, Line, Line
        ]
    );
}

#[test]
fn leaning_track_reads_as_a_curve() {
    init_logger();
    let (w, h) = (120usize, 90usize);
    let right = leaning_track(w, h, 55.0, 80.0, 0.3, 10.0);
    let left = mirrored(&right, w);

    let mut pipeline = TrackPipeline::new(dark_track_params()).expect("valid params");
    let out = pipeline.process(&ImageU8::new(w, h, &right)).expect("cycle runs");
    assert_eq!(out.raw, ElementType::RCurve);
    assert!(out.snapshot.slope[0] > 0.25 && out.snapshot.slope[1] > 0.25);

    pipeline.reset();
    let out = pipeline.process(&ImageU8::new(w, h, &left)).expect("cycle runs");
    assert_eq!(out.raw, ElementType::LCurve);
    assert!(out.snapshot.slope[1] < -0.25);
}

#[test]
fn lost_track_keeps_the_previous_anchor() {
    init_logger();
    let (w, h) = (80usize, 60usize);
    let track = straight_track(w, h, 30, 50);
    let blank = vec![120u8; w * h];
    let mut pipeline = TrackPipeline::new(dark_track_params()).expect("valid params");

    let first = pipeline
        .process_with_seed(&ImageU8::new(w, h, &blank), Point::new(40, 50))
        .expect("cycle runs");
    assert!(first.snapshot.left.is_empty() && first.snapshot.right.is_empty());
    assert_eq!(first.anchor, Point::new(40, 30));

    let seen = pipeline
        .process_with_seed(&ImageU8::new(w, h, &track), Point::new(40, 50))
        .expect("cycle runs");
    let lost = pipeline
        .process_with_seed(&ImageU8::new(w, h, &blank), Point::new(40, 50))
        .expect("cycle runs");
    assert_eq!(lost.anchor, seen.anchor);
    assert_eq!(pipeline.resolver().previous(), Some(seen.anchor));
}

#[test]
fn cycle_output_serialises_for_reports() {
    let (w, h) = (80usize, 60usize);
    let buffer = straight_track(w, h, 30, 50);
    let mut pipeline = TrackPipeline::new(dark_track_params()).expect("valid params");
    let out = pipeline
        .process(&ImageU8::new(w, h, &buffer))
        .expect("cycle runs");
    let json = serde_json::to_value(&out).expect("serialisable");
    assert_eq!(json["anchorX"], out.anchor_x);
    assert_eq!(json["stable"], "Line");
    assert!(json["snapshot"]["left"].is_array());
    assert_eq!(json["timing"]["stages"].as_array().map(|s| s.len()), Some(4));
}
