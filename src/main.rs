use track_vision::image::GrayImageU8;
use track_vision::prelude::*;

fn main() {
    // Demo: a synthetic frame with one bright vertical track.
    let (w, h) = (160usize, 120usize);
    let mut frame = GrayImageU8::filled(w, h, 30);
    frame.fill_rect(70, 0, 90, h, 220);

    let params = PipelineParams {
        perspective: PerspectiveMode::Identity,
        ..Default::default()
    };
    let mut pipeline = match TrackPipeline::new(params) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    for cycle in 0..3 {
        match pipeline.process(&frame.as_view()) {
            Ok(out) => println!(
                "cycle {cycle}: element={} anchor_x={} ({})",
                out.stable,
                out.anchor_x,
                out.timing.summary()
            ),
            Err(err) => eprintln!("cycle {cycle}: {err}"),
        }
    }
}
