//! Headless mode: sweep the whole scroll range and print every frame.
//!
//! Output is one tab-separated line per frame so it can be piped into other
//! tools or diffed between tuning runs.

use std::io::Write;

use crate::core::carousel::{Carousel, CarouselEvent, Frame};

/// Column header matching [`format_frame`].
pub fn header(item_count: usize) -> String {
    let mut cols = vec![
        "frame".to_string(),
        "progress".to_string(),
        "smoothed".to_string(),
        "active".to_string(),
    ];
    cols.extend((0..item_count).map(|i| format!("item{i}(x:y:scale:blur:opacity:z)")));
    cols.join("\t")
}

/// Render one frame as a tab-separated line.
pub fn format_frame(number: usize, frame: &Frame) -> String {
    let mut line = format!(
        "{number}\t{:.6}\t{:.6}\t{}",
        frame.progress, frame.smoothed_index, frame.active
    );
    for item in &frame.items {
        let v = item.visual;
        line.push_str(&format!(
            "\t{:.3}:{:.3}:{:.3}:{}:{:.3}:{}",
            unsigned_zero(v.x_vw),
            unsigned_zero(v.y_px),
            v.scale,
            v.blur_px,
            v.opacity,
            v.z_index
        ));
    }
    line
}

// Keeps `-0.000` out of the output.
fn unsigned_zero(x: f64) -> f64 {
    x + 0.0
}

/// Sweep progress linearly from 0 to 1 over `frames` frames (inclusive of
/// both ends), ticking the carousel at `fps`, and write every frame to `out`.
pub fn run(
    carousel: &mut Carousel,
    frames: usize,
    fps: u32,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let dt = 1.0 / fps.max(1) as f64;
    let frames = frames.max(1);

    writeln!(out, "{}", header(carousel.count().get()))?;
    for f in 0..=frames {
        carousel.apply(CarouselEvent::Scroll {
            progress: f as f64 / frames as f64,
        });
        carousel.apply(CarouselEvent::Tick { dt });
        writeln!(out, "{}", format_frame(f, &carousel.frame()))?;
    }
    tracing::debug!(frames, fps, "dump complete");
    Ok(())
}
