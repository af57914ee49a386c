//! Background decoding of slide artwork so the frame loop never stalls.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

/// Longest edge kept after decoding.  Terminal stages are a few hundred
/// half-block pixels at most; anything larger only slows per-frame resizing.
const MAX_EDGE: u32 = 320;

/// A finished decode job.
pub struct ImageUpdate {
    pub path: PathBuf,
    pub result: anyhow::Result<Arc<image::RgbaImage>>,
}

/// Decode every path on a worker thread, sending one update per file.
/// Paths that do not exist are skipped silently; the stage draws a
/// silhouette for them.
pub fn spawn_image_loads(tx: mpsc::UnboundedSender<ImageUpdate>, paths: Vec<PathBuf>) {
    std::thread::spawn(move || {
        for path in paths {
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "no artwork, using silhouette");
                continue;
            }
            let result = load_thumbnail(&path).map(Arc::new);
            if tx.send(ImageUpdate { path, result }).is_err() {
                break;
            }
        }
    });
}

/// Decode `path` and shrink it so its longest edge is at most [`MAX_EDGE`].
pub fn load_thumbnail(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let decoded = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();
    Ok(shrink(decoded, MAX_EDGE))
}

fn shrink(img: image::RgbaImage, max_edge: u32) -> image::RgbaImage {
    let (w, h) = img.dimensions();
    let longest = w.max(h);
    if longest <= max_edge || longest == 0 {
        return img;
    }
    let scale = max_edge as f64 / longest as f64;
    let nw = ((w as f64 * scale).round() as u32).max(1);
    let nh = ((h as f64 * scale).round() as u32).max(1);
    image::imageops::resize(&img, nw, nh, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_preserves_aspect() {
        let img = image::RgbaImage::new(640, 1280);
        let small = shrink(img, 320);
        assert_eq!(small.dimensions(), (160, 320));
    }

    #[test]
    fn small_images_are_untouched() {
        let img = image::RgbaImage::new(30, 40);
        assert_eq!(shrink(img, 320).dimensions(), (30, 40));
    }

    #[test]
    fn decodes_a_png_from_disk() {
        let dir = std::env::temp_dir().join(format!("hero-carousel-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("slide.png");
        image::RgbaImage::from_pixel(4, 8, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let thumb = load_thumbnail(&path).unwrap();
        assert_eq!(thumb.dimensions(), (4, 8));
        assert_eq!(thumb.get_pixel(0, 0).0, [10, 20, 30, 255]);

        assert!(load_thumbnail(&dir.join("missing.png")).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn missing_files_produce_no_updates() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_image_loads(tx, vec![PathBuf::from("/definitely/not/here.webp")]);
        // The worker drops its sender when done, closing the channel.
        assert!(rx.recv().await.is_none());
    }
}
