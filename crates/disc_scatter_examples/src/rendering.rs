//! PNG output for scattered layouts.
use std::path::Path;

use disc_scatter::prelude::*;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a console subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// How to map a layout onto an image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// World region shown in the image.
    pub bounds: Bounds,
    pub background: [u8; 3],
    /// Colour per size index; wraps around when there are more sizes than colours.
    pub palette: Vec<[u8; 3]>,
    /// Also outline each sample's exclusion circle.
    pub show_exclusion: bool,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), bounds: Bounds) -> Self {
        Self {
            image_size,
            bounds,
            background: [245, 245, 240],
            palette: vec![[214, 96, 77], [67, 147, 195], [90, 174, 97], [153, 112, 171]],
            show_exclusion: false,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_palette(mut self, palette: Vec<[u8; 3]>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_exclusion(mut self, show: bool) -> Self {
        self.show_exclusion = show;
        self
    }

    fn color_for(&self, size_index: usize) -> [u8; 3] {
        if self.palette.is_empty() {
            return [0, 0, 0];
        }
        self.palette[size_index % self.palette.len()]
    }
}

/// Draw each sample as its footprint (`sizes[size_index]`) and write a PNG to `path`.
pub fn render_samples_to_png<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    sizes: &[f32],
    footprint: Footprint,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be > 0");
    anyhow::ensure!(!config.bounds.is_degenerate(), "render bounds are empty");

    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    let scale_x = w as f32 / config.bounds.width();
    let scale_y = h as f32 / config.bounds.height();

    let mut drawn = 0usize;
    for sample in samples {
        let Some(&size) = sizes.get(sample.size_index) else {
            continue;
        };
        let cx = (sample.x() - config.bounds.x()) * scale_x;
        let cy = (sample.y() - config.bounds.y()) * scale_y;
        let color = Rgb(config.color_for(sample.size_index));

        match footprint {
            Footprint::Circle => {
                fill_ellipse(&mut img, cx, cy, size * scale_x, size * scale_y, color)
            }
            Footprint::Square => {
                let (hx, hy) = (size * 0.5 * scale_x, size * 0.5 * scale_y);
                fill_rect(&mut img, cx - hx, cy - hy, cx + hx, cy + hy, color);
            }
        }

        if config.show_exclusion {
            outline_ellipse(
                &mut img,
                cx,
                cy,
                sample.radius * scale_x,
                sample.radius * scale_y,
                Rgb([40, 40, 40]),
            );
        }
        drawn += 1;
    }

    let path = path.as_ref();
    img.save(path)?;
    info!("Wrote {} samples to {}", drawn, path.display());
    Ok(())
}

fn pixel_span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
    let start = lo.floor().max(0.0) as u32;
    let end = (hi.ceil().max(0.0) as u32).min(limit);
    start..end.max(start)
}

fn fill_rect(img: &mut RgbImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    for y in pixel_span(y0, y1, h) {
        for x in pixel_span(x0, x1, w) {
            img.put_pixel(x, y, color);
        }
    }
}

fn ellipse_value(px: u32, py: u32, cx: f32, cy: f32, rx: f32, ry: f32) -> f32 {
    let dx = (px as f32 + 0.5 - cx) / rx;
    let dy = (py as f32 + 0.5 - cy) / ry;
    dx * dx + dy * dy
}

fn fill_ellipse(img: &mut RgbImage, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgb<u8>) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let (w, h) = img.dimensions();
    for y in pixel_span(cy - ry, cy + ry, h) {
        for x in pixel_span(cx - rx, cx + rx, w) {
            if ellipse_value(x, y, cx, cy, rx, ry) <= 1.0 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn outline_ellipse(img: &mut RgbImage, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgb<u8>) {
    if rx <= 1.0 || ry <= 1.0 {
        return;
    }
    let (w, h) = img.dimensions();
    // Relative band roughly one pixel wide.
    let band = 2.0 / rx.min(ry);
    for y in pixel_span(cy - ry - 1.0, cy + ry + 1.0, h) {
        for x in pixel_span(cx - rx - 1.0, cx + rx + 1.0, w) {
            let v = ellipse_value(x, y, cx, cy, rx, ry);
            if (v - 1.0).abs() <= band {
                img.put_pixel(x, y, color);
            }
        }
    }
}
