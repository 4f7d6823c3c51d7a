//! Derived images generated from the active season's accent colors.
//!
//! Each generator is a pure function of the accent pair, so two builds in the
//! same season produce byte-identical PNGs. The pipeline decides what to do
//! when one fails (keep the previous file, or skip).
//!
//! | Generator   | Output            | Size     |
//! |-------------|-------------------|----------|
//! | [`Favicon`] | accent disc       | 64×64    |
//! | [`OgImage`] | social share card | 1200×630 |

use crate::config::DerivedConfig;
use crate::season::{AccentPair, parse_hex};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DerivedError {
    #[error("invalid accent color: {0}")]
    Color(String),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Something the build regenerates from the accent colors.
pub trait AssetGenerator {
    /// Path of the generated file, relative to the output root.
    fn output_path(&self) -> &str;
    fn generate(&self, colors: &AccentPair) -> Result<Vec<u8>, DerivedError>;
}

pub const FAVICON_SIZE: u32 = 64;
pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;

const OG_BACKGROUND: [u8; 3] = [0xfa, 0xfa, 0xf7];

fn rgb(color: &str) -> Result<[u8; 3], DerivedError> {
    parse_hex(color).ok_or_else(|| DerivedError::Color(color.to_string()))
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, DerivedError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

fn inside_disc(x: u32, y: u32, cx: f32, cy: f32, r: f32) -> bool {
    let dx = x as f32 + 0.5 - cx;
    let dy = y as f32 + 0.5 - cy;
    dx * dx + dy * dy <= r * r
}

pub struct Favicon {
    path: String,
}

impl AssetGenerator for Favicon {
    fn output_path(&self) -> &str {
        &self.path
    }

    fn generate(&self, colors: &AccentPair) -> Result<Vec<u8>, DerivedError> {
        let [r, g, b] = rgb(&colors.light)?;
        let half = FAVICON_SIZE as f32 / 2.0;
        let img = RgbaImage::from_fn(FAVICON_SIZE, FAVICON_SIZE, |x, y| {
            if inside_disc(x, y, half, half, half) {
                Rgba([r, g, b, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        encode_png(&img)
    }
}

/// Plain card: light background, accent band along the left edge, and a
/// dark-accent disc on the right.
pub struct OgImage {
    path: String,
}

impl AssetGenerator for OgImage {
    fn output_path(&self) -> &str {
        &self.path
    }

    fn generate(&self, colors: &AccentPair) -> Result<Vec<u8>, DerivedError> {
        let [lr, lg, lb] = rgb(&colors.light)?;
        let [dr, dg, db] = rgb(&colors.dark)?;
        let [br, bg, bb] = OG_BACKGROUND;
        let band = OG_WIDTH / 40;
        let (cx, cy, radius) = (OG_WIDTH as f32 * 0.75, OG_HEIGHT as f32 / 2.0, 180.0);
        let img = RgbaImage::from_fn(OG_WIDTH, OG_HEIGHT, |x, y| {
            if x < band {
                Rgba([lr, lg, lb, 255])
            } else if inside_disc(x, y, cx, cy, radius) {
                Rgba([dr, dg, db, 255])
            } else {
                Rgba([br, bg, bb, 255])
            }
        });
        encode_png(&img)
    }
}

/// Generators enabled by `config`, in output order.
pub fn generators(config: &DerivedConfig) -> Vec<Box<dyn AssetGenerator>> {
    let mut out: Vec<Box<dyn AssetGenerator>> = Vec::new();
    if !config.favicon.trim().is_empty() {
        out.push(Box::new(Favicon {
            path: config.favicon.clone(),
        }));
    }
    if !config.og_image.trim().is_empty() {
        out.push(Box::new(OgImage {
            path: config.og_image.clone(),
        }));
    }
    out
}
