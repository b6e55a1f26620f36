//! Turns one file on disk into `(frames, canvas_w, canvas_h)`, each frame
//! an RGBA8888 buffer plus a duration in milliseconds. Still images
//! synthesize one frame of duration 1ms.

use anyhow::{Context, Result};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageDecoder, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct DecodedFrame {
    pub pixels: RgbaImage,
    pub duration_ms: u32,
}

pub struct DecodedAnimation {
    pub frames: Vec<DecodedFrame>,
    pub canvas_w: u32,
    pub canvas_h: u32,
}

/// Decodes `path` according to its extension. GIF and WebP are decoded as
/// potentially multi-frame animations; everything else is treated as a
/// still image and synthesizes a single 1ms frame.
pub fn decode(path: &Path, ext: &str) -> Result<DecodedAnimation> {
    match ext.to_ascii_lowercase().as_str() {
        "gif" => decode_gif(path),
        "webp" => decode_webp(path),
        _ => decode_still(path),
    }
}

fn decode_still(path: &Path) -> Result<DecodedAnimation> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("detecting format of {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok(DecodedAnimation {
        frames: vec![DecodedFrame {
            pixels: rgba,
            duration_ms: 1,
        }],
        canvas_w: w,
        canvas_h: h,
    })
}

fn decode_gif(path: &Path) -> Result<DecodedAnimation> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let decoder =
        GifDecoder::new(BufReader::new(file)).with_context(|| format!("reading gif {}", path.display()))?;
    let (w, h) = decoder.dimensions();
    let mut canvas = RgbaImage::new(w, h);
    let mut frames = Vec::new();
    for frame in decoder.into_frames() {
        let frame = frame.with_context(|| format!("decoding gif frame in {}", path.display()))?;
        let (num, den) = frame.delay().numer_denom_ms();
        let duration_ms = if den == 0 { 100 } else { (num / den).max(1) };
        let (left, top) = (frame.left(), frame.top());
        image::imageops::overlay(&mut canvas, frame.buffer(), left as i64, top as i64);
        frames.push(DecodedFrame {
            pixels: canvas.clone(),
            duration_ms,
        });
    }
    if frames.is_empty() {
        frames.push(DecodedFrame {
            pixels: canvas,
            duration_ms: 1,
        });
    }
    Ok(DecodedAnimation {
        frames,
        canvas_w: w,
        canvas_h: h,
    })
}

fn decode_webp(path: &Path) -> Result<DecodedAnimation> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let decoder = image::codecs::webp::WebPDecoder::new(BufReader::new(file))
        .with_context(|| format!("reading webp {}", path.display()))?;
    let (w, h) = decoder.dimensions();
    if !decoder.has_animation() {
        return decode_still(path);
    }
    let mut canvas = RgbaImage::new(w, h);
    let mut frames = Vec::new();
    for frame in decoder.into_frames() {
        let frame = frame.with_context(|| format!("decoding webp frame in {}", path.display()))?;
        let (num, den) = frame.delay().numer_denom_ms();
        let duration_ms = if den == 0 { 100 } else { (num / den).max(1) };
        let (left, top) = (frame.left(), frame.top());
        image::imageops::overlay(&mut canvas, frame.buffer(), left as i64, top as i64);
        frames.push(DecodedFrame {
            pixels: canvas.clone(),
            duration_ms,
        });
    }
    if frames.is_empty() {
        return decode_still(path);
    }
    Ok(DecodedAnimation {
        frames,
        canvas_w: w,
        canvas_h: h,
    })
}
