//! Packer page loop and composer for the animation/bank pipeline. Operates
//! on [`crate::rectlist::InputRect`] keyed by its index into the rect list.

use crate::anim::AnimationList;
use crate::compositing::blit_rgba;
use crate::config::PackerConfig;
use crate::error::Result;
use crate::model::Rect;
use crate::packer::guillotine::GuillotinePacker;
use crate::packer::maxrects::MaxRectsPacker;
use crate::packer::Packer;
use crate::rectlist::InputRect;
use image::RgbaImage;

/// The two packer methods the CLI surface exposes. Other `AlgorithmFamily`
/// members remain reachable as library-only enrichment through
/// `PackerConfig` but are not driven by this page loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackMethod {
    Guillotine,
    MaxRects,
}

fn make_packer(method: PackMethod, cfg: &PackerConfig) -> Box<dyn Packer<usize>> {
    match method {
        PackMethod::Guillotine => Box::new(GuillotinePacker::new(
            cfg.clone(),
            cfg.g_choice.clone(),
            cfg.g_split.clone(),
        )),
        PackMethod::MaxRects => {
            Box::new(MaxRectsPacker::new(cfg.clone(), cfg.mr_heuristic.clone()))
        }
    }
}

/// One packed page: its id and the rectangle indices placed on it, in
/// forward insertion order.
#[derive(Debug, Clone)]
pub struct PagePack {
    pub id: usize,
    pub chain: Vec<usize>,
}

/// Runs the page loop over an already-admitted, already sorted rectangle
/// list, filling in each rectangle's pack result in place. `progress` is
/// invoked with a monotonic `packed/total` fraction, then once more with a
/// value > 1.0 on completion.
pub fn pack_rects(
    rects: &mut [InputRect],
    cfg: &PackerConfig,
    method: PackMethod,
    exhaustive: bool,
    mut progress: impl FnMut(f32),
) -> Result<Vec<PagePack>> {
    let n = rects.len();
    if n == 0 {
        progress(2.0);
        return Ok(Vec::new());
    }
    let mut packed = vec![false; n];
    let mut pages = Vec::new();
    let mut remaining = n;
    let mut page_id = 0usize;

    while remaining > 0 {
        let mut packer = make_packer(method, cfg);
        let mut chain: Vec<usize> = Vec::new();
        let mut i = 0usize;

        while i < n {
            if packed[i] {
                i += 1;
                continue;
            }
            let rect = Rect::new(0, 0, rects[i].padded_w, rects[i].padded_h);
            if let Some(placed) = packer.pack(i, &rect) {
                apply_placement(&mut rects[i], page_id, &placed);
                packed[i] = true;
                remaining -= 1;
                chain.push(i);
                progress((n - remaining) as f32 / n as f32);
                i += 1;
                continue;
            }

            if exhaustive {
                for j in (i + 1)..n {
                    if packed[j] {
                        continue;
                    }
                    let r2 = Rect::new(0, 0, rects[j].padded_w, rects[j].padded_h);
                    if let Some(placed) = packer.pack(j, &r2) {
                        apply_placement(&mut rects[j], page_id, &placed);
                        packed[j] = true;
                        remaining -= 1;
                        chain.push(j);
                        progress((n - remaining) as f32 / n as f32);
                    }
                }
            }
            // close this page; the rectangle that failed is retried on a
            // fresh one (either state is represented by simply breaking
            // out and looping the outer `while remaining > 0`).
            break;
        }

        if chain.is_empty() {
            // Admission already rejected anything that cannot fit an empty
            // page, so this should not happen in practice; guard anyway.
            break;
        }
        pages.push(PagePack {
            id: page_id,
            chain,
        });
        page_id += 1;
    }
    progress(2.0);
    Ok(pages)
}

fn apply_placement(rect: &mut InputRect, page_id: usize, placed: &crate::model::Frame<usize>) {
    rect.page = Some(page_id);
    rect.x = placed.frame.x;
    rect.y = placed.frame.y;
    rect.rotated = placed.rotated;
}

/// Result of composing one page.
pub struct ComposedPage {
    pub rgba: RgbaImage,
    pub rects: usize,
    pub occupancy: f32,
}

/// Renders one page into an RGBA buffer from its rectangle chain plus
/// frame pixels, honoring trim/pad/rotate. `debug_overlay`, when
/// `Some(alpha)`, draws a translucent rectangle over each placed frame for
/// visual inspection.
#[allow(clippy::too_many_arguments)]
pub fn compose_page(
    anims: &AnimationList,
    page: &PagePack,
    all_rects: &[InputRect],
    page_w: u32,
    page_h: u32,
    pad: u32,
    trim: bool,
    debug_overlay: Option<u8>,
) -> ComposedPage {
    let mut canvas = RgbaImage::new(page_w, page_h);
    let mut used_area: u64 = 0;

    for &ridx in &page.chain {
        let r = &all_rects[ridx];
        let anim = &anims.animations[r.frame_ref.anim];
        let frame = &anim.frames[r.frame_ref.frame];
        let (cx, cy, cw, ch) = if trim {
            let c = frame.crop.expect("admitted frame has a crop rect");
            (c.x, c.y, c.w, c.h)
        } else {
            (0, 0, anim.canvas_w, anim.canvas_h)
        };
        let src = image::RgbaImage::from_raw(anim.canvas_w, anim.canvas_h, frame.pixels.clone())
            .expect("frame pixel buffer matches its canvas dimensions");
        blit_rgba(
            &src, &mut canvas, r.x + pad, r.y + pad, cx, cy, cw, ch, r.rotated, 0, false,
        );
        used_area += (cw as u64) * (ch as u64);

        if let Some(alpha) = debug_overlay {
            overlay_rect(&mut canvas, r, pad, cw, ch, alpha, ridx);
        }
    }

    let occupancy = (used_area as f32) / ((page_w as u64 * page_h as u64).max(1) as f32);
    ComposedPage {
        rgba: canvas,
        rects: page.chain.len(),
        occupancy,
    }
}

fn overlay_rect(canvas: &mut RgbaImage, r: &InputRect, pad: u32, cw: u32, ch: u32, alpha: u8, seed: usize) {
    let (rw, rh) = if r.rotated { (ch, cw) } else { (cw, ch) };
    // deterministic pseudo-random color derived from the rect index
    let h = (seed as u32).wrapping_mul(2654435761);
    let color = [
        (h & 0xff) as u8,
        ((h >> 8) & 0xff) as u8,
        ((h >> 16) & 0xff) as u8,
        alpha,
    ];
    let (cw2, ch2) = canvas.dimensions();
    for yy in 0..rh {
        for xx in 0..rw {
            let (px, py) = (r.x + pad + xx, r.y + pad + yy);
            if px >= cw2 || py >= ch2 {
                continue;
            }
            let dst = canvas.get_pixel(px, py);
            let src_a = color[3] as f32 / 255.0;
            let blended = [
                ((color[0] as f32) * src_a + (dst[0] as f32) * (1.0 - src_a)) as u8,
                ((color[1] as f32) * src_a + (dst[1] as f32) * (1.0 - src_a)) as u8,
                ((color[2] as f32) * src_a + (dst[2] as f32) * (1.0 - src_a)) as u8,
                255u8.max(dst[3]),
            ];
            canvas.put_pixel(px, py, image::Rgba(blended));
        }
    }
}
