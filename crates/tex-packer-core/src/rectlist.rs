//! The Input Rectangle model: which admitted frames get packed, at what
//! padded size, sorted into the descending order the packer expects.

use crate::anim::{AnimationList, FrameRef};
use crate::error::{Result, TexPackerError};

/// One rectangle admitted for packing: a back-reference to its source
/// frame plus its padded dimensions. Pack-result fields are filled in by
/// the packer page loop.
#[derive(Debug, Clone)]
pub struct InputRect {
    pub frame_ref: FrameRef,
    pub padded_w: u32,
    pub padded_h: u32,
    pub page: Option<usize>,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
}

impl InputRect {
    fn new(frame_ref: FrameRef, padded_w: u32, padded_h: u32) -> Self {
        Self {
            frame_ref,
            padded_w,
            padded_h,
            page: None,
            x: 0,
            y: 0,
            rotated: false,
        }
    }
}

/// Sort key for the pre-pack descending sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectSortOrder {
    Area,
    Height,
    Width,
}

/// Builds the admitted rectangle list and sorts it
/// descending by `order`. `allow_rotation` lets a rectangle whose rotated
/// orientation fits the page through even when its natural orientation
/// does not, mirroring the packer's own rotation allowance.
pub fn build_rect_list(
    anims: &AnimationList,
    pad: u32,
    trim: bool,
    dedupe: bool,
    pivot_enabled: bool,
    page_w: u32,
    page_h: u32,
    allow_rotation: bool,
    order: RectSortOrder,
) -> Result<Vec<InputRect>> {
    let mut out = Vec::new();
    for (ai, a) in anims.animations.iter().enumerate() {
        for (fi, f) in a.frames.iter().enumerate() {
            if f.is_blank {
                continue;
            }
            if f.is_pivot_frame && pivot_enabled {
                continue;
            }
            if f.is_duplicate_of.is_some() && dedupe {
                continue;
            }
            let (w, h) = if trim {
                let c = f.crop.expect("non-blank frame has a crop rect");
                (c.w, c.h)
            } else {
                (a.canvas_w, a.canvas_h)
            };
            let padded_w = w + 2 * pad;
            let padded_h = h + 2 * pad;
            let fits_unrotated = padded_w <= page_w && padded_h <= page_h;
            let fits_rotated = allow_rotation && padded_h <= page_w && padded_w <= page_h;
            if !fits_unrotated && !fits_rotated {
                return Err(TexPackerError::FrameTooBig {
                    animation: a.name.clone(),
                    frame: fi,
                    width: padded_w,
                    height: padded_h,
                    max_width: page_w,
                    max_height: page_h,
                });
            }
            out.push(InputRect::new(
                FrameRef { anim: ai, frame: fi },
                padded_w,
                padded_h,
            ));
        }
    }

    // Stable descending sort; ties keep admission (animation/frame) order.
    match order {
        RectSortOrder::Area => {
            out.sort_by(|a, b| (b.padded_w * b.padded_h).cmp(&(a.padded_w * a.padded_h)))
        }
        RectSortOrder::Height => out.sort_by(|a, b| b.padded_h.cmp(&a.padded_h)),
        RectSortOrder::Width => out.sort_by(|a, b| b.padded_w.cmp(&a.padded_w)),
    }
    Ok(out)
}
