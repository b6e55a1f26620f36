//! Frame store and analyzer: decoded pixel buffers plus the per-frame
//! metadata derived from them (crop rectangle, blank flag, pivot, duplicate
//! link), and the passes that compute that metadata.

use crate::model::Rect;

/// A stable reference to a frame inside an [`AnimationList`]: the owning
/// animation's index, then the frame's index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRef {
    pub anim: usize,
    pub frame: usize,
}

/// One decoded animation frame.
///
/// Pixels are owned here (RGBA8888, row-major, stride = `canvas_w * 4`);
/// the owning [`Animation`] only tracks shared canvas dimensions and name.
#[derive(Debug, Clone)]
pub struct Frame {
    pub pixels: Vec<u8>,
    pub duration_ms: u32,
    pub crop: Option<Rect>,
    pub pivot: Option<(u32, u32)>,
    pub is_pivot_frame: bool,
    pub is_blank: bool,
    pub is_duplicate_of: Option<FrameRef>,
    /// Back-reference into the rectangle list, set once this frame's
    /// admitted Input Rectangle has a pack result.
    pub rect_id: Option<usize>,
}

impl Frame {
    pub fn new(pixels: Vec<u8>, duration_ms: u32) -> Self {
        Self {
            pixels,
            duration_ms,
            crop: None,
            pivot: None,
            is_pivot_frame: false,
            is_blank: false,
            is_duplicate_of: None,
            rect_id: None,
        }
    }

    /// Normalizes fully-transparent pixels to `0x00000000`. Permanent:
    /// run once at load time before any crop/duplicate comparison.
    pub fn normalize_background(&mut self) {
        for px in self.pixels.chunks_exact_mut(4) {
            if px[3] == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                px[3] = 0;
            }
        }
    }

    /// Resolves a possibly-chained `is_duplicate_of` to the canonical,
    /// non-duplicate frame reference. Returns `None` if `self` is not a
    /// duplicate of anything.
    pub fn canonical(&self, list: &AnimationList) -> Option<FrameRef> {
        let mut cur = self.is_duplicate_of?;
        loop {
            let f = list.frame(cur);
            match f.is_duplicate_of {
                Some(next) => cur = next,
                None => return Some(cur),
            }
        }
    }
}

/// An ordered sequence of frames sharing a canvas size and a name derived
/// from the source path.
#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    pub canvas_w: u32,
    pub canvas_h: u32,
    pub frames: Vec<Frame>,
    /// Memoization flag: crop is only (re)computed when unset.
    pub found_crop: bool,
}

impl Animation {
    pub fn new(name: String, canvas_w: u32, canvas_h: u32, frames: Vec<Frame>) -> Self {
        Self {
            name,
            canvas_w,
            canvas_h,
            frames,
            found_crop: false,
        }
    }

    /// A still image is an animation of exactly one frame of duration 1ms.
    pub fn still(name: String, w: u32, h: u32, pixels: Vec<u8>) -> Self {
        Self::new(name, w, h, vec![Frame::new(pixels, 1)])
    }
}

/// A set of animations with stable iteration order; the unit of operation
/// for every analyzer pass.
#[derive(Debug, Clone, Default)]
pub struct AnimationList {
    pub animations: Vec<Animation>,
}

impl AnimationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self, r: FrameRef) -> &Frame {
        &self.animations[r.anim].frames[r.frame]
    }

    pub fn frame_mut(&mut self, r: FrameRef) -> &mut Frame {
        &mut self.animations[r.anim].frames[r.frame]
    }

    /// Iterates every `FrameRef` in stable order: animation order, then
    /// frame index order within each animation.
    pub fn frame_refs(&self) -> Vec<FrameRef> {
        let mut out = Vec::new();
        for (ai, a) in self.animations.iter().enumerate() {
            for fi in 0..a.frames.len() {
                out.push(FrameRef { anim: ai, frame: fi });
            }
        }
        out
    }

    /// Normalizes every loaded frame. Run once per newly-loaded
    /// animation.
    pub fn normalize_all(&mut self) {
        for a in self.animations.iter_mut() {
            for f in a.frames.iter_mut() {
                f.normalize_background();
            }
        }
    }

    /// Crop detection, memoized per animation via `found_crop`.
    /// `force_all` reruns every animation regardless of the memo flag
    /// (the driver's `doImageAll`).
    pub fn compute_crops(&mut self, force_all: bool) {
        for a in self.animations.iter_mut() {
            if a.found_crop && !force_all {
                continue;
            }
            let (cw, _ch) = (a.canvas_w, a.canvas_h);
            for f in a.frames.iter_mut() {
                match compute_crop_rect(&f.pixels, cw) {
                    Some(r) => {
                        f.crop = Some(r);
                        f.is_blank = false;
                    }
                    None => {
                        f.crop = None;
                        f.is_blank = true;
                    }
                }
            }
            a.found_crop = true;
        }
    }

    /// Pivot extraction. Returns warnings emitted along the way;
    /// a multiple-match warning aborts the whole pass and clears every
    /// pivot in the list so a caller always starts from a clean slate.
    pub fn extract_pivots(&mut self, pivot_rgb: Option<[u8; 3]>) -> Vec<String> {
        let pivot_rgb = match pivot_rgb {
            None => {
                self.clear_pivots();
                return Vec::new();
            }
            Some(c) if c == [0, 0, 0] => {
                self.clear_pivots();
                return Vec::new();
            }
            Some(c) => c,
        };

        for ai in 0..self.animations.len() {
            let n = self.animations[ai].frames.len();
            if n < 2 {
                continue;
            }
            let last_idx = n - 1;
            let (canvas_w, crop) = {
                let a = &self.animations[ai];
                (a.canvas_w, a.frames[last_idx].crop)
            };
            let crop = match crop {
                Some(c) => c,
                None => continue, // blank sentinel frame: nothing to find
            };

            let mut found: Option<(u32, u32)> = None;
            let mut multiple = false;
            {
                let last = &self.animations[ai].frames[last_idx];
                'scan: for ly in 0..crop.h {
                    for lx in 0..crop.w {
                        let gx = crop.x + lx;
                        let gy = crop.y + ly;
                        let idx = ((gy * canvas_w + gx) * 4) as usize;
                        let px = &last.pixels[idx..idx + 4];
                        if px[0] == pivot_rgb[0]
                            && px[1] == pivot_rgb[1]
                            && px[2] == pivot_rgb[2]
                            && px[3] == 0xFF
                        {
                            if found.is_none() {
                                found = Some((gx, gy));
                            } else {
                                multiple = true;
                                break 'scan;
                            }
                        }
                    }
                }
            }

            if multiple {
                let name = self.animations[ai].name.clone();
                self.clear_pivots();
                return vec![format!(
                    "pivot color matched more than once in animation '{name}' frame {last_idx}"
                )];
            }

            let Some((px, py)) = found else { continue };
            let a = &mut self.animations[ai];
            a.frames[last_idx].pivot = Some((px, py));
            a.frames[last_idx].is_pivot_frame = true;
            // propagate backward, stopping at the first frame whose pivot
            // is already set
            for fi in (0..last_idx).rev() {
                if a.frames[fi].pivot.is_some() {
                    break;
                }
                a.frames[fi].pivot = Some((px, py));
            }
        }
        Vec::new()
    }

    fn clear_pivots(&mut self) {
        for a in self.animations.iter_mut() {
            for f in a.frames.iter_mut() {
                f.pivot = None;
                f.is_pivot_frame = false;
            }
        }
    }

    /// Duplicate detection. When `enabled` is false, clears any
    /// existing duplicate links instead.
    ///
    /// Ambiguity resolved (see DESIGN.md): each frame only searches frames
    /// that precede it in stable order, so the canonical frame for any
    /// group of identical frames is always the earliest one. This keeps
    /// `is_duplicate_of` chains acyclic by construction, matching the
    /// "resolved transitively to a canonical non-duplicate" invariant.
    pub fn detect_duplicates(&mut self, enabled: bool) {
        if !enabled {
            for a in self.animations.iter_mut() {
                for f in a.frames.iter_mut() {
                    f.is_duplicate_of = None;
                }
            }
            return;
        }
        let refs = self.frame_refs();
        for (i, &r) in refs.iter().enumerate() {
            let (is_blank, is_pivot, crop) = {
                let f = self.frame(r);
                (f.is_blank, f.is_pivot_frame, f.crop)
            };
            if is_blank || is_pivot {
                continue;
            }
            let Some(crop) = crop else { continue };
            let mut dup_of = None;
            for &g in &refs[..i] {
                let gf = self.frame(g);
                let Some(gcrop) = gf.crop else { continue };
                if gcrop.w != crop.w || gcrop.h != crop.h {
                    continue;
                }
                if regions_equal(self, r, g, crop) {
                    dup_of = Some(g);
                    break;
                }
            }
            if let Some(g) = dup_of {
                self.frame_mut(r).is_duplicate_of = Some(g);
            }
        }
    }
}

/// Computes the minimum axis-aligned rectangle enclosing all nonzero
/// pixels in a `canvas_w`-wide, row-major RGBA8888 buffer. Returns
/// `None` when the frame is entirely blank.
pub fn compute_crop_rect(pixels: &[u8], canvas_w: u32) -> Option<Rect> {
    let stride = (canvas_w as usize) * 4;
    let h = (pixels.len() / stride.max(1)) as u32;
    if canvas_w == 0 || h == 0 {
        return None;
    }
    let row_has_content = |y: u32| -> bool {
        let row = &pixels[(y as usize) * stride..(y as usize) * stride + stride];
        row.chunks_exact(4).any(|px| px != [0, 0, 0, 0])
    };
    let mut upper = None;
    for y in 0..h {
        if row_has_content(y) {
            upper = Some(y);
            break;
        }
    }
    let upper = upper?;
    let mut lower = upper;
    for y in (upper..h).rev() {
        if row_has_content(y) {
            lower = y;
            break;
        }
    }
    let lower_bound = lower + 1;
    let mut left = canvas_w;
    let mut right = 0u32;
    for y in upper..lower_bound {
        let row = &pixels[(y as usize) * stride..(y as usize) * stride + stride];
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px != [0, 0, 0, 0] {
                let x = x as u32;
                if x < left {
                    left = x;
                }
                if x + 1 > right {
                    right = x + 1;
                }
            }
        }
    }
    Some(Rect::new(left, upper, right - left, lower_bound - upper))
}

/// Compares the `crop.h x crop.w` pixel regions of two frames for exact
/// byte equality, row by row.
fn regions_equal(list: &AnimationList, a: FrameRef, b: FrameRef, crop: Rect) -> bool {
    let fa = list.frame(a);
    let fb = list.frame(b);
    let acrop = fa.crop.unwrap();
    let bcrop = fb.crop.unwrap();
    let aw = list.animations[a.anim].canvas_w as usize;
    let bw = list.animations[b.anim].canvas_w as usize;
    let row_bytes = (crop.w as usize) * 4;
    for row in 0..crop.h {
        let a_off = (((acrop.y + row) as usize) * aw + acrop.x as usize) * 4;
        let b_off = (((bcrop.y + row) as usize) * bw + bcrop.x as usize) * 4;
        let a_row = &fa.pixels[a_off..a_off + row_bytes];
        let b_row = &fb.pixels[b_off..b_off + row_bytes];
        if a_row != b_row {
            return false;
        }
    }
    true
}
