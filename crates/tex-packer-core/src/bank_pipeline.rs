//! Orchestrates the full animation-to-bank pipeline: analyze, build the
//! rectangle list, pack, compose, and assemble the exporter payload for a
//! single driver invocation.

use crate::anim::AnimationList;
use crate::bank::{build_bank, Bank};
use crate::bankpack::{compose_page, pack_rects, ComposedPage, PackMethod};
use crate::config::PackerConfig;
use crate::error::Result;
use crate::rectlist::{build_rect_list, RectSortOrder};

/// Every setting the rectangle list, packer, and composer need beyond the
/// raw `PackerConfig` algorithm knobs.
#[derive(Debug, Clone)]
pub struct BankPipelineOptions {
    pub page_w: u32,
    pub page_h: u32,
    pub pad: u32,
    pub trim: bool,
    pub rotate: bool,
    pub dedupe: bool,
    pub pivot_enabled: bool,
    pub exhaustive: bool,
    pub method: PackMethod,
    pub basename: String,
    pub debug_overlay: Option<u8>,
}

pub struct BankPipelineOutput {
    pub bank: Bank,
    pub pages: Vec<ComposedPage>,
    pub pivot_warnings: Vec<String>,
}

/// Runs crop detection, pivot extraction, duplicate detection, packing and
/// composition over an already-loaded [`AnimationList`], then assembles
/// the bank payload. `anims` is analyzed in place so callers can inspect
/// per-frame flags afterward (e.g. for tests).
pub fn run(
    anims: &mut AnimationList,
    pivot_color: Option<[u8; 3]>,
    opts: &BankPipelineOptions,
    mut progress: impl FnMut(f32),
) -> Result<BankPipelineOutput> {
    anims.normalize_all();
    anims.compute_crops(false);
    let pivot_warnings = anims.extract_pivots(pivot_color);
    anims.detect_duplicates(opts.dedupe);

    let mut rects = build_rect_list(
        anims,
        opts.pad,
        opts.trim,
        opts.dedupe,
        opts.pivot_enabled,
        opts.page_w,
        opts.page_h,
        opts.rotate,
        RectSortOrder::Area,
    )?;

    let mut cfg = PackerConfig {
        max_width: opts.page_w,
        max_height: opts.page_h,
        allow_rotation: opts.rotate,
        border_padding: 0,
        texture_padding: 0,
        texture_extrusion: 0,
        ..PackerConfig::default()
    };
    cfg.trim = opts.trim;
    if matches!(opts.method, PackMethod::MaxRects) {
        // The canonical MaxRects heuristic here is best-short-side-fit.
        cfg.mr_heuristic = crate::config::MaxRectsHeuristic::BestShortSideFit;
    }

    let page_packs = pack_rects(&mut rects, &cfg, opts.method, opts.exhaustive, &mut progress)?;

    let mut pages = Vec::with_capacity(page_packs.len());
    let mut page_sizes = Vec::with_capacity(page_packs.len());
    for pp in &page_packs {
        let composed = compose_page(
            anims,
            pp,
            &rects,
            opts.page_w,
            opts.page_h,
            opts.pad,
            opts.trim,
            opts.debug_overlay,
        );
        page_sizes.push((opts.page_w, opts.page_h));
        pages.push(composed);
    }

    let bank = build_bank(
        anims,
        &rects,
        &page_sizes,
        &opts.basename,
        opts.pad,
        opts.trim,
        opts.dedupe,
    );

    Ok(BankPipelineOutput {
        bank,
        pages,
        pivot_warnings,
    })
}
