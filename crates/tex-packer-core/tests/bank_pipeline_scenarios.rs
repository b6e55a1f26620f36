//! End-to-end scenarios over the animation/bank pipeline, built from
//! in-memory pixel buffers rather than checked-in PNG/GIF fixtures,
//! following the crate's existing `tests/boundary_conditions.rs` practice
//! of constructing inputs directly in Rust.

use tex_packer_core::prelude::*;
use tex_packer_core::TexPackerError;

fn solid(w: u32, h: u32, color: [u8; 4]) -> Vec<u8> {
    let mut v = vec![0u8; (w * h * 4) as usize];
    for px in v.chunks_exact_mut(4) {
        px.copy_from_slice(&color);
    }
    v
}

fn set_pixel(pixels: &mut [u8], canvas_w: u32, x: u32, y: u32, color: [u8; 4]) {
    let idx = (((y * canvas_w) + x) * 4) as usize;
    pixels[idx..idx + 4].copy_from_slice(&color);
}

fn default_opts(page_w: u32, page_h: u32) -> BankPipelineOptions {
    BankPipelineOptions {
        page_w,
        page_h,
        pad: 0,
        trim: true,
        rotate: false,
        dedupe: false,
        pivot_enabled: false,
        exhaustive: false,
        method: PackMethod::Guillotine,
        basename: "bank".to_string(),
        debug_overlay: None,
    }
}

/// Scenario 1: a single still opaque image.
#[test]
fn scenario_single_still_png() {
    let mut anims = AnimationList::new();
    anims
        .animations
        .push(Animation::still("img".into(), 32, 32, solid(32, 32, [255, 0, 0, 255])));

    let opts = default_opts(64, 64);
    let out = bank_pipeline::run(&mut anims, None, &opts, |_| {}).unwrap();

    assert_eq!(out.pages.len(), 1);
    assert!((out.pages[0].occupancy - 0.25).abs() < 1e-6);
    assert_eq!(out.bank.animations.len(), 1);
    let anim = &out.bank.animations[0];
    assert_eq!(anim.name, "img");
    assert_eq!(anim.frames.len(), 1);
    let f = anim.frames[0];
    assert_eq!((f.sheet, f.x, f.y, f.w, f.h, f.ox, f.oy, f.ms, f.rot), (0, 0, 0, 32, 32, 0, 0, 1, 0));
}

/// Scenario 2: two frames with identical pixel content dedupe to one
/// Input Rectangle, and both animations reference the same placement.
#[test]
fn scenario_duplicate_detection() {
    let mut anims = AnimationList::new();
    let content = solid(16, 16, [9, 9, 9, 255]);
    anims
        .animations
        .push(Animation::still("a".into(), 16, 16, content.clone()));
    anims
        .animations
        .push(Animation::still("b".into(), 16, 16, content));

    let mut opts = default_opts(64, 64);
    opts.dedupe = true;
    let out = bank_pipeline::run(&mut anims, None, &opts, |_| {}).unwrap();

    assert_eq!(out.pages.len(), 1);
    assert_eq!(out.pages[0].rects, 1, "the duplicate must not get its own Input Rectangle");

    let fa = out.bank.animations[0].frames[0];
    let fb = out.bank.animations[1].frames[0];
    assert_eq!((fa.sheet, fa.x, fa.y, fa.w, fa.h), (fb.sheet, fb.x, fb.y, fb.w, fb.h));
}

/// Scenario 3: a 4-frame animation whose last frame carries a pivot
/// sentinel pixel; the pivot propagates backward and the sentinel frame
/// is excluded from the bank.
#[test]
fn scenario_pivot_propagation() {
    let w = 32u32;
    let h = 32u32;
    let mut frames = Vec::new();
    for _ in 0..3 {
        frames.push(AnimFrame::new(solid(w, h, [10, 20, 30, 255]), 100));
    }
    let mut last = solid(w, h, [10, 20, 30, 255]);
    set_pixel(&mut last, w, 10, 5, [0, 255, 0, 255]);
    frames.push(AnimFrame::new(last, 1));

    let mut anims = AnimationList::new();
    anims.animations.push(Animation::new("walk".into(), w, h, frames));

    let mut opts = default_opts(128, 128);
    opts.pivot_enabled = true;
    let out = bank_pipeline::run(&mut anims, Some([0, 255, 0]), &opts, |_| {}).unwrap();

    assert!(out.pivot_warnings.is_empty());
    for i in 0..3 {
        assert_eq!(anims.animations[0].frames[i].pivot, Some((10, 5)));
        assert!(!anims.animations[0].frames[i].is_pivot_frame);
    }
    assert!(anims.animations[0].frames[3].is_pivot_frame);

    let anim = &out.bank.animations[0];
    assert_eq!(anim.frames.len(), 3, "the pivot sentinel frame is omitted from the bank");
}

/// Scenario 4: a tall-thin and a short-wide rectangle only both fit one
/// page when rotation is allowed; the rotated frame's emitted dimensions
/// are swapped relative to its source.
#[test]
fn scenario_rotation_saves_space() {
    let mut anims = AnimationList::new();
    anims
        .animations
        .push(Animation::still("tall".into(), 8, 60, solid(8, 60, [1, 2, 3, 255])));
    anims
        .animations
        .push(Animation::still("wide".into(), 60, 8, solid(60, 8, [4, 5, 6, 255])));

    let mut opts = default_opts(64, 64);
    opts.rotate = true;
    opts.trim = false;
    let out = bank_pipeline::run(&mut anims, None, &opts, |_| {}).unwrap();

    assert_eq!(out.pages.len(), 1, "rotation must let both rectangles share one page");
    let tall = out.bank.animations[0].frames[0];
    let wide = out.bank.animations[1].frames[0];
    for (f, (src_w, src_h)) in [(tall, (8u32, 60u32)), (wide, (60u32, 8u32))] {
        if f.rot == 1 {
            assert_eq!((f.w, f.h), (src_h, src_w), "a rotated frame swaps w/h on the sheet");
        } else {
            assert_eq!((f.w, f.h), (src_w, src_h));
        }
    }
    assert!(tall.rot == 1 || wide.rot == 1, "at least one rectangle must be rotated to fit together");
}

/// Scenario 5: exhaustive packing never needs more pages than
/// non-exhaustive packing for the same admitted rectangles, because an
/// exhaustive page always contains a superset of what a non-exhaustive
/// page would place before closing (exact placements are heuristic
/// dependent, so only the ordering relationship is asserted).
#[test]
fn scenario_exhaustive_packs_at_least_as_well() {
    fn build() -> AnimationList {
        let mut anims = AnimationList::new();
        anims
            .animations
            .push(Animation::still("big".into(), 50, 50, solid(50, 50, [1, 0, 0, 255])));
        anims
            .animations
            .push(Animation::still("mid1".into(), 30, 30, solid(30, 30, [0, 1, 0, 255])));
        anims
            .animations
            .push(Animation::still("mid2".into(), 30, 30, solid(30, 30, [0, 0, 1, 255])));
        anims
    }

    let mut non_exhaustive = build();
    let mut opts = default_opts(64, 64);
    opts.exhaustive = false;
    let out_ne = bank_pipeline::run(&mut non_exhaustive, None, &opts, |_| {}).unwrap();

    let mut exhaustive = build();
    opts.exhaustive = true;
    let out_e = bank_pipeline::run(&mut exhaustive, None, &opts, |_| {}).unwrap();

    assert!(out_e.pages.len() <= out_ne.pages.len());
}

/// Scenario 6: two pivot-color matches in the same frame abort the pivot
/// pass with a warning naming the animation and frame, clear every
/// pivot, and packing still completes.
#[test]
fn scenario_multi_match_pivot_warning() {
    let w = 16u32;
    let h = 16u32;
    let mut frames = Vec::new();
    frames.push(AnimFrame::new(solid(w, h, [10, 20, 30, 255]), 100));
    let mut last = solid(w, h, [10, 20, 30, 255]);
    set_pixel(&mut last, w, 1, 1, [0, 255, 0, 255]);
    set_pixel(&mut last, w, 5, 5, [0, 255, 0, 255]);
    frames.push(AnimFrame::new(last, 1));

    let mut anims = AnimationList::new();
    anims.animations.push(Animation::new("blink".into(), w, h, frames));

    let mut opts = default_opts(64, 64);
    opts.pivot_enabled = true;
    let out = bank_pipeline::run(&mut anims, Some([0, 255, 0]), &opts, |_| {}).unwrap();

    assert_eq!(out.pivot_warnings.len(), 1);
    assert!(out.pivot_warnings[0].contains("blink"));
    for f in &anims.animations[0].frames {
        assert!(f.pivot.is_none());
        assert!(!f.is_pivot_frame);
    }
}

/// Quantified invariant: packed rectangles on the same page lie within
/// page bounds and never overlap.
#[test]
fn packed_rectangles_are_disjoint_and_in_bounds() {
    let mut anims = AnimationList::new();
    let sizes = [(20u32, 20u32), (15, 25), (30, 10), (12, 12), (40, 8)];
    for (i, (w, h)) in sizes.iter().enumerate() {
        anims.animations.push(Animation::still(
            format!("r{i}"),
            *w,
            *h,
            solid(*w, *h, [i as u8, 0, 0, 255]),
        ));
    }

    let opts = default_opts(64, 64);
    let out = bank_pipeline::run(&mut anims, None, &opts, |_| {}).unwrap();

    let mut placed: Vec<(usize, u32, u32, u32, u32)> = Vec::new();
    for anim in &out.bank.animations {
        for f in &anim.frames {
            assert!(f.x + f.w <= 64 && f.y + f.h <= 64, "rectangle must lie within page bounds");
            placed.push((f.sheet, f.x, f.y, f.w, f.h));
        }
    }
    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            let (sa, xa, ya, wa, ha) = placed[i];
            let (sb, xb, yb, wb, hb) = placed[j];
            if sa != sb {
                continue;
            }
            let disjoint = xa + wa <= xb || xb + wb <= xa || ya + ha <= yb || yb + hb <= ya;
            assert!(disjoint, "rectangles {:?} and {:?} overlap", placed[i], placed[j]);
        }
    }
}

/// Quantified invariant: two runs with identical inputs and settings
/// produce byte-identical bank output.
#[test]
fn identical_runs_produce_identical_bank_bytes() {
    fn build() -> AnimationList {
        let mut anims = AnimationList::new();
        anims
            .animations
            .push(Animation::still("a".into(), 24, 24, solid(24, 24, [7, 7, 7, 255])));
        anims
            .animations
            .push(Animation::still("b".into(), 18, 12, solid(18, 12, [3, 4, 5, 255])));
        anims
    }

    let opts = default_opts(64, 64);
    let mut first = build();
    let out1 = bank_pipeline::run(&mut first, None, &opts, |_| {}).unwrap();
    let mut second = build();
    let out2 = bank_pipeline::run(&mut second, None, &opts, |_| {}).unwrap();

    let xml1 = drive_exporter(&out1.bank, XmlExporter::default());
    let xml2 = drive_exporter(&out2.bank, XmlExporter::default());
    assert_eq!(xml1, xml2);
    assert_eq!(out1.pages[0].rgba.as_raw(), out2.pages[0].rgba.as_raw());
}

/// Boundary: an animation whose filtered bank frame list is empty (here,
/// because its one frame is flagged as a pivot sentinel directly) falls
/// back to a single synthetic blank record.
#[test]
fn pivot_only_animation_emits_synthetic_blank_record() {
    let mut anims = AnimationList::new();
    anims
        .animations
        .push(Animation::still("only_pivot".into(), 4, 4, solid(4, 4, [1, 1, 1, 255])));
    anims.animations[0].frames[0].is_pivot_frame = true;
    anims.normalize_all();
    anims.compute_crops(true);

    let rects: Vec<InputRect> = Vec::new();
    let bank = build_bank(&anims, &rects, &[(64, 64)], "bank", 0, true, false);

    assert_eq!(bank.animations.len(), 1);
    let frames = &bank.animations[0].frames;
    assert_eq!(frames.len(), 1);
    assert_eq!((frames[0].w, frames[0].h, frames[0].ms), (0, 0, 1));
}

/// Boundary: a rectangle exactly the size of the page occupies it fully.
#[test]
fn exact_page_size_rectangle_yields_full_occupancy() {
    let mut anims = AnimationList::new();
    anims
        .animations
        .push(Animation::still("full".into(), 64, 64, solid(64, 64, [8, 8, 8, 255])));

    let opts = default_opts(64, 64);
    let out = bank_pipeline::run(&mut anims, None, &opts, |_| {}).unwrap();

    assert_eq!(out.pages.len(), 1);
    assert!((out.pages[0].occupancy - 1.0).abs() < 1e-6);
}

/// Boundary: a rectangle one pixel larger than the page in both
/// dimensions is rejected with `FrameTooBig`, not silently dropped.
#[test]
fn oversized_rectangle_is_rejected_with_frame_too_big() {
    let mut anims = AnimationList::new();
    anims.animations.push(Animation::still(
        "huge".into(),
        65,
        65,
        solid(65, 65, [2, 2, 2, 255]),
    ));

    let opts = default_opts(64, 64);
    let err = bank_pipeline::run(&mut anims, None, &opts, |_| {}).unwrap_err();
    assert!(matches!(err, TexPackerError::FrameTooBig { .. }));
}
