//! Exporter interface: a structured `capsule/sheet/animation/frame` event
//! stream driven in a fixed order, consumed by pluggable serializers. Three
//! backends are provided: XML, JSON, and a C99 struct-literal dump.

use crate::anim::{AnimationList, FrameRef};
use crate::rectlist::InputRect;
use std::collections::HashMap;
use std::fmt::Write as _;

/// One exported frame record.
#[derive(Debug, Clone, Copy)]
pub struct BankFrame {
    pub sheet: usize,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub ox: i32,
    pub oy: i32,
    pub ms: u32,
    pub rot: u8,
}

#[derive(Debug, Clone)]
pub struct BankAnimation {
    pub name: String,
    pub frames: Vec<BankFrame>,
}

impl BankAnimation {
    /// Total loop duration: the sum of its frames' `ms` (matches the
    /// reference's `get_loopMs`, used as `<animation ms>`).
    pub fn loop_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.ms as u64).sum()
    }
}

#[derive(Debug, Clone)]
pub struct BankSheet {
    pub index: usize,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct Bank {
    pub sheets: Vec<BankSheet>,
    pub animations: Vec<BankAnimation>,
}

/// Builds the `Bank` event payload from the analyzed animation list and
/// its packed rectangles. `basename` names the sibling PNG files
/// (`<basename>-<index>.png`).
pub fn build_bank(
    anims: &AnimationList,
    rects: &[InputRect],
    page_sizes: &[(u32, u32)],
    basename: &str,
    pad: u32,
    trim: bool,
    dedupe: bool,
) -> Bank {
    let sheets = page_sizes
        .iter()
        .enumerate()
        .map(|(i, (w, h))| BankSheet {
            index: i,
            file_name: format!("{basename}-{i}.png"),
            width: *w,
            height: *h,
        })
        .collect();

    let by_frame: HashMap<FrameRef, &InputRect> =
        rects.iter().map(|r| (r.frame_ref, r)).collect();

    let mut animations = Vec::with_capacity(anims.animations.len());
    for (ai, a) in anims.animations.iter().enumerate() {
        let mut frames = Vec::new();
        for (fi, f) in a.frames.iter().enumerate() {
            if f.is_pivot_frame {
                continue;
            }
            let this_ref = FrameRef { anim: ai, frame: fi };
            let lookup_ref = if dedupe {
                f.canonical(anims).unwrap_or(this_ref)
            } else {
                this_ref
            };
            let (cx, cy) = if trim {
                f.crop.map(|c| (c.x, c.y)).unwrap_or((0, 0))
            } else {
                (0, 0)
            };
            let (ox, oy) = match f.pivot {
                Some((px, py)) => (
                    px as i32 - cx as i32 + pad as i32,
                    py as i32 - cy as i32 + pad as i32,
                ),
                None => (0, 0),
            };
            let rec = match by_frame.get(&lookup_ref) {
                Some(r) => {
                    let (cw, ch) = if trim {
                        f.crop.map(|c| (c.w, c.h)).unwrap_or((a.canvas_w, a.canvas_h))
                    } else {
                        (a.canvas_w, a.canvas_h)
                    };
                    let (w, h) = if r.rotated { (ch, cw) } else { (cw, ch) };
                    BankFrame {
                        sheet: r.page.unwrap_or(0),
                        x: r.x + pad,
                        y: r.y + pad,
                        w,
                        h,
                        ox,
                        oy,
                        ms: f.duration_ms,
                        rot: r.rotated as u8,
                    }
                }
                None => BankFrame {
                    sheet: 0,
                    x: 0,
                    y: 0,
                    w: 0,
                    h: 0,
                    ox: 0,
                    oy: 0,
                    ms: f.duration_ms,
                    rot: 0,
                },
            };
            frames.push(rec);
        }
        if frames.is_empty() {
            frames.push(BankFrame {
                sheet: 0,
                x: 0,
                y: 0,
                w: 0,
                h: 0,
                ox: 0,
                oy: 0,
                ms: 1,
                rot: 0,
            });
        }
        animations.push(BankAnimation {
            name: a.name.clone(),
            frames,
        });
    }

    Bank { sheets, animations }
}

/// A pluggable bank serializer driven by [`drive_exporter`] in the strict
/// `capsule/sheet/animation/frame x begin/end` order.
pub trait BankExporter {
    fn capsule_begin(&mut self, sheets: usize, animations: usize);
    fn capsule_end(&mut self);
    fn sheet_begin(&mut self, sheet: &BankSheet, is_first: bool, is_last: bool);
    fn sheet_end(&mut self, is_first: bool, is_last: bool);
    fn animation_begin(&mut self, anim: &BankAnimation, is_first: bool, is_last: bool);
    fn animation_end(&mut self, is_first: bool, is_last: bool);
    fn frame_begin(&mut self, frame: &BankFrame, is_first: bool, is_last: bool);
    fn frame_end(&mut self, is_first: bool, is_last: bool);
    fn finish(self) -> String;
}

/// Drives `exporter` over `bank` in capsule/sheet/animation/frame order,
/// returning the finished bank text.
pub fn drive_exporter<E: BankExporter>(bank: &Bank, mut exporter: E) -> String {
    let n_sheets = bank.sheets.len();
    let n_anims = bank.animations.len();
    exporter.capsule_begin(n_sheets, n_anims);
    for (i, s) in bank.sheets.iter().enumerate() {
        let first = i == 0;
        let last = i + 1 == n_sheets;
        exporter.sheet_begin(s, first, last);
        exporter.sheet_end(first, last);
    }
    for (ai, a) in bank.animations.iter().enumerate() {
        let first = ai == 0;
        let last = ai + 1 == n_anims;
        exporter.animation_begin(a, first, last);
        let n_frames = a.frames.len();
        for (fi, f) in a.frames.iter().enumerate() {
            let ffirst = fi == 0;
            let flast = fi + 1 == n_frames;
            exporter.frame_begin(f, ffirst, flast);
            exporter.frame_end(ffirst, flast);
        }
        exporter.animation_end(first, last);
    }
    exporter.capsule_end();
    exporter.finish()
}

/// `<ezspritebank>` XML backend.
#[derive(Default)]
pub struct XmlExporter {
    out: String,
    cur_anim: String,
}

impl BankExporter for XmlExporter {
    fn capsule_begin(&mut self, sheets: usize, animations: usize) {
        writeln!(self.out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>").unwrap();
        writeln!(
            self.out,
            "<ezspritebank sheets=\"{sheets}\" animations=\"{animations}\">"
        )
        .unwrap();
    }
    fn capsule_end(&mut self) {
        writeln!(self.out, "</ezspritebank>").unwrap();
    }
    fn sheet_begin(&mut self, sheet: &BankSheet, _is_first: bool, _is_last: bool) {
        writeln!(
            self.out,
            "  <sheet index=\"{}\" w=\"{}\" h=\"{}\" source=\"{}\" />",
            sheet.index, sheet.width, sheet.height, sheet.file_name
        )
        .unwrap();
    }
    fn sheet_end(&mut self, _is_first: bool, _is_last: bool) {}
    fn animation_begin(&mut self, anim: &BankAnimation, _is_first: bool, _is_last: bool) {
        self.cur_anim = anim.name.clone();
        writeln!(
            self.out,
            "  <animation name=\"{}\" frames=\"{}\" ms=\"{}\">",
            xml_escape(&anim.name),
            anim.frames.len(),
            anim.loop_ms()
        )
        .unwrap();
    }
    fn animation_end(&mut self, _is_first: bool, _is_last: bool) {
        writeln!(self.out, "  </animation>").unwrap();
    }
    fn frame_begin(&mut self, frame: &BankFrame, _is_first: bool, _is_last: bool) {
        writeln!(
            self.out,
            "    <frame sheet=\"{}\" x=\"{}\" y=\"{}\" w=\"{}\" h=\"{}\" ox=\"{}\" oy=\"{}\" ms=\"{}\" rot=\"{}\" />",
            frame.sheet, frame.x, frame.y, frame.w, frame.h, frame.ox, frame.oy, frame.ms, frame.rot
        )
        .unwrap();
    }
    fn frame_end(&mut self, _is_first: bool, _is_last: bool) {}
    fn finish(self) -> String {
        self.out
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Single-object JSON backend: `{ sheets, animations, sheet: [...], animation: [...] }`.
#[derive(Default)]
pub struct JsonExporter {
    sheets: Vec<serde_json::Value>,
    animations: Vec<serde_json::Value>,
    cur_frames: Vec<serde_json::Value>,
    cur_name: String,
}

impl BankExporter for JsonExporter {
    fn capsule_begin(&mut self, _sheets: usize, _animations: usize) {}
    fn capsule_end(&mut self) {}
    fn sheet_begin(&mut self, sheet: &BankSheet, _is_first: bool, _is_last: bool) {
        self.sheets.push(serde_json::json!({
            "index": sheet.index,
            "source": sheet.file_name,
            "w": sheet.width,
            "h": sheet.height,
        }));
    }
    fn sheet_end(&mut self, _is_first: bool, _is_last: bool) {}
    fn animation_begin(&mut self, anim: &BankAnimation, _is_first: bool, _is_last: bool) {
        self.cur_name = anim.name.clone();
        self.cur_frames = Vec::with_capacity(anim.frames.len());
    }
    fn animation_end(&mut self, _is_first: bool, _is_last: bool) {
        let ms: u64 = self
            .cur_frames
            .iter()
            .filter_map(|f| f.get("ms").and_then(|v| v.as_u64()))
            .sum();
        self.animations.push(serde_json::json!({
            "name": self.cur_name,
            "frames": self.cur_frames.len(),
            "ms": ms,
            "frame": self.cur_frames,
        }));
    }
    fn frame_begin(&mut self, frame: &BankFrame, index: bool, _is_last: bool) {
        let _ = index;
        self.cur_frames.push(serde_json::json!({
            "index": self.cur_frames.len(),
            "sheet": frame.sheet,
            "x": frame.x,
            "y": frame.y,
            "w": frame.w,
            "h": frame.h,
            "ox": frame.ox,
            "oy": frame.oy,
            "ms": frame.ms,
            "rot": frame.rot,
        }));
    }
    fn frame_end(&mut self, _is_first: bool, _is_last: bool) {}
    fn finish(self) -> String {
        let root = serde_json::json!({
            "sheets": self.sheets.len(),
            "animations": self.animations.len(),
            "sheet": self.sheets,
            "animation": self.animations,
        });
        serde_json::to_string_pretty(&root).expect("bank JSON always serializes")
    }
}

/// C99 header backend: nested designated-initializer-free struct literals
/// for `EzSpriteSheet`/`EzSpriteFrame`/`EzSpriteAnimation`/`EzSpriteBank`.
pub struct C99Exporter {
    out: String,
    name: String,
    frame_lits: Vec<String>,
    anim_lits: Vec<String>,
    cur_frames: Vec<String>,
    cur_anim_name: String,
    cur_anim_ms: u64,
    sheet_count: usize,
    anim_count: usize,
}

impl C99Exporter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            out: String::new(),
            name: name.into(),
            frame_lits: Vec::new(),
            anim_lits: Vec::new(),
            cur_frames: Vec::new(),
            cur_anim_name: String::new(),
            cur_anim_ms: 0,
            sheet_count: 0,
            anim_count: 0,
        }
    }
}

impl BankExporter for C99Exporter {
    fn capsule_begin(&mut self, sheets: usize, animations: usize) {
        self.sheet_count = sheets;
        self.anim_count = animations;
        writeln!(self.out, "#ifndef EZSPRITEBANK_{}_H", self.name.to_ascii_uppercase()).unwrap();
        writeln!(self.out, "#define EZSPRITEBANK_{}_H", self.name.to_ascii_uppercase()).unwrap();
        writeln!(self.out).unwrap();
        writeln!(self.out, "struct EzSpriteFrame {{").unwrap();
        writeln!(self.out, "    int sheet, x, y, w, h, ox, oy, ms, rot;").unwrap();
        writeln!(self.out, "}};").unwrap();
        writeln!(self.out, "struct EzSpriteAnimation {{").unwrap();
        writeln!(self.out, "    const char *name;").unwrap();
        writeln!(self.out, "    int frameCount;").unwrap();
        writeln!(self.out, "    int ms;").unwrap();
        writeln!(self.out, "    const struct EzSpriteFrame *frames;").unwrap();
        writeln!(self.out, "}};").unwrap();
        writeln!(self.out, "struct EzSpriteSheet {{").unwrap();
        writeln!(self.out, "    const char *source;").unwrap();
        writeln!(self.out, "    int w, h;").unwrap();
        writeln!(self.out, "}};").unwrap();
        writeln!(self.out, "struct EzSpriteBank {{").unwrap();
        writeln!(self.out, "    int sheetCount;").unwrap();
        writeln!(self.out, "    const struct EzSpriteSheet *sheets;").unwrap();
        writeln!(self.out, "    int animationCount;").unwrap();
        writeln!(self.out, "    const struct EzSpriteAnimation *animations;").unwrap();
        writeln!(self.out, "}};").unwrap();
        writeln!(self.out).unwrap();
    }
    fn capsule_end(&mut self) {
        let sheets_arr = format!("EzSpriteBank_{}_sheets", self.name);
        let anims_arr = format!("EzSpriteBank_{}_animations", self.name);
        writeln!(self.out, "struct EzSpriteBank {} = {{", self.name).unwrap();
        writeln!(
            self.out,
            "    {}, {}, {}, {}",
            self.sheet_count, sheets_arr, self.anim_count, anims_arr
        )
        .unwrap();
        writeln!(self.out, "}};").unwrap();
        writeln!(self.out).unwrap();
        writeln!(self.out, "#endif").unwrap();
    }
    fn sheet_begin(&mut self, sheet: &BankSheet, is_first: bool, _is_last: bool) {
        if is_first {
            writeln!(
                self.out,
                "static const struct EzSpriteSheet EzSpriteBank_{}_sheets[] = {{",
                self.name
            )
            .unwrap();
        }
        writeln!(
            self.out,
            "    {{ \"{}\", {}, {} }},",
            sheet.file_name, sheet.width, sheet.height
        )
        .unwrap();
    }
    fn sheet_end(&mut self, _is_first: bool, is_last: bool) {
        if is_last {
            writeln!(self.out, "}};").unwrap();
            writeln!(self.out).unwrap();
        }
    }
    fn animation_begin(&mut self, anim: &BankAnimation, _is_first: bool, _is_last: bool) {
        self.cur_anim_name = anim.name.clone();
        self.cur_anim_ms = anim.loop_ms();
        self.cur_frames.clear();
    }
    fn animation_end(&mut self, is_first: bool, is_last: bool) {
        let frames_arr = format!(
            "EzSpriteBank_{}_anim_{}_frames",
            self.name,
            self.anim_lits.len()
        );
        writeln!(
            self.out,
            "static const struct EzSpriteFrame {}[] = {{",
            frames_arr
        )
        .unwrap();
        for f in &self.cur_frames {
            writeln!(self.out, "    {f},").unwrap();
        }
        writeln!(self.out, "}};").unwrap();
        self.anim_lits.push(format!(
            "{{ \"{}\", {}, {}, {} }}",
            self.cur_anim_name,
            self.cur_frames.len(),
            self.cur_anim_ms,
            frames_arr
        ));
        if is_first {
            writeln!(
                self.out,
                "static const struct EzSpriteAnimation EzSpriteBank_{}_animations[] = {{",
                self.name
            )
            .unwrap();
        }
        writeln!(self.out, "    {},", self.anim_lits.last().unwrap()).unwrap();
        if is_last {
            writeln!(self.out, "}};").unwrap();
            writeln!(self.out).unwrap();
        }
    }
    fn frame_begin(&mut self, frame: &BankFrame, _is_first: bool, _is_last: bool) {
        self.frame_lits.push(format!(
            "{{ {}, {}, {}, {}, {}, {}, {}, {}, {} }}",
            frame.sheet, frame.x, frame.y, frame.w, frame.h, frame.ox, frame.oy, frame.ms, frame.rot
        ));
        self.cur_frames.push(self.frame_lits.last().unwrap().clone());
    }
    fn frame_end(&mut self, _is_first: bool, _is_last: bool) {}
    fn finish(self) -> String {
        self.out
    }
}
