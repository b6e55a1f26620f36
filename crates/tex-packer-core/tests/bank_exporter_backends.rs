//! Verifies the three bank serializer backends emit the exact field names
//! and event ordering specified for exported frames: `sheet, x, y, w, h,
//! ox, oy, ms, rot`.

use tex_packer_core::prelude::*;

fn sample_bank() -> Bank {
    Bank {
        sheets: vec![BankSheet {
            index: 0,
            file_name: "hero-0.png".to_string(),
            width: 128,
            height: 128,
        }],
        animations: vec![BankAnimation {
            name: "walk".to_string(),
            frames: vec![
                BankFrame {
                    sheet: 0,
                    x: 1,
                    y: 2,
                    w: 16,
                    h: 20,
                    ox: 3,
                    oy: 4,
                    ms: 100,
                    rot: 0,
                },
                BankFrame {
                    sheet: 0,
                    x: 20,
                    y: 2,
                    w: 20,
                    h: 16,
                    ox: 0,
                    oy: 0,
                    ms: 120,
                    rot: 1,
                },
            ],
        }],
    }
}

#[test]
fn xml_backend_emits_expected_fields() {
    let text = drive_exporter(&sample_bank(), XmlExporter::default());
    assert!(text.starts_with("<?xml"));
    assert!(text.contains("<ezspritebank sheets=\"1\" animations=\"1\">"));
    assert!(text.contains("<sheet index=\"0\" w=\"128\" h=\"128\" source=\"hero-0.png\" />"));
    assert!(text.contains("<animation name=\"walk\" frames=\"2\" ms=\"220\">"));
    assert!(text.contains(
        "<frame sheet=\"0\" x=\"1\" y=\"2\" w=\"16\" h=\"20\" ox=\"3\" oy=\"4\" ms=\"100\" rot=\"0\" />"
    ));
    assert!(text.contains("rot=\"1\""));
    assert!(text.trim_end().ends_with("</ezspritebank>"));
}

#[test]
fn json_backend_emits_expected_fields() {
    let text = drive_exporter(&sample_bank(), JsonExporter::default());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["sheets"], 1);
    assert_eq!(value["animations"], 1);
    assert_eq!(value["sheet"][0]["source"], "hero-0.png");
    let anim = &value["animation"][0];
    assert_eq!(anim["name"], "walk");
    assert_eq!(anim["ms"], 220);
    let frame0 = &anim["frame"][0];
    for (field, expected) in [
        ("sheet", 0),
        ("x", 1),
        ("y", 2),
        ("w", 16),
        ("h", 20),
        ("ox", 3),
        ("oy", 4),
        ("ms", 100),
        ("rot", 0),
    ] {
        assert_eq!(frame0[field], expected, "field {field}");
    }
}

#[test]
fn c99_backend_emits_struct_definitions_and_counts() {
    let text = drive_exporter(&sample_bank(), C99Exporter::new("hero"));
    assert!(text.contains("struct EzSpriteFrame {"));
    assert!(text.contains("struct EzSpriteAnimation {"));
    assert!(text.contains("struct EzSpriteSheet {"));
    assert!(text.contains("struct EzSpriteBank hero = {"));
    assert!(text.contains("1, EzSpriteBank_hero_sheets, 1, EzSpriteBank_hero_animations"));
    assert!(text.contains("{ 0, 1, 2, 16, 20, 3, 4, 100, 0 }"));
    assert!(text.contains("{ 0, 20, 2, 20, 16, 0, 0, 120, 1 }"));
}

#[test]
fn drives_events_in_capsule_sheet_animation_frame_order() {
    struct Recorder(Vec<&'static str>);
    impl BankExporter for Recorder {
        fn capsule_begin(&mut self, _s: usize, _a: usize) {
            self.0.push("capsule_begin");
        }
        fn capsule_end(&mut self) {
            self.0.push("capsule_end");
        }
        fn sheet_begin(&mut self, _s: &BankSheet, _f: bool, _l: bool) {
            self.0.push("sheet_begin");
        }
        fn sheet_end(&mut self, _f: bool, _l: bool) {
            self.0.push("sheet_end");
        }
        fn animation_begin(&mut self, _a: &BankAnimation, _f: bool, _l: bool) {
            self.0.push("animation_begin");
        }
        fn animation_end(&mut self, _f: bool, _l: bool) {
            self.0.push("animation_end");
        }
        fn frame_begin(&mut self, _fr: &BankFrame, _f: bool, _l: bool) {
            self.0.push("frame_begin");
        }
        fn frame_end(&mut self, _f: bool, _l: bool) {
            self.0.push("frame_end");
        }
        fn finish(self) -> String {
            self.0.join(",")
        }
    }

    let order = drive_exporter(&sample_bank(), Recorder(Vec::new()));
    assert_eq!(
        order,
        "capsule_begin,sheet_begin,sheet_end,animation_begin,\
frame_begin,frame_end,frame_begin,frame_end,animation_end,capsule_end"
    );
}
