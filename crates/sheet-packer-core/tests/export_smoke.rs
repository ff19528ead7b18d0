use sheet_packer_core::prelude::*;
use sheet_packer_core::{class_name, to_json_array, to_json_hash};

fn layout() -> SheetLayout {
    SheetLayout {
        width: 32,
        height: 16,
        frames: vec![
            Frame {
                key: "icons/Arrow Left.png".into(),
                frame: Rect::new(0, 0, 16, 16),
            },
            Frame {
                key: "icons/b.png".into(),
                frame: Rect::new(16, 0, 16, 8),
            },
        ],
    }
}

#[test]
fn css_rules_follow_frame_order() {
    let css = to_css(&layout(), &CssOptions::default());
    let lines: Vec<&str> = css.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#".icon { background-image: url("sheet.png"); background-repeat: no-repeat; }"#,
            ".arrow-left { background-position: 0 0; width: 16px; height: 16px; }",
            ".b { background-position: -16px 0; width: 16px; height: 8px; }",
        ]
    );
}

#[test]
fn css_uses_custom_class_and_url() {
    let opts = CssOptions {
        base_class: "sprite".into(),
        sheet_url: "../img/ui.png".into(),
    };
    let css = to_css(&layout(), &opts);
    assert!(css.starts_with(r#".sprite { background-image: url("../img/ui.png");"#));
}

#[test]
fn css_for_empty_layout_has_only_base_rule() {
    let empty = SheetLayout {
        width: 1,
        height: 1,
        frames: Vec::new(),
    };
    assert_eq!(to_css(&empty, &CssOptions::default()).lines().count(), 1);
}

#[test]
fn class_names_are_lowercased_stems() {
    assert_eq!(class_name("Save As.png"), "save-as");
    assert_eq!(class_name("dir/sub/Close.PNG"), "close");
    assert_eq!(class_name("plain"), "plain");
}

#[test]
fn export_json_smoke() {
    let cfg = LayoutConfig::builder()
        .with_max_dimensions(256, 256)
        .increment(16)
        .build();
    let sheet = pack_layout(vec![("a", 32, 16), ("b", 10, 10)], &cfg).expect("pack");

    // json-array
    let ja = to_json_array(&sheet);
    let obj = ja.as_object().expect("object");
    assert!(obj.contains_key("frames"));
    assert!(obj.contains_key("meta"));
    assert_eq!(obj["width"], sheet.width);
    let frames = obj["frames"].as_array().expect("frames array");
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0]["key"], "a");
    assert_eq!(frames[1]["frame"]["w"], 10);

    // json-hash
    let jh = to_json_hash(&sheet);
    let obj = jh.as_object().expect("object");
    assert!(obj.contains_key("frames"));
    assert_eq!(obj["meta"]["size"]["w"], sheet.width);
    assert_eq!(obj["meta"]["size"]["h"], sheet.height);
    let b = &obj["frames"]["b"]["frame"];
    let placed = sheet.frame("b").expect("b").frame;
    assert_eq!(b["x"], placed.x);
    assert_eq!(b["y"], placed.y);
}

#[test]
fn layout_serializes_round_trip() {
    let json = serde_json::to_string(&layout()).expect("serialize");
    let back: SheetLayout = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, layout());
}

#[test]
fn stats_report_occupancy() {
    let stats = layout().stats();
    assert_eq!(stats.num_frames, 2);
    assert_eq!(stats.sheet_area, 32 * 16);
    assert_eq!(stats.used_area, 16 * 16 + 16 * 8);
    assert_eq!(stats.wasted_area(), 128);
    assert!((stats.occupancy - 0.75).abs() < 1e-9);
    assert!((stats.waste_percentage() - 25.0).abs() < 1e-9);
    assert!(stats.summary().contains("32x16"));
}
