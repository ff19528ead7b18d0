use crate::model::SheetLayout;
use serde_json::{Value, json};

fn meta(layout: &SheetLayout) -> Value {
    json!({
        "app": "sheet-packer",
        "version": env!("CARGO_PKG_VERSION"),
        "size": {"w": layout.width, "h": layout.height},
    })
}

/// Serialize the sheet as `{ width, height, frames: [ {key, frame} ], meta }`.
/// Frames keep layout order.
pub fn to_json_array(layout: &SheetLayout) -> Value {
    let frames: Vec<Value> = layout
        .frames
        .iter()
        .map(|fr| {
            json!({
                "key": fr.key,
                "frame": {"x": fr.frame.x, "y": fr.frame.y, "w": fr.frame.w, "h": fr.frame.h},
            })
        })
        .collect();
    json!({
        "width": layout.width,
        "height": layout.height,
        "frames": frames,
        "meta": meta(layout),
    })
}

/// Frames keyed by name.
/// Shape: `{ frames: { name: { frame: {x,y,w,h} } }, meta }`.
pub fn to_json_hash(layout: &SheetLayout) -> Value {
    let mut frames = serde_json::Map::new();
    for fr in &layout.frames {
        frames.insert(
            fr.key.clone(),
            json!({
                "frame": {"x": fr.frame.x, "y": fr.frame.y, "w": fr.frame.w, "h": fr.frame.h},
            }),
        );
    }
    json!({ "frames": frames, "meta": meta(layout) })
}
