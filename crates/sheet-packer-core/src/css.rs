use crate::model::SheetLayout;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// Options for stylesheet emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CssOptions {
    /// Class carrying the shared `background-image` rule.
    pub base_class: String,
    /// Sheet image URL as referenced from the stylesheet.
    pub sheet_url: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            base_class: "icon".into(),
            sheet_url: "sheet.png".into(),
        }
    }
}

/// Renders one base rule plus one rule per frame, in frame order:
///
/// ```text
/// .icon { background-image: url("sheet.png"); background-repeat: no-repeat; }
/// .arrow-left { background-position: -16px 0; width: 16px; height: 16px; }
/// ```
pub fn to_css(layout: &SheetLayout, opts: &CssOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        ".{} {{ background-image: url(\"{}\"); background-repeat: no-repeat; }}",
        opts.base_class, opts.sheet_url
    );
    for f in &layout.frames {
        let _ = writeln!(
            out,
            ".{} {{ background-position: {} {}; width: {}; height: {}; }}",
            class_name(&f.key),
            pixels(-(f.frame.x as i64)),
            pixels(-(f.frame.y as i64)),
            pixels(f.frame.w as i64),
            pixels(f.frame.h as i64),
        );
    }
    out
}

/// CSS class for a frame key: file stem, lowercased, spaces replaced by `-`.
pub fn class_name(key: &str) -> String {
    let stem = Path::new(key)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(key);
    stem.to_lowercase().replace(' ', "-")
}

fn pixels(v: i64) -> String {
    if v == 0 { "0".into() } else { format!("{v}px") }
}
