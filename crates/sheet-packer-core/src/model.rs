use serde::{Deserialize, Serialize};

/// Width/height pair in pixels (canvas bounds and item sizes).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// Top-left origin of a placed rectangle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    pub fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }
    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }
    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if the interiors of `self` and `r` overlap. Touching edges do not count.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.right() || r.x >= self.right() || self.y >= r.bottom() || r.y >= self.bottom())
    }
}

/// An image to be placed on the sheet.
///
/// `width`/`height` are read-only for the duration of a layout; `position` is
/// written once when a layout succeeds and left untouched when it fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetItem {
    /// Stable identity (typically the source file path).
    pub key: String,
    pub width: u32,
    pub height: u32,
    /// Top-left position on the sheet; `None` until a layout succeeds.
    #[serde(default)]
    pub position: Option<Point>,
}

impl SheetItem {
    pub fn new(key: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
            position: None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Placed rectangle, if the item has been laid out.
    pub fn bounds(&self) -> Option<Rect> {
        self.position.map(|p| Rect::at(p, self.size()))
    }
}

/// A placed item within the sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Frame {
    pub key: String,
    pub frame: Rect,
}

/// Accepted sheet size and one frame per input item, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetLayout {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Frame>,
}

impl SheetLayout {
    /// Builds a layout from laid-out items. Items without a position are skipped.
    pub fn from_items(size: Size, items: &[SheetItem]) -> Self {
        let frames = items
            .iter()
            .filter_map(|it| {
                it.bounds().map(|frame| Frame {
                    key: it.key.clone(),
                    frame,
                })
            })
            .collect();
        Self {
            width: size.width,
            height: size.height,
            frames,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Looks up a frame by key.
    pub fn frame(&self, key: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.key == key)
    }

    /// Computes packing statistics for this sheet.
    pub fn stats(&self) -> SheetStats {
        let sheet_area = self.size().area();
        let used_area: u64 = self
            .frames
            .iter()
            .map(|f| (f.frame.w as u64) * (f.frame.h as u64))
            .sum();
        let occupancy = if sheet_area > 0 {
            used_area as f64 / sheet_area as f64
        } else {
            0.0
        };
        SheetStats {
            num_frames: self.frames.len(),
            width: self.width,
            height: self.height,
            sheet_area,
            used_area,
            occupancy,
        }
    }
}

/// Statistics about sheet packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SheetStats {
    pub num_frames: usize,
    pub width: u32,
    pub height: u32,
    /// `width * height` of the accepted sheet.
    pub sheet_area: u64,
    /// Sum of frame areas.
    pub used_area: u64,
    /// Occupancy ratio: used_area / sheet_area (0.0 to 1.0).
    /// Higher is better (less wasted space).
    pub occupancy: f64,
}

impl SheetStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Sheet: {}x{}, Frames: {}, Occupancy: {:.2}%, Used Area: {} px², Wasted: {} px²",
            self.width,
            self.height,
            self.num_frames,
            self.occupancy * 100.0,
            self.used_area,
            self.wasted_area(),
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.sheet_area.saturating_sub(self.used_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.sheet_area > 0 {
            (self.wasted_area() as f64 / self.sheet_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
