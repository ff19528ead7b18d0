use super::{PlaceError, Placer};
use crate::model::{Point, Rect, Size};

/// Anchor-point placer.
///
/// Candidate positions ("anchors") are the top-right and bottom-left corners of
/// already placed rectangles, kept sorted by `x + y` so placement hugs the
/// top-left corner. The area actually in use starts at 1x1 and is doubled (height
/// first while it is the shorter side) until the rectangle fits or the canvas is
/// exhausted. Each placement is then slid left or up, whichever moves it further.
pub struct AnchorPlacer {
    canvas: Size,
    actual_w: u32,
    actual_h: u32,
    anchors: Vec<Point>,
    packed: Vec<Rect>,
}

impl AnchorPlacer {
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            actual_w: canvas.width.min(1),
            actual_h: canvas.height.min(1),
            anchors: vec![Point::new(0, 0)],
            packed: Vec::new(),
        }
    }

    /// Current extent of the area the placer has grown into.
    pub fn used_area(&self) -> Size {
        Size::new(self.actual_w, self.actual_h)
    }

    fn fits_area(r: &Rect, area_w: u32, area_h: u32) -> bool {
        r.w <= area_w && r.x <= area_w - r.w && r.h <= area_h && r.y <= area_h - r.h
    }

    fn is_free(&self, r: &Rect, area_w: u32, area_h: u32) -> bool {
        Self::fits_area(r, area_w, area_h) && !self.packed.iter().any(|p| p.intersects(r))
    }

    fn first_free_anchor(&self, w: u32, h: u32, area_w: u32, area_h: u32) -> Option<usize> {
        self.anchors
            .iter()
            .position(|a| self.is_free(&Rect::new(a.x, a.y, w, h), area_w, area_h))
    }

    fn select_anchor(&mut self, w: u32, h: u32) -> Option<usize> {
        let mut area_w = self.actual_w;
        let mut area_h = self.actual_h;
        loop {
            if let Some(idx) = self.first_free_anchor(w, h, area_w, area_h) {
                self.actual_w = area_w;
                self.actual_h = area_h;
                return Some(idx);
            }
            let can_grow_w = area_w < self.canvas.width;
            let can_grow_h = area_h < self.canvas.height;
            let prefer_h = !can_grow_w || area_h < area_w;
            if can_grow_h && prefer_h {
                area_h = area_h.saturating_mul(2).min(self.canvas.height);
            } else if can_grow_w {
                area_w = area_w.saturating_mul(2).min(self.canvas.width);
            } else {
                return None;
            }
        }
    }

    /// Leftmost x the rect can slide to from `at` without hitting a placed rect.
    /// Same result as stepping one pixel at a time until blocked.
    fn slide_left(&self, at: Point, h: u32) -> u32 {
        let bottom = at.y + h;
        self.packed
            .iter()
            .filter(|p| p.right() <= at.x && p.y < bottom && at.y < p.bottom())
            .map(|p| p.right())
            .max()
            .unwrap_or(0)
    }

    fn slide_up(&self, at: Point, w: u32) -> u32 {
        let right = at.x + w;
        self.packed
            .iter()
            .filter(|p| p.bottom() <= at.y && p.x < right && at.x < p.right())
            .map(|p| p.bottom())
            .max()
            .unwrap_or(0)
    }

    fn optimize(&self, at: Point, w: u32, h: u32) -> Point {
        let left = self.slide_left(at, h);
        let top = self.slide_up(at, w);
        if at.x - left > at.y - top {
            Point::new(left, at.y)
        } else {
            Point::new(at.x, top)
        }
    }

    fn insert_anchor(&mut self, anchor: Point) {
        let rank = |p: &Point| p.x as u64 + p.y as u64;
        let idx = self.anchors.partition_point(|a| rank(a) < rank(&anchor));
        self.anchors.insert(idx, anchor);
    }
}

impl Placer for AnchorPlacer {
    fn try_place(&mut self, width: u32, height: u32) -> Result<Option<Point>, PlaceError> {
        if width == 0 || height == 0 {
            return Err(PlaceError(format!(
                "cannot place zero-sized rectangle {width}x{height}"
            )));
        }
        let Some(idx) = self.select_anchor(width, height) else {
            return Ok(None);
        };
        let anchor = self.anchors[idx];
        let placement = self.optimize(anchor, width, height);

        // Drop the anchor only if the slid rectangle still covers it.
        let covers_anchor = placement.x + width > anchor.x && placement.y + height > anchor.y;
        if covers_anchor {
            self.anchors.remove(idx);
        }
        self.insert_anchor(Point::new(placement.x + width, placement.y));
        self.insert_anchor(Point::new(placement.x, placement.y + height));
        self.packed.push(Rect::new(placement.x, placement.y, width, height));
        Ok(Some(placement))
    }
}
