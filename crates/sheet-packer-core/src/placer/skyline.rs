use super::{PlaceError, Placer};
use crate::config::SkylineHeuristic;
use crate::model::{Point, Rect, Size};

/// Horizontal run of the skyline: columns `x..x + w` are free from row `y` down.
#[derive(Clone, Copy, Debug)]
struct Segment {
    x: u32,
    y: u32,
    w: u32,
}

impl Segment {
    fn end(&self) -> u32 {
        self.x + self.w
    }
}

/// Skyline placer: keeps the lowest free row per run of columns and drops each
/// rectangle onto the skyline starting at a segment's left edge.
pub struct SkylinePlacer {
    canvas: Size,
    segments: Vec<Segment>,
    heuristic: SkylineHeuristic,
}

/// A candidate position: the segment it starts on and the rect it would occupy.
#[derive(Clone, Copy)]
struct Candidate {
    start: usize,
    rect: Rect,
}

impl SkylinePlacer {
    pub fn new(canvas: Size, heuristic: SkylineHeuristic) -> Self {
        Self {
            canvas,
            segments: vec![Segment {
                x: 0,
                y: 0,
                w: canvas.width,
            }],
            heuristic,
        }
    }

    /// Resting position of a `w`x`h` rect whose left edge is on segment `start`:
    /// its top is the highest skyline row among the segments it spans.
    fn fit_at(&self, start: usize, w: u32, h: u32) -> Option<Candidate> {
        let x = self.segments[start].x;
        if w > self.canvas.width - x {
            return None;
        }
        let right = x + w;
        let y = self.segments[start..]
            .iter()
            .take_while(|s| s.x < right)
            .map(|s| s.y)
            .max()?;
        if h > self.canvas.height - y {
            return None;
        }
        Some(Candidate {
            start,
            rect: Rect::new(x, y, w, h),
        })
    }

    /// Area left unusable beneath `rect` between it and the skyline.
    fn waste_under(&self, c: &Candidate) -> u64 {
        let right = c.rect.right();
        self.segments[c.start..]
            .iter()
            .take_while(|s| s.x < right)
            .map(|s| {
                let covered = s.end().min(right) - s.x;
                (c.rect.y - s.y) as u64 * covered as u64
            })
            .sum()
    }

    fn best_candidate(&self, w: u32, h: u32) -> Option<Candidate> {
        let candidates = (0..self.segments.len()).filter_map(|i| self.fit_at(i, w, h));
        match self.heuristic {
            // Lowest bottom edge; ties go to the narrower starting segment, then the leftmost.
            SkylineHeuristic::BottomLeft => candidates
                .min_by_key(|c| (c.rect.bottom(), self.segments[c.start].w, c.start)),
            SkylineHeuristic::MinWaste => {
                candidates.min_by_key(|c| (self.waste_under(c), c.rect.bottom(), c.start))
            }
        }
    }

    /// Raise the skyline under `rect`, trimming or dropping the segments it covers.
    fn raise(&mut self, c: &Candidate) {
        let right = c.rect.right();
        let mut tail = self.segments.split_off(c.start);
        tail.retain_mut(|s| {
            if s.end() <= right {
                return false;
            }
            if s.x < right {
                s.w = s.end() - right;
                s.x = right;
            }
            true
        });
        self.segments.push(Segment {
            x: c.rect.x,
            y: c.rect.bottom(),
            w: c.rect.w,
        });
        self.segments.extend(tail);
        self.coalesce();
    }

    /// Join neighbouring segments that sit on the same row.
    fn coalesce(&mut self) {
        let mut out: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for s in self.segments.drain(..) {
            match out.last_mut() {
                Some(prev) if prev.y == s.y => prev.w += s.w,
                _ => out.push(s),
            }
        }
        self.segments = out;
    }
}

impl Placer for SkylinePlacer {
    fn try_place(&mut self, width: u32, height: u32) -> Result<Option<Point>, PlaceError> {
        if width == 0 || height == 0 {
            return Err(PlaceError(format!(
                "cannot place zero-sized rectangle {width}x{height}"
            )));
        }
        let Some(c) = self.best_candidate(width, height) else {
            return Ok(None);
        };
        self.raise(&c);
        Ok(Some(c.rect.origin()))
    }
}
