use super::{PlaceError, Placer};
use crate::config::MaxRectsHeuristic;
use crate::model::{Point, Rect, Size};

pub struct MaxRectsPlacer {
    canvas: Rect,
    free: Vec<Rect>,
    used: Vec<Rect>,
    heuristic: MaxRectsHeuristic,
}

impl MaxRectsPlacer {
    pub fn new(canvas: Size, heuristic: MaxRectsHeuristic) -> Self {
        let canvas = Rect::new(0, 0, canvas.width, canvas.height);
        Self {
            canvas,
            free: vec![canvas],
            used: Vec::new(),
            heuristic,
        }
    }

    pub fn free_list_len(&self) -> usize {
        self.free.len()
    }

    fn place_rect(&mut self, node: &Rect) {
        // split all free rectangles that intersect with node
        let mut new_free: Vec<Rect> = Vec::with_capacity(self.free.len() + 4);
        for fr in self.free.iter() {
            if !fr.intersects(node) {
                new_free.push(*fr);
                continue;
            }
            let ix1 = fr.x.max(node.x);
            let iy1 = fr.y.max(node.y);
            let ix2 = fr.right().min(node.right());
            let iy2 = fr.bottom().min(node.bottom());

            // above
            if iy1 > fr.y {
                new_free.push(Rect::new(fr.x, fr.y, fr.w, iy1 - fr.y));
            }
            // below
            if iy2 < fr.bottom() {
                new_free.push(Rect::new(fr.x, iy2, fr.w, fr.bottom() - iy2));
            }
            // left
            if ix1 > fr.x {
                new_free.push(Rect::new(fr.x, fr.y, ix1 - fr.x, fr.h));
            }
            // right
            if ix2 < fr.right() {
                new_free.push(Rect::new(ix2, fr.y, fr.right() - ix2, fr.h));
            }
        }

        self.free = new_free;
        self.prune_free_list();
        self.used.push(*node);
    }

    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let a = self.free[i];
            let mut remove_i = false;
            let mut j = i + 1;
            while j < self.free.len() {
                let b = self.free[j];
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                if a.contains(&b) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if remove_i {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn score(&self, fr: &Rect, w: u32, h: u32) -> (i64, i64) {
        let leftover_h = (fr.w - w) as i64;
        let leftover_v = (fr.h - h) as i64;
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);
        let area_fit = (fr.w as i64) * (fr.h as i64) - (w as i64) * (h as i64);
        match self.heuristic {
            MaxRectsHeuristic::BestAreaFit => (area_fit, short_fit),
            MaxRectsHeuristic::BestShortSideFit => (short_fit, long_fit),
            MaxRectsHeuristic::BestLongSideFit => (long_fit, short_fit),
            MaxRectsHeuristic::BottomLeft => ((fr.y as i64) + (h as i64), fr.x as i64),
            MaxRectsHeuristic::ContactPoint => {
                // maximize contact score: use negative for minimization
                let contact = self.contact_point_score(&Rect::new(fr.x, fr.y, w, h));
                (-(contact as i64), area_fit)
            }
        }
    }

    fn find_position(&self, w: u32, h: u32) -> Option<Rect> {
        let mut best: Option<(i64, i64, Rect)> = None;
        for fr in &self.free {
            if fr.w < w || fr.h < h {
                continue;
            }
            // perfect fit early-out
            if fr.w == w && fr.h == h {
                return Some(Rect::new(fr.x, fr.y, w, h));
            }
            let (s1, s2) = self.score(fr, w, h);
            let better = match best {
                None => true,
                Some((b1, b2, br)) => {
                    // tie-break: prefer smaller top side, then smaller x
                    (s1, s2, fr.y, fr.x) < (b1, b2, br.y, br.x)
                }
            };
            if better {
                best = Some((s1, s2, Rect::new(fr.x, fr.y, w, h)));
            }
        }
        best.map(|(_, _, r)| r)
    }

    fn contact_point_score(&self, node: &Rect) -> u64 {
        let mut score = 0u64;
        // contact with canvas edges
        if node.x == self.canvas.x {
            score += node.h as u64;
        }
        if node.y == self.canvas.y {
            score += node.w as u64;
        }
        if node.right() == self.canvas.right() {
            score += node.h as u64;
        }
        if node.bottom() == self.canvas.bottom() {
            score += node.w as u64;
        }

        // contact with used rectangles
        for u in &self.used {
            if node.x == u.right() || u.x == node.right() {
                score += overlap_1d(node.y, node.bottom(), u.y, u.bottom()) as u64;
            }
            if node.y == u.bottom() || u.y == node.bottom() {
                score += overlap_1d(node.x, node.right(), u.x, u.right()) as u64;
            }
        }
        score
    }
}

fn overlap_1d(a1: u32, a2: u32, b1: u32, b2: u32) -> u32 {
    let start = a1.max(b1);
    let end = a2.min(b2);
    end.saturating_sub(start)
}

impl Placer for MaxRectsPlacer {
    fn try_place(&mut self, width: u32, height: u32) -> Result<Option<Point>, PlaceError> {
        if width == 0 || height == 0 {
            return Err(PlaceError(format!(
                "cannot place zero-sized rectangle {width}x{height}"
            )));
        }
        Ok(self.find_position(width, height).map(|place| {
            self.place_rect(&place);
            place.origin()
        }))
    }
}
