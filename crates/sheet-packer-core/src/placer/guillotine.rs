use super::{PlaceError, Placer};
use crate::config::{GuillotineChoice, GuillotineSplit};
use crate::model::{Point, Rect, Size};

pub struct GuillotinePlacer {
    free: Vec<Rect>,
    choice: GuillotineChoice,
    split: GuillotineSplit,
}

impl GuillotinePlacer {
    pub fn new(canvas: Size, choice: GuillotineChoice, split: GuillotineSplit) -> Self {
        Self {
            free: vec![Rect::new(0, 0, canvas.width, canvas.height)],
            choice,
            split,
        }
    }

    fn score(choice: &GuillotineChoice, fr: &Rect, w: u32, h: u32) -> i64 {
        let area_fit = (fr.w as i64) * (fr.h as i64) - (w as i64) * (h as i64);
        let leftover_h = (fr.w - w) as i64;
        let leftover_v = (fr.h - h) as i64;
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);
        match choice {
            GuillotineChoice::BestAreaFit => area_fit,
            GuillotineChoice::BestShortSideFit => short_fit,
            GuillotineChoice::BestLongSideFit => long_fit,
            GuillotineChoice::WorstAreaFit => -area_fit,
            GuillotineChoice::WorstShortSideFit => -short_fit,
            GuillotineChoice::WorstLongSideFit => -long_fit,
        }
    }

    fn choose(&self, w: u32, h: u32) -> Option<(usize, Rect)> {
        let mut best: Option<(i64, usize)> = None;
        for (i, fr) in self.free.iter().enumerate() {
            if fr.w < w || fr.h < h {
                continue;
            }
            let s = Self::score(&self.choice, fr, w, h);
            if best.is_none_or(|(bs, _)| s < bs) {
                best = Some((s, i));
            }
        }
        best.map(|(_, idx)| {
            let fr = self.free[idx];
            (idx, Rect::new(fr.x, fr.y, w, h))
        })
    }

    fn split(&self, fr: &Rect, placed: &Rect) -> (Option<Rect>, Option<Rect>) {
        // Leftover widths/heights to the right of and below the placed rect.
        let w_right = fr.right() - placed.right();
        let h_bottom = fr.bottom() - placed.bottom();

        let split_horizontal = match self.split {
            GuillotineSplit::SplitShorterLeftoverAxis => h_bottom < w_right,
            GuillotineSplit::SplitLongerLeftoverAxis => h_bottom > w_right,
            GuillotineSplit::SplitMinimizeArea => {
                (w_right as u64) * (fr.h as u64) <= (fr.w as u64) * (h_bottom as u64)
            }
            GuillotineSplit::SplitMaximizeArea => {
                (w_right as u64) * (fr.h as u64) >= (fr.w as u64) * (h_bottom as u64)
            }
            GuillotineSplit::SplitShorterAxis => fr.h < fr.w,
            GuillotineSplit::SplitLongerAxis => fr.h > fr.w,
        };

        // Horizontal split: bottom spans the full width, right is as tall as the placed rect.
        let (bottom_w, right_h) = if split_horizontal {
            (fr.w, placed.h)
        } else {
            (placed.w, fr.h)
        };
        let bottom = Rect::new(fr.x, placed.bottom(), bottom_w, h_bottom);
        let right = Rect::new(placed.right(), fr.y, w_right, right_h);
        let non_empty = |r: Rect| (r.w > 0 && r.h > 0).then_some(r);
        (non_empty(bottom), non_empty(right))
    }

    fn place(&mut self, idx: usize, placed: &Rect) {
        let fr = self.free.swap_remove(idx);
        let (a, b) = self.split(&fr, placed);
        self.free.extend(a);
        self.free.extend(b);
        self.merge_free_list();
    }

    fn merge_free_list(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'outer: for i in 0..self.free.len() {
                for j in i + 1..self.free.len() {
                    let a = self.free[i];
                    let b = self.free[j];
                    let joined = if a.y == b.y && a.h == b.h && a.right() == b.x {
                        Some(Rect::new(a.x, a.y, a.w + b.w, a.h))
                    } else if a.y == b.y && a.h == b.h && b.right() == a.x {
                        Some(Rect::new(b.x, a.y, a.w + b.w, a.h))
                    } else if a.x == b.x && a.w == b.w && a.bottom() == b.y {
                        Some(Rect::new(a.x, a.y, a.w, a.h + b.h))
                    } else if a.x == b.x && a.w == b.w && b.bottom() == a.y {
                        Some(Rect::new(a.x, b.y, a.w, a.h + b.h))
                    } else {
                        None
                    };
                    if let Some(r) = joined {
                        self.free[i] = r;
                        self.free.remove(j);
                        merged = true;
                        break 'outer;
                    }
                }
            }
        }
    }
}

impl Placer for GuillotinePlacer {
    fn try_place(&mut self, width: u32, height: u32) -> Result<Option<Point>, PlaceError> {
        if width == 0 || height == 0 {
            return Err(PlaceError(format!(
                "cannot place zero-sized rectangle {width}x{height}"
            )));
        }
        Ok(self.choose(width, height).map(|(idx, place)| {
            self.place(idx, &place);
            place.origin()
        }))
    }
}
