use crate::config::{LayoutConfig, PlacerFamily};
use crate::model::{Point, Size};
use thiserror::Error;

pub mod anchor;
pub mod guillotine;
pub mod maxrects;
pub mod skyline;

/// Raised by a placer that cannot continue for reasons other than lack of room.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PlaceError(pub String);

/// A placer puts rectangles, one at a time, into a canvas of fixed size.
///
/// Implementations are constructed fresh for every canvas size and must never
/// return a position that overlaps an earlier accepted rectangle or leaves the
/// canvas. `Ok(None)` means there is no room left for this rectangle.
/// Results must be deterministic for a given canvas size and request sequence.
pub trait Placer {
    fn try_place(&mut self, width: u32, height: u32) -> Result<Option<Point>, PlaceError>;
}

impl<P: Placer + ?Sized> Placer for Box<P> {
    fn try_place(&mut self, width: u32, height: u32) -> Result<Option<Point>, PlaceError> {
        (**self).try_place(width, height)
    }
}

/// Creates a fresh placer for each trial canvas size.
pub trait PlacerFactory {
    type Placer: Placer;
    fn create(&self, canvas: Size) -> Self::Placer;
}

impl<F, P> PlacerFactory for F
where
    F: Fn(Size) -> P,
    P: Placer,
{
    type Placer = P;
    fn create(&self, canvas: Size) -> P {
        self(canvas)
    }
}

/// Factory for the built-in placers, driven by `LayoutConfig`.
#[derive(Debug, Clone)]
pub struct ConfigPlacerFactory {
    cfg: LayoutConfig,
}

impl ConfigPlacerFactory {
    pub fn new(cfg: &LayoutConfig) -> Self {
        Self { cfg: cfg.clone() }
    }
}

impl PlacerFactory for ConfigPlacerFactory {
    type Placer = Box<dyn Placer>;

    fn create(&self, canvas: Size) -> Box<dyn Placer> {
        match self.cfg.placer {
            PlacerFamily::Anchor => Box::new(anchor::AnchorPlacer::new(canvas)),
            PlacerFamily::Skyline => Box::new(skyline::SkylinePlacer::new(
                canvas,
                self.cfg.skyline_heuristic,
            )),
            PlacerFamily::MaxRects => Box::new(maxrects::MaxRectsPlacer::new(
                canvas,
                self.cfg.mr_heuristic,
            )),
            PlacerFamily::Guillotine => Box::new(guillotine::GuillotinePlacer::new(
                canvas,
                self.cfg.g_choice,
                self.cfg.g_split,
            )),
        }
    }
}
