//! Core library for packing sprite images into a single sheet.
//!
//! - Search: `pack_sheet` starts at the maximum sheet size, shrinks while the first
//!   layout fits, grows the height by a fixed increment when it doesn't
//! - Placers: Anchor (default), Skyline (BL/MW), MaxRects (BAF/BSSF/BLSF/BL/CP),
//!   Guillotine (choice + split); custom placers implement [`Placer`]
//! - Emitters: CSS sprite rules, JSON layout; sheet compositing behind the `image` feature
//!
//! Quick example:
//! ```ignore
//! use sheet_packer_core::{LayoutConfig, SheetItem, pack_sheet};
//! # fn main() -> anyhow::Result<()> {
//! let mut items = vec![
//!     SheetItem::new("a.png", 64, 64),
//!     SheetItem::new("b.png", 32, 32),
//! ];
//! let cfg = LayoutConfig::builder()
//!     .with_min_dimensions(32, 32)
//!     .with_max_dimensions(64, 64)
//!     .increment(32)
//!     .build();
//! let size = pack_sheet(&mut items, &cfg)?;
//! println!("sheet {}x{}, a at {:?}", size.width, size.height, items[0].position);
//! # Ok(()) }
//! ```

#[cfg(feature = "image")]
pub mod compositing;
pub mod config;
pub mod control;
pub mod css;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod placer;

pub use config::*;
pub use control::*;
pub use css::*;
pub use error::*;
pub use export::*;
pub use layout::*;
pub use model::*;
pub use placer::{ConfigPlacerFactory, PlaceError, Placer, PlacerFactory};

/// Convenience prelude for common types and functions.
/// Importing `sheet_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{
        GuillotineChoice, GuillotineSplit, LayoutConfig, LayoutConfigBuilder, MaxRectsHeuristic,
        PlacerFamily, SkylineHeuristic,
    };
    pub use crate::control::{CancelToken, SearchControl};
    pub use crate::model::{Frame, Point, Rect, SheetItem, SheetLayout, SheetStats, Size};
    pub use crate::placer::{PlaceError, Placer, PlacerFactory};
    pub use crate::{CssOptions, pack_layout, pack_many, pack_sheet, pack_sheet_with, to_css};
}
