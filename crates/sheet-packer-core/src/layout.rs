use crate::config::LayoutConfig;
use crate::control::SearchControl;
use crate::error::{Result, SheetPackerError};
use crate::model::{Rect, SheetItem, SheetLayout, Size};
use crate::placer::{ConfigPlacerFactory, Placer, PlacerFactory};
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of placing the ordered items into one fixed canvas size.
///
/// `placements[k]` belongs to the k-th item of the trial order; a failed trial
/// holds only the prefix that fit.
#[derive(Debug, Clone)]
struct Trial {
    size: Size,
    placements: Vec<Rect>,
    complete: bool,
}

impl Trial {
    fn placed(&self) -> usize {
        self.placements.len()
    }

    /// Smallest size containing every placement.
    fn extent(&self) -> Size {
        self.placements.iter().fold(Size::default(), |acc, r| {
            Size::new(acc.width.max(r.right()), acc.height.max(r.bottom()))
        })
    }
}

#[instrument(skip_all, fields(items = items.len()))]
/// Lays out `items` on a single sheet using the placer selected by `cfg`.
///
/// On success every item's `position` is set and the accepted sheet size is
/// returned. Empty input returns the minimum size. On error no item is modified.
pub fn pack_sheet(items: &mut [SheetItem], cfg: &LayoutConfig) -> Result<Size> {
    let factory = ConfigPlacerFactory::new(cfg);
    pack_sheet_with(items, cfg, &factory, &SearchControl::from_config(cfg))
}

/// Same as [`pack_sheet`] with an explicit placer factory and search limits.
///
/// Only the bounds, increment and sort flag of `cfg` are used; the placer
/// selection and limits fields are ignored in favour of `factory` and `control`.
pub fn pack_sheet_with<F: PlacerFactory>(
    items: &mut [SheetItem],
    cfg: &LayoutConfig,
    factory: &F,
    control: &SearchControl,
) -> Result<Size> {
    cfg.validate()?;
    validate_items(items)?;

    if items.is_empty() {
        return Ok(cfg.min_size());
    }

    let order = placement_order(items, cfg.sort_by_size);
    let (trial, trials) = search(items, &order, cfg, factory, control)?;

    for (placement, &idx) in trial.placements.iter().zip(&order) {
        items[idx].position = Some(placement.origin());
    }
    debug!(
        width = trial.size.width,
        height = trial.size.height,
        trials,
        "sheet layout accepted"
    );
    Ok(trial.size)
}

/// Packs sizes into a sheet without touching pixel data.
/// Inputs are (key, width, height); frames come back in input order.
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: &LayoutConfig,
) -> Result<SheetLayout> {
    let mut items: Vec<SheetItem> = inputs
        .into_iter()
        .map(|(k, w, h)| SheetItem::new(k, w, h))
        .collect();
    let size = pack_sheet(&mut items, cfg)?;
    Ok(SheetLayout::from_items(size, &items))
}

/// Packs independent sheets, one per batch. Results keep batch order.
/// Runs batches in parallel when the `parallel` feature is enabled.
pub fn pack_many(batches: Vec<Vec<SheetItem>>, cfg: &LayoutConfig) -> Vec<Result<SheetLayout>> {
    let run = |mut items: Vec<SheetItem>| -> Result<SheetLayout> {
        let size = pack_sheet(&mut items, cfg)?;
        Ok(SheetLayout::from_items(size, &items))
    };

    #[cfg(feature = "parallel")]
    {
        batches.into_par_iter().map(run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        batches.into_iter().map(run).collect()
    }
}

fn validate_items(items: &[SheetItem]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    for it in items {
        if it.width == 0 || it.height == 0 {
            return Err(SheetPackerError::InvalidInput(format!(
                "image '{}' has zero size {}x{}",
                it.key, it.width, it.height
            )));
        }
        if !seen.insert(it.key.as_str()) {
            return Err(SheetPackerError::InvalidInput(format!(
                "duplicate image key '{}'",
                it.key
            )));
        }
    }
    Ok(())
}

/// Indices of `items` in the order they are offered to the placer.
/// With `sort_by_size`, widest first and then tallest first; the sort is stable.
fn placement_order(items: &[SheetItem], sort_by_size: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    if sort_by_size {
        order.sort_by(|&a, &b| {
            items[b]
                .width
                .cmp(&items[a].width)
                .then_with(|| items[b].height.cmp(&items[a].height))
        });
    }
    order
}

/// Grow/shrink search for a canvas size that fits every item.
///
/// Starts at the maximum size. While the first trial keeps succeeding the canvas
/// shrinks to the extent of the placements (never below the minimum) until it
/// stops changing. A trial that runs out of room grows the height by the
/// increment and widens the canvas to at least that height; once grown, the
/// first complete trial is accepted as is. A trial that places nothing fails the
/// search on any iteration.
fn search<F: PlacerFactory>(
    items: &[SheetItem],
    order: &[usize],
    cfg: &LayoutConfig,
    factory: &F,
    control: &SearchControl,
) -> Result<(Trial, usize)> {
    let min = cfg.min_size();
    let total = order.len();
    let mut size = cfg.max_size();
    let mut grown = false;
    let mut trials = 0usize;

    loop {
        if control.should_stop(trials) {
            return Err(SheetPackerError::Cancelled {
                trials,
                width: size.width,
                height: size.height,
            });
        }

        let trial = run_trial(items, order, size, factory)?;
        trials += 1;
        trace!(
            width = size.width,
            height = size.height,
            placed = trial.placed(),
            total,
            "trial"
        );

        if !trial.complete {
            if trial.placed() == 0 {
                return Err(SheetPackerError::CapacityExhausted {
                    width: size.width,
                    height: size.height,
                    placed: 0,
                    total,
                });
            }
            let height = size.height.checked_add(cfg.increment).ok_or(
                SheetPackerError::CapacityExhausted {
                    width: size.width,
                    height: size.height,
                    placed: trial.placed(),
                    total,
                },
            )?;
            size = Size::new(size.width.max(height), height);
            grown = true;
            debug!(width = size.width, height = size.height, "growing sheet");
            continue;
        }

        if grown {
            return Ok((trial, trials));
        }

        let tight = trial.extent().max(min);
        if tight == size {
            return Ok((trial, trials));
        }
        trace!(width = tight.width, height = tight.height, "shrinking sheet");
        size = tight;
    }
}

/// Offers the ordered items to a fresh placer sized `size`, stopping at the
/// first one that does not fit.
fn run_trial<F: PlacerFactory>(
    items: &[SheetItem],
    order: &[usize],
    size: Size,
    factory: &F,
) -> Result<Trial> {
    let mut placer = factory.create(size);
    let mut placements: Vec<Rect> = Vec::with_capacity(order.len());

    for &idx in order {
        let item = &items[idx];
        let fault = |message: String, placed: usize| SheetPackerError::PlacerFault {
            width: size.width,
            height: size.height,
            placed,
            message,
        };
        match placer.try_place(item.width, item.height) {
            Ok(Some(origin)) => {
                let outside = origin.x as u64 + item.width as u64 > size.width as u64
                    || origin.y as u64 + item.height as u64 > size.height as u64;
                if outside {
                    return Err(fault(
                        format!("'{}' placed outside the sheet at {:?}", item.key, origin),
                        placements.len(),
                    ));
                }
                placements.push(Rect::at(origin, item.size()));
            }
            Ok(None) => break,
            Err(e) => return Err(fault(e.to_string(), placements.len())),
        }
    }

    let complete = placements.len() == order.len();
    Ok(Trial {
        size,
        placements,
        complete,
    })
}
