//! Layout configuration.
//! Key notes:
//!   - the search starts at `max_width`x`max_height` and grows height by `increment` while items don't fit
//!   - `min_width`/`min_height` are returned for empty input and floor the shrink step
//!   - `placer` selects the rectangle placement strategy used by every trial
//!   - `time_budget_ms` and `max_trials` bound the search at trial boundaries

use crate::model::Size;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Looks `s` up in a table of accepted spellings, ignoring ASCII case.
fn parse_keyword<T: Copy>(s: &str, table: &[(&[&str], T)]) -> Result<T, ()> {
    table
        .iter()
        .find(|(names, _)| names.iter().any(|n| n.eq_ignore_ascii_case(s)))
        .map(|&(_, v)| v)
        .ok_or(())
}

/// Built-in placement strategies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlacerFamily {
    /// Anchor points at the corners of placed rects, ranked by x + y.
    #[default]
    Anchor,
    /// Skyline (BL/MW); fast baseline.
    Skyline,
    /// MaxRects free list; best density, slowest.
    MaxRects,
    /// Guillotine splitting (choice + split heuristics).
    Guillotine,
}

impl PlacerFamily {
    const KEYWORDS: &'static [(&'static [&'static str], Self)] = &[
        (&["anchor"], Self::Anchor),
        (&["skyline"], Self::Skyline),
        (&["maxrects"], Self::MaxRects),
        (&["guillotine"], Self::Guillotine),
    ];
}

impl FromStr for PlacerFamily {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(s, Self::KEYWORDS)
    }
}

/// Free-rect scoring for the MaxRects placer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaxRectsHeuristic {
    #[default]
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
    BottomLeft,
    ContactPoint,
}

impl MaxRectsHeuristic {
    const KEYWORDS: &'static [(&'static [&'static str], Self)] = &[
        (&["baf", "bestareafit"], Self::BestAreaFit),
        (&["bssf", "bestshortsidefit"], Self::BestShortSideFit),
        (&["blsf", "bestlongsidefit"], Self::BestLongSideFit),
        (&["bl", "bottomleft"], Self::BottomLeft),
        (&["cp", "contactpoint"], Self::ContactPoint),
    ];
}

impl FromStr for MaxRectsHeuristic {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(s, Self::KEYWORDS)
    }
}

/// Segment choice for the Skyline placer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkylineHeuristic {
    #[default]
    BottomLeft,
    MinWaste,
}

impl SkylineHeuristic {
    const KEYWORDS: &'static [(&'static [&'static str], Self)] = &[
        (&["bl", "bottomleft"], Self::BottomLeft),
        (&["mw", "minwaste"], Self::MinWaste),
    ];
}

impl FromStr for SkylineHeuristic {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(s, Self::KEYWORDS)
    }
}

/// Which free rect the Guillotine placer fills.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuillotineChoice {
    #[default]
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
    WorstAreaFit,
    WorstShortSideFit,
    WorstLongSideFit,
}

impl GuillotineChoice {
    const KEYWORDS: &'static [(&'static [&'static str], Self)] = &[
        (&["baf", "bestareafit"], Self::BestAreaFit),
        (&["bssf", "bestshortsidefit"], Self::BestShortSideFit),
        (&["blsf", "bestlongsidefit"], Self::BestLongSideFit),
        (&["waf", "worstareafit"], Self::WorstAreaFit),
        (&["wssf", "worstshortsidefit"], Self::WorstShortSideFit),
        (&["wlsf", "worstlongsidefit"], Self::WorstLongSideFit),
    ];
}

impl FromStr for GuillotineChoice {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(s, Self::KEYWORDS)
    }
}

/// How the Guillotine placer cuts the leftover of a filled free rect.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuillotineSplit {
    #[default]
    SplitShorterLeftoverAxis,
    SplitLongerLeftoverAxis,
    SplitMinimizeArea,
    SplitMaximizeArea,
    SplitShorterAxis,
    SplitLongerAxis,
}

impl GuillotineSplit {
    const KEYWORDS: &'static [(&'static [&'static str], Self)] = &[
        (&["slas", "splitshorterleftoveraxis"], Self::SplitShorterLeftoverAxis),
        (&["llas", "splitlongerleftoveraxis"], Self::SplitLongerLeftoverAxis),
        (&["minas", "splitminimizearea"], Self::SplitMinimizeArea),
        (&["maxas", "splitmaximizearea"], Self::SplitMaximizeArea),
        (&["sas", "splitshorteraxis"], Self::SplitShorterAxis),
        (&["las", "splitlongeraxis"], Self::SplitLongerAxis),
    ];
}

impl FromStr for GuillotineSplit {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(s, Self::KEYWORDS)
    }
}

/// Bounds, growth step and placer selection for one sheet layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Sheet size returned for empty input; floor for the shrink step.
    pub min_width: u32,
    pub min_height: u32,
    /// Starting size of the search.
    pub max_width: u32,
    pub max_height: u32,
    /// Pixels added to the trial height each time a trial runs out of room.
    pub increment: u32,
    /// Offer items widest first (ties: tallest first) instead of in input order.
    #[serde(default = "sort_by_size_default")]
    pub sort_by_size: bool,

    #[serde(default)]
    pub placer: PlacerFamily,
    #[serde(default)]
    pub mr_heuristic: MaxRectsHeuristic,
    #[serde(default)]
    pub skyline_heuristic: SkylineHeuristic,
    #[serde(default)]
    pub g_choice: GuillotineChoice,
    #[serde(default)]
    pub g_split: GuillotineSplit,

    /// Wall-clock budget for the whole search in milliseconds; None or 0 disables.
    #[serde(default)]
    pub time_budget_ms: Option<u64>,
    /// Cap on the number of trials.
    #[serde(default)]
    pub max_trials: Option<usize>,
}

fn sort_by_size_default() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_width: 1,
            min_height: 1,
            max_width: 1024,
            max_height: 1024,
            increment: 16,
            sort_by_size: sort_by_size_default(),
            placer: PlacerFamily::default(),
            mr_heuristic: MaxRectsHeuristic::default(),
            skyline_heuristic: SkylineHeuristic::default(),
            g_choice: GuillotineChoice::default(),
            g_split: GuillotineSplit::default(),
            time_budget_ms: None,
            max_trials: None,
        }
    }
}

impl LayoutConfig {
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - The maximum size has a zero dimension
    /// - The growth increment is zero
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SheetPackerError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(SheetPackerError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }

        if self.increment == 0 {
            return Err(SheetPackerError::InvalidConfig(
                "increment must be a non-zero positive number".into(),
            ));
        }

        // A minimum larger than the maximum is allowed: the shrink step clamps up to it.

        Ok(())
    }
}

/// Builder for `LayoutConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct LayoutConfigBuilder {
    cfg: LayoutConfig,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: LayoutConfig::default(),
        }
    }
    pub fn with_min_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.min_width = w;
        self.cfg.min_height = h;
        self
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn increment(mut self, v: u32) -> Self {
        self.cfg.increment = v;
        self
    }
    pub fn sort_by_size(mut self, v: bool) -> Self {
        self.cfg.sort_by_size = v;
        self
    }
    pub fn placer(mut self, v: PlacerFamily) -> Self {
        self.cfg.placer = v;
        self
    }
    pub fn skyline_heuristic(mut self, v: SkylineHeuristic) -> Self {
        self.cfg.skyline_heuristic = v;
        self
    }
    pub fn mr_heuristic(mut self, v: MaxRectsHeuristic) -> Self {
        self.cfg.mr_heuristic = v;
        self
    }
    pub fn g_choice(mut self, v: GuillotineChoice) -> Self {
        self.cfg.g_choice = v;
        self
    }
    pub fn g_split(mut self, v: GuillotineSplit) -> Self {
        self.cfg.g_split = v;
        self
    }
    pub fn time_budget_ms(mut self, v: Option<u64>) -> Self {
        self.cfg.time_budget_ms = v;
        self
    }
    pub fn max_trials(mut self, v: Option<usize>) -> Self {
        self.cfg.max_trials = v;
        self
    }
    pub fn build(self) -> LayoutConfig {
        self.cfg
    }
}

impl LayoutConfig {
    /// Create a fluent builder for `LayoutConfig`.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::new()
    }

    /// Bounds taken from the sprites themselves: the minimum is the smallest
    /// width and smallest height, the maximum the largest of each, and the
    /// increment the smallest height. Other fields keep their defaults.
    /// Returns the default config for an empty slice.
    pub fn from_sprite_sizes(sizes: &[Size]) -> Self {
        let Some(first) = sizes.first() else {
            return Self::default();
        };
        let (mut min, mut max) = (*first, *first);
        for s in &sizes[1..] {
            min.width = min.width.min(s.width);
            min.height = min.height.min(s.height);
            max = max.max(*s);
        }
        Self {
            min_width: min.width,
            min_height: min.height,
            max_width: max.width,
            max_height: max.height,
            increment: min.height,
            ..Self::default()
        }
    }
}
