use sheet_packer_core::config::{
    GuillotineChoice, GuillotineSplit, LayoutConfig, MaxRectsHeuristic, PlacerFamily,
    SkylineHeuristic,
};
use sheet_packer_core::model::{Rect, SheetItem, Size};
use sheet_packer_core::pack_sheet;

fn disjoint(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(&rects[j]) {
                return false;
            }
        }
    }
    true
}

fn random_items(seed: u64, n: usize) -> Vec<SheetItem> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let w = rng.gen_range(4..=64);
            let h = rng.gen_range(4..=64);
            SheetItem::new(format!("r{i}"), w, h)
        })
        .collect()
}

fn configs() -> Vec<LayoutConfig> {
    let base = LayoutConfig::builder()
        .with_min_dimensions(16, 16)
        .with_max_dimensions(256, 256)
        .increment(32);
    let mut out = vec![
        base.clone().placer(PlacerFamily::Anchor).build(),
        base.clone()
            .placer(PlacerFamily::Skyline)
            .skyline_heuristic(SkylineHeuristic::BottomLeft)
            .build(),
        base.clone()
            .placer(PlacerFamily::Skyline)
            .skyline_heuristic(SkylineHeuristic::MinWaste)
            .build(),
    ];
    for h in [
        MaxRectsHeuristic::BestAreaFit,
        MaxRectsHeuristic::BestShortSideFit,
        MaxRectsHeuristic::BestLongSideFit,
        MaxRectsHeuristic::BottomLeft,
        MaxRectsHeuristic::ContactPoint,
    ] {
        out.push(
            base.clone()
                .placer(PlacerFamily::MaxRects)
                .mr_heuristic(h)
                .build(),
        );
    }
    for (c, s) in [
        (
            GuillotineChoice::BestAreaFit,
            GuillotineSplit::SplitShorterLeftoverAxis,
        ),
        (
            GuillotineChoice::BestShortSideFit,
            GuillotineSplit::SplitMinimizeArea,
        ),
        (
            GuillotineChoice::WorstAreaFit,
            GuillotineSplit::SplitLongerAxis,
        ),
    ] {
        out.push(
            base.clone()
                .placer(PlacerFamily::Guillotine)
                .g_choice(c)
                .g_split(s)
                .build(),
        );
    }
    out
}

fn check_layout(items: &[SheetItem], size: Size, cfg: &LayoutConfig) {
    let rects: Vec<Rect> = items
        .iter()
        .map(|it| it.bounds().expect("every item positioned"))
        .collect();
    let sheet = Rect::new(0, 0, size.width, size.height);
    for r in &rects {
        assert!(sheet.contains(r), "{r:?} outside {size:?} ({:?})", cfg.placer);
    }
    assert!(disjoint(&rects), "overlap with {:?}", cfg.placer);
    assert!(size.width >= cfg.min_width && size.height >= cfg.min_height);
}

#[test]
fn every_placer_produces_disjoint_contained_layouts() {
    for cfg in configs() {
        for seed in [1u64, 7, 42] {
            let mut items = random_items(seed, 40);
            let size = pack_sheet(&mut items, &cfg).expect("pack");
            check_layout(&items, size, &cfg);
        }
    }
}

#[test]
fn every_placer_survives_growth() {
    // 120 items averaging ~1156 px² each cannot fit 256x256, so the search has to grow.
    for cfg in configs() {
        let mut items = random_items(3, 120);
        let size = pack_sheet(&mut items, &cfg).expect("pack");
        check_layout(&items, size, &cfg);
        assert!(size.height > 256, "{:?} did not grow: {size:?}", cfg.placer);
        assert_eq!((size.height - 256) % 32, 0);
        assert!(size.width >= size.height);
    }
}

#[test]
fn layouts_are_deterministic() {
    for cfg in configs() {
        let mut a = random_items(99, 60);
        let mut b = a.clone();
        let sa = pack_sheet(&mut a, &cfg).expect("pack a");
        let sb = pack_sheet(&mut b, &cfg).expect("pack b");
        assert_eq!(sa, sb);
        assert_eq!(a, b);
    }
}

#[test]
fn unsorted_input_still_packs() {
    for cfg in configs() {
        let cfg = LayoutConfig {
            sort_by_size: false,
            ..cfg
        };
        let mut items = random_items(5, 30);
        let size = pack_sheet(&mut items, &cfg).expect("pack");
        check_layout(&items, size, &cfg);
    }
}

#[test]
fn single_item_fills_its_own_sheet() {
    for cfg in configs() {
        let mut items = vec![SheetItem::new("only", 40, 24)];
        let size = pack_sheet(&mut items, &cfg).expect("pack");
        assert_eq!(size, Size::new(40, 24), "{:?}", cfg.placer);
        assert_eq!(items[0].bounds(), Some(Rect::new(0, 0, 40, 24)));
    }
}
