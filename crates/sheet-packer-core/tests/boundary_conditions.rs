use sheet_packer_core::config::{LayoutConfig, MaxRectsHeuristic, PlacerFamily};
use sheet_packer_core::error::SheetPackerError;
use sheet_packer_core::{SheetItem, Size, pack_layout, pack_sheet};

/// Test zero-sized sheet dimensions
#[test]
fn test_zero_max_width() {
    let cfg = LayoutConfig {
        max_width: 0,
        max_height: 1024,
        ..Default::default()
    };

    match cfg.validate() {
        Err(SheetPackerError::InvalidDimensions { width, height }) => {
            assert_eq!(width, 0);
            assert_eq!(height, 1024);
        }
        _ => panic!("Expected InvalidDimensions error"),
    }
}

#[test]
fn test_zero_max_height() {
    let cfg = LayoutConfig {
        max_width: 1024,
        max_height: 0,
        ..Default::default()
    };

    match cfg.validate() {
        Err(SheetPackerError::InvalidDimensions { width, height }) => {
            assert_eq!(width, 1024);
            assert_eq!(height, 0);
        }
        _ => panic!("Expected InvalidDimensions error"),
    }
}

#[test]
fn test_zero_increment() {
    let cfg = LayoutConfig {
        increment: 0,
        ..Default::default()
    };

    match cfg.validate() {
        Err(SheetPackerError::InvalidConfig(msg)) => {
            assert!(msg.contains("increment"));
        }
        _ => panic!("Expected InvalidConfig error"),
    }
}

#[test]
fn test_invalid_config_rejected_before_items_touched() {
    let cfg = LayoutConfig {
        increment: 0,
        ..Default::default()
    };
    let mut items = vec![SheetItem::new("a", 8, 8)];
    assert!(matches!(
        pack_sheet(&mut items, &cfg),
        Err(SheetPackerError::InvalidConfig(_))
    ));
    assert_eq!(items[0].position, None);
}

#[test]
fn test_minimum_above_maximum_is_allowed() {
    let cfg = LayoutConfig::builder()
        .with_min_dimensions(300, 300)
        .with_max_dimensions(128, 128)
        .increment(16)
        .build();
    assert!(cfg.validate().is_ok());

    // The shrink step clamps up to the minimum, so the result exceeds the maximum.
    let mut items = vec![SheetItem::new("a", 32, 32)];
    let size = pack_sheet(&mut items, &cfg).expect("pack");
    assert_eq!(size, Size::new(300, 300));
}

#[test]
fn test_zero_sized_item_rejected() {
    let mut items = vec![SheetItem::new("ok", 8, 8), SheetItem::new("empty", 0, 8)];
    match pack_sheet(&mut items, &LayoutConfig::default()) {
        Err(SheetPackerError::InvalidInput(msg)) => assert!(msg.contains("empty")),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
    assert!(items.iter().all(|it| it.position.is_none()));
}

#[test]
fn test_duplicate_keys_rejected() {
    let result = pack_layout(vec![("a", 8, 8), ("a", 4, 4)], &LayoutConfig::default());
    match result {
        Err(SheetPackerError::InvalidInput(msg)) => assert!(msg.contains("duplicate")),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_empty_layout_has_minimum_size() {
    let cfg = LayoutConfig::builder()
        .with_min_dimensions(10, 20)
        .build();
    let layout = pack_layout(Vec::<(&str, u32, u32)>::new(), &cfg).expect("pack");
    assert_eq!(layout.size(), Size::new(10, 20));
    assert!(layout.frames.is_empty());
}

#[test]
fn test_item_exactly_max_size() {
    let cfg = LayoutConfig::builder()
        .with_max_dimensions(64, 64)
        .increment(8)
        .build();
    let layout = pack_layout(vec![("full", 64, 64)], &cfg).expect("pack");
    assert_eq!(layout.size(), Size::new(64, 64));
    assert_eq!(layout.frames[0].frame.x, 0);
    assert_eq!(layout.frames[0].frame.y, 0);
}

#[test]
fn test_item_wider_than_max_fails_for_every_placer() {
    for placer in [
        PlacerFamily::Anchor,
        PlacerFamily::Skyline,
        PlacerFamily::MaxRects,
        PlacerFamily::Guillotine,
    ] {
        let cfg = LayoutConfig::builder()
            .with_max_dimensions(64, 64)
            .increment(8)
            .placer(placer)
            .build();
        let result = pack_layout(vec![("wide", 65, 1)], &cfg);
        assert!(
            matches!(
                result,
                Err(SheetPackerError::CapacityExhausted { placed: 0, .. })
            ),
            "{placer:?}: {result:?}"
        );
    }
}

#[test]
fn test_lone_tall_item_is_not_grown_into() {
    // Growth only follows a trial that placed something; a lone item taller than
    // the maximum never gets that far.
    let cfg = LayoutConfig::builder()
        .with_max_dimensions(64, 64)
        .increment(8)
        .build();
    let result = pack_layout(vec![("tall", 8, 100)], &cfg);
    assert!(matches!(
        result,
        Err(SheetPackerError::CapacityExhausted { placed: 0, total: 1, .. })
    ));
}

#[test]
fn test_placer_names_parse() {
    assert_eq!("anchor".parse::<PlacerFamily>(), Ok(PlacerFamily::Anchor));
    assert_eq!("MaxRects".parse::<PlacerFamily>(), Ok(PlacerFamily::MaxRects));
    assert_eq!("skyline".parse::<PlacerFamily>(), Ok(PlacerFamily::Skyline));
    assert_eq!("guillotine".parse::<PlacerFamily>(), Ok(PlacerFamily::Guillotine));
    assert!("spiral".parse::<PlacerFamily>().is_err());
    assert_eq!(
        "cp".parse::<MaxRectsHeuristic>(),
        Ok(MaxRectsHeuristic::ContactPoint)
    );
}

#[test]
fn test_config_deserializes_with_defaults() {
    let cfg: LayoutConfig = serde_json::from_str(
        r#"{"min_width":1,"min_height":1,"max_width":512,"max_height":256,"increment":32}"#,
    )
    .expect("parse");
    assert!(cfg.sort_by_size);
    assert_eq!(cfg.placer, PlacerFamily::Anchor);
    assert_eq!(cfg.max_trials, None);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_bounds_from_sprite_sizes() {
    let cfg = LayoutConfig::from_sprite_sizes(&[
        Size::new(16, 40),
        Size::new(64, 12),
        Size::new(30, 30),
    ]);
    assert_eq!(cfg.min_size(), Size::new(16, 12));
    assert_eq!(cfg.max_size(), Size::new(64, 40));
    assert_eq!(cfg.increment, 12);
    assert!(cfg.sort_by_size);
    assert!(cfg.validate().is_ok());

    let empty = LayoutConfig::from_sprite_sizes(&[]);
    assert_eq!(empty.max_size(), LayoutConfig::default().max_size());
}

#[test]
fn test_sprite_derived_bounds_pack_by_growing() {
    // The maximum is only as large as the biggest sprite, so anything more
    // than one sprite has to grow.
    let sizes = [(32, 32), (32, 32), (16, 16)];
    let cfg = LayoutConfig::from_sprite_sizes(
        &sizes.iter().map(|&(w, h)| Size::new(w, h)).collect::<Vec<_>>(),
    );
    let layout = pack_layout(
        vec![("a", 32, 32), ("b", 32, 32), ("c", 16, 16)],
        &cfg,
    )
    .expect("pack");
    assert!(layout.height > 32);
    assert_eq!((layout.height - 32) % 16, 0);
    assert_eq!(layout.frames.len(), 3);
}
