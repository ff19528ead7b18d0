use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sheet_packer_core::prelude::*;
use std::hint::black_box;

fn generate_sprites(count: usize, min_size: u32, max_size: u32) -> Vec<(String, u32, u32)> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("sprite_{}", i), w, h)
        })
        .collect()
}

fn strategies() -> Vec<(&'static str, LayoutConfig)> {
    let base = LayoutConfig::builder()
        .with_min_dimensions(16, 16)
        .with_max_dimensions(1024, 1024)
        .increment(16);
    vec![
        ("Anchor", base.clone().placer(PlacerFamily::Anchor).build()),
        (
            "Skyline_BL",
            base.clone()
                .placer(PlacerFamily::Skyline)
                .skyline_heuristic(SkylineHeuristic::BottomLeft)
                .build(),
        ),
        (
            "MaxRects_BAF",
            base.clone()
                .placer(PlacerFamily::MaxRects)
                .mr_heuristic(MaxRectsHeuristic::BestAreaFit)
                .build(),
        ),
        (
            "Guillotine_BAF",
            base.placer(PlacerFamily::Guillotine)
                .g_choice(GuillotineChoice::BestAreaFit)
                .build(),
        ),
    ]
}

fn bench_full_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_search");

    for count in [50, 100, 200] {
        let sprites = generate_sprites(count, 16, 64);
        group.throughput(Throughput::Elements(count as u64));

        for (name, cfg) in strategies() {
            group.bench_with_input(BenchmarkId::new(name, count), &sprites, |b, sprites| {
                b.iter(|| {
                    let sheet = pack_layout(sprites.clone(), &cfg);
                    black_box(sheet)
                });
            });
        }
    }

    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth_from_small_max");
    let sprites = generate_sprites(150, 16, 64);

    for (name, cfg) in strategies() {
        // Start far too small so most of the time goes into growth trials.
        let cfg = LayoutConfig {
            max_width: 128,
            max_height: 128,
            increment: 32,
            ..cfg
        };
        group.bench_with_input(BenchmarkId::new(name, 150), &sprites, |b, sprites| {
            b.iter(|| black_box(pack_layout(sprites.clone(), &cfg)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_search, bench_growth);
criterion_main!(benches);
