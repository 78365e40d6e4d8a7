use criterion::{Criterion, black_box, criterion_group, criterion_main};
use parcferme::catalog::{CatalogEntry, Driver};
use parcferme::lineup::Lineup;

fn build_catalog(size: usize) -> Vec<CatalogEntry> {
    (0..size)
        .map(|i| {
            CatalogEntry::Driver(Driver {
                id: i as u64 + 1,
                first_name: "Bench".to_string(),
                last_name: format!("Driver{i}"),
                country: "XX".to_string(),
                price: 10.0 + (i as f32) * 0.1,
                points: i as f32,
            })
        })
        .collect()
}

fn bench_lineup_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("lineup_operations");

    // the real catalog is tens of entries; larger sizes show how the
    // rebuild-on-clear approach scales
    for catalog_size in [30usize, 300, 3000] {
        let catalog = build_catalog(catalog_size);

        group.bench_function(format!("assign_{catalog_size}"), |b| {
            let mut lineup = Lineup::new(catalog.clone(), vec![], 7);
            let entry = catalog[catalog_size / 2].clone();
            b.iter(|| {
                lineup.assign(3, black_box(entry.clone())).unwrap();
            });
        });

        group.bench_function(format!("clear_rebuilds_pool_{catalog_size}"), |b| {
            let mut lineup = Lineup::new(catalog.clone(), vec![], 7);
            lineup.assign(3, catalog[0].clone()).unwrap();
            b.iter(|| {
                lineup.clear(black_box(3)).unwrap();
            });
        });

        group.bench_function(format!("seed_{catalog_size}"), |b| {
            b.iter(|| {
                black_box(Lineup::new(catalog.clone(), vec![], 7));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lineup_operations);
criterion_main!(benches);
