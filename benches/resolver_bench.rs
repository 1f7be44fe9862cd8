//! Eligibility resolver throughput: single resolutions and parallel batches.
//!
//! Run with: `cargo bench --bench resolver`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sortie::dispatch::{
    resolve_allowed_missions, resolve_request, Coordinates, DestinationKind, EligibilityFacts,
    FleetComposition, PlanetOwner, ResolveRequest, ShipEntry, ShipKind, TargetDescriptor,
    UniverseLimits,
};
use sortie::parallel::{resolve_batch, WorkerPool};

fn mixed_fleet() -> FleetComposition {
    FleetComposition::new()
        .with(ShipKind::SmallCargo, 40)
        .with(ShipKind::Battleship, 12)
        .with(ShipKind::ColonyShip, 1)
        .with(ShipKind::Recycler, 6)
        .with(ShipKind::EspionageProbe, 20)
        .with(ShipKind::SolarSatellite, 8)
}

fn targets() -> Vec<TargetDescriptor> {
    let foreign = Some(PlanetOwner {
        player: 2,
        alliance: Some(4),
    });
    vec![
        TargetDescriptor {
            coordinates: Coordinates::new(1, 10, 4),
            kind: DestinationKind::Planet,
            owner: foreign,
            system_slots: 15,
        },
        TargetDescriptor {
            coordinates: Coordinates::new(1, 10, 4),
            kind: DestinationKind::Moon,
            owner: foreign,
            system_slots: 15,
        },
        TargetDescriptor {
            coordinates: Coordinates::new(1, 10, 4),
            kind: DestinationKind::Debris,
            owner: None,
            system_slots: 15,
        },
        TargetDescriptor {
            coordinates: Coordinates::new(1, 10, 16),
            kind: DestinationKind::Planet,
            owner: None,
            system_slots: 15,
        },
    ]
}

fn requests(count: usize) -> Vec<ResolveRequest> {
    (0..count)
        .map(|i| ResolveRequest {
            player: 1,
            fleet: vec![
                ShipEntry {
                    ship: 202 + (i % 14) as u16,
                    count: 3,
                },
                ShipEntry { ship: 207, count: 1 },
            ],
            target: Coordinates::new(1, 1 + (i % 400) as u32, 1 + (i % 16) as u32),
            target_type: 1 + (i % 3) as u8,
            owner: (i % 2 == 0).then_some(PlanetOwner {
                player: 9,
                alliance: None,
            }),
            facts: EligibilityFacts {
                acs_available: i % 3 == 0,
                target_is_friendly: i % 5 == 0,
                target_is_occupied: i % 2 == 0,
            },
            astrophysics_level: (i % 8) as u32,
        })
        .collect()
}

fn bench_single_resolution(c: &mut Criterion) {
    let fleet = mixed_fleet();
    let targets = targets();
    let facts = EligibilityFacts {
        acs_available: true,
        target_is_friendly: false,
        target_is_occupied: true,
    };

    let mut group = c.benchmark_group("resolve_allowed_missions");
    group.throughput(Throughput::Elements(targets.len() as u64));
    group.bench_function("mixed_fleet_all_destinations", |b| {
        b.iter(|| {
            for target in &targets {
                let _ = black_box(resolve_allowed_missions(
                    black_box(&fleet),
                    target,
                    1,
                    &facts,
                ));
            }
        })
    });
    group.finish();
}

fn bench_request_with_durations(c: &mut Criterion) {
    let limits = UniverseLimits::default();
    let request = requests(1).remove(0);
    c.bench_function("resolve_request", |b| {
        b.iter(|| black_box(resolve_request(black_box(&request), &limits)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let limits = UniverseLimits::default();
    let batch = requests(4096);

    let mut group = c.benchmark_group("resolve_batch");
    group.sample_size(20);
    group.throughput(Throughput::Elements(batch.len() as u64));
    group.bench_function("sequential", |b| {
        b.iter(|| {
            black_box(
                batch
                    .iter()
                    .map(|request| resolve_request(request, &limits))
                    .filter(Result::is_ok)
                    .count(),
            )
        })
    });
    group.bench_function("parallel", |b| {
        let pool = WorkerPool::default();
        b.iter(|| black_box(resolve_batch(&batch, &limits, &pool)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_single_resolution,
    bench_request_with_durations,
    bench_batch
);
criterion_main!(benches);
