use celestial::chart::{compute_natal_chart, ChartAssembler};
use celestial::ephemeris::{AnalyticEphemeris, Body, EphemerisProvider};
use celestial::houses::HouseSystem;
use celestial::time::Instant;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_longitudes(c: &mut Criterion) {
    let eph = AnalyticEphemeris::new();
    let when = Instant::from_ymd_hm(1990, 5, 17, 8, 15).unwrap();

    c.bench_function("moon_longitude", |b| {
        b.iter(|| eph.longitude_of(black_box(Body::Moon), black_box(&when)))
    });

    c.bench_function("all_bodies", |b| {
        b.iter(|| {
            for body in Body::ALL {
                let _ = eph.longitude_of(black_box(body), black_box(&when));
            }
        })
    });
}

fn bench_natal_chart(c: &mut Criterion) {
    c.bench_function("compute_natal_chart", |b| {
        b.iter(|| {
            compute_natal_chart(
                black_box("1990-05-17"),
                black_box(Some("08:15")),
                black_box(6.5244),
                black_box(3.3792),
                black_box(HouseSystem::Equal),
            )
        })
    });

    let assembler = ChartAssembler::default();
    let natal = compute_natal_chart("1990-05-17", Some("08:15"), 6.5244, 3.3792, HouseSystem::Equal).unwrap();
    let today = Instant::from_ymd_hm(2024, 1, 1, 12, 0).unwrap();
    c.bench_function("transits", |b| {
        b.iter(|| assembler.transits(black_box(&natal), black_box(&today)))
    });
}

criterion_group!(benches, bench_longitudes, bench_natal_chart);
criterion_main!(benches);
