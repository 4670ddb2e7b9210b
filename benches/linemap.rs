use criterion::{Criterion, criterion_group, criterion_main};
use linemap::{
    dataset::RouteGeometry,
    prelude::*,
    shared::Position,
    transform::{
        self,
        offset::apply_parallel_offsets,
        shapes::{ShapeExtent, cluster_by_west_terminal},
    },
};
use std::{env, hint::black_box, path::Path, time::Duration};

/// `routes` lines sharing a trunk of `points` points, each with its own tail.
fn trunk_lines(routes: usize, points: usize) -> Vec<RouteGeometry> {
    (0..routes)
        .map(|route| {
            let mut coordinates: Vec<Position> = (0..points)
                .map(|i| (-74.0 + i as f64 * 0.0005, 40.7 + i as f64 * 0.0003))
                .collect();
            coordinates.extend(
                (1..=points / 4).map(|i| (-73.5 + route as f64 * 0.01, 41.0 + i as f64 * 0.001)),
            );
            RouteGeometry {
                route_id: format!("bench:{route}"),
                coordinates,
            }
        })
        .collect()
}

fn terminals(count: usize) -> Vec<Position> {
    (0..count)
        .map(|i| (-74.0 + (i % 17) as f64 * 0.02, 40.6 + (i % 5) as f64 * 0.02))
        .collect()
}

fn offsets(geometries: &[RouteGeometry], config: &transform::Config) {
    let _ = black_box(apply_parallel_offsets(geometries.to_vec(), config));
}

fn clustering(terminals: &[Position], config: &transform::Config) {
    let extents = terminals.iter().enumerate().map(|(i, west)| ShapeExtent {
        shape_id: "bench",
        west: *west,
        east_longitude: west.0 + 0.1,
        point_count: i,
    });
    let _ = black_box(cluster_by_west_terminal(
        extents,
        config.cluster_tolerance_degrees,
    ));
}

fn criterion_benchmark(c: &mut Criterion) {
    let config = transform::Config::default();
    let geometries = trunk_lines(12, 2_000);
    let terminals = terminals(500);

    let mut group = c.benchmark_group("Geometry");
    group.bench_function("Parallel offsets", |b| {
        b.iter(|| offsets(&geometries, &config))
    });
    group.bench_function("Terminal clustering", |b| {
        b.iter(|| clustering(&terminals, &config))
    });
    group.finish();

    let gtfs_data_path = match env::var("GTFS_DATA_PATH") {
        Ok(path_str) => Path::new(&path_str).to_owned(),
        Err(err) => {
            println!("Missing GTFS_DATA_PATH environment variable, skipping feed build: {err}");
            return;
        }
    };
    let operator_id = env::var("GTFS_OPERATOR").unwrap_or_else(|_| "subway".to_string());
    let pipeline = Pipeline::default();

    let mut group = c.benchmark_group("Pipeline");
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(30));
    group.sample_size(10);
    group.bench_function("Build feed", |b| {
        b.iter(|| black_box(pipeline.build_from_zip(&operator_id, &gtfs_data_path)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
