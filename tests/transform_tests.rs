mod common;

use common::{FeedBuilder, close, subway_config};
use linemap::{
    dataset::RouteGeometry,
    gtfs::{self, GtfsArchive, GtfsData},
    operator::{Mode, OperatorConfig},
    transform::{
        self, FeedIndex,
        offset::{apply_parallel_offsets, overlap_groups, route_offsets},
        ordering::station_orders,
        shapes::select_geometries,
        stations::build_stations,
    },
};

fn decode(feed: FeedBuilder) -> GtfsData {
    let archive = GtfsArchive::from_bytes(&feed.build(), &gtfs::Config::default()).unwrap();
    GtfsData::decode(&archive).unwrap()
}

#[test]
fn index_test() {
    let data = decode(FeedBuilder::subway());
    let index = FeedIndex::new("test", &data);

    let routes: Vec<_> = index.routes().iter().map(|route| route.route_id).collect();
    assert_eq!(routes, ["A", "C"]);
    assert_eq!(index.trip_stops("A1"), ["S1N", "S2N", "S3"]);
    assert_eq!(index.representative_trip(&index.routes()[0]), ["S1N", "S2N", "S3"]);
    assert_eq!(index.routes_at_stop("S1N"), ["test:A", "test:C"]);
    assert_eq!(index.children_of("S1"), ["S1N"]);
    assert_eq!(index.station_of("S2N").as_deref(), Some("test:S2"));
    assert_eq!(index.station_of("S3").as_deref(), Some("test:S3"));
    assert_eq!(index.station_of("missing"), None);
    assert_eq!(index.trip_shape("C1"), Some("SC1"));
}

#[test]
fn stations_collapse_platforms_test() {
    let data = decode(FeedBuilder::subway());
    let config = subway_config("test");
    let index = FeedIndex::new("test", &data);
    let stations = build_stations(&config, &data.stops, &index);

    let ids: Vec<_> = stations.iter().map(|station| station.id.as_str()).collect();
    // Platforms fold into their parent, the zero latitude stop is dropped.
    assert_eq!(ids, ["test:S1", "test:S2", "test:S3"]);

    let alpha = &stations[0];
    assert_eq!(alpha.name, "Alpha");
    assert_eq!(alpha.system_id, "test");
    assert_eq!(alpha.route_ids, ["test:A", "test:C"]);
    assert!(alpha.is_transfer_point);
    let accessibility = alpha.accessibility.unwrap();
    assert!(accessibility.ada && accessibility.elevator);

    let gamma = &stations[2];
    assert_eq!(gamma.name, "Unknown Station");
    assert_eq!(gamma.route_ids, ["test:A"]);
    assert!(!gamma.is_transfer_point);
    assert!(gamma.accessibility.is_none());
}

#[test]
fn sibling_platforms_merge_into_parent_test() {
    let stops = "\
stop_id,stop_name,stop_lat,stop_lon,location_type,parent_station
P,Plaza,40.750,-73.990,1,
PN,Plaza North,40.751,-73.990,0,P
PS,Plaza South,40.749,-73.990,0,P
";
    let trips = "route_id,trip_id\nA,T1\nC,T2\n";
    let stop_times = "trip_id,stop_id,stop_sequence\nT1,PN,1\nT1,PS,2\nT2,PS,1\n";
    let data = decode(
        FeedBuilder::subway()
            .without("shapes.txt")
            .file("stops.txt", stops)
            .file("trips.txt", trips)
            .file("stop_times.txt", stop_times),
    );
    let config = subway_config("t");
    let index = FeedIndex::new("t", &data);
    let stations = build_stations(&config, &data.stops, &index);

    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].id, "t:P");
    // A calls at both platforms but is listed once.
    assert_eq!(stations[0].route_ids, ["t:A", "t:C"]);
    assert!(stations[0].is_transfer_point);
}

#[test]
fn decimal_stop_sequences_keep_order_test() {
    let stop_times = "\
trip_id,stop_id,stop_sequence
A1,S3,3.0
A1,S1N,1.0
A1,S2N,2.0
";
    let data = decode(FeedBuilder::subway().file("stop_times.txt", stop_times));
    let index = FeedIndex::new("test", &data);
    assert_eq!(index.trip_stops("A1"), ["S1N", "S2N", "S3"]);
}

#[test]
fn bus_and_ferry_keep_every_stop_test() {
    let data = decode(FeedBuilder::subway());
    for mode in [Mode::Bus, Mode::Ferry] {
        let config = OperatorConfig::new("bus", "Bus", "Bus", mode, "#000000");
        let index = FeedIndex::new("bus", &data);
        let stations = build_stations(&config, &data.stops, &index);
        let ids: Vec<_> = stations.iter().map(|station| station.id.as_str()).collect();
        assert_eq!(ids, ["bus:S1", "bus:S1N", "bus:S2", "bus:S2N", "bus:S3"]);
        assert_eq!(stations[1].route_ids, ["bus:A", "bus:C"]);
    }
}

#[test]
fn station_order_test() {
    let stop_times = "\
trip_id,stop_id,stop_sequence
A1,S1N,1
A1,S2N,2
A1,S1N,3
A1,S4,4
A1,S3,5
C1,S4,1
";
    let data = decode(FeedBuilder::subway().file("stop_times.txt", stop_times));
    let config = subway_config("test");
    let index = FeedIndex::new("test", &data);
    let stations = build_stations(&config, &data.stops, &index);
    let orders = station_orders(&index, &stations);

    // Repeats keep their first position, stops that are not stations vanish.
    assert_eq!(orders["test:A"], ["test:S1", "test:S2", "test:S3"]);
    assert!(!orders.contains_key("test:C"));
}

#[test]
fn one_geometry_per_branch_test() {
    let shapes = "\
shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence
N1,40.700,-74.000,1
N1,40.750,-73.950,2
N1,40.800,-73.900,3
N2,40.705,-73.995,1
N2,40.750,-73.950,2
N2,40.780,-73.920,3
N2,40.800,-73.900,4
F1,40.600,-73.800,1
F1,40.650,-73.750,2
";
    let trips = "\
route_id,trip_id,shape_id
A,A1,N1
A,A2,N2
A,A3,F1
A,A4,N1
";
    let data = decode(
        FeedBuilder::subway()
            .file("shapes.txt", shapes)
            .file("trips.txt", trips),
    );
    let index = FeedIndex::new("test", &data);
    let geometries = select_geometries(&data, &index, &transform::Config::default());

    assert_eq!(geometries.len(), 2);
    assert!(geometries.iter().all(|geometry| geometry.route_id == "test:A"));
    // N1 and N2 start together, N2 has more points.
    assert_eq!(geometries[0].coordinates.len(), 4);
    assert_eq!(geometries[0].coordinates[0], (-73.995, 40.705));
    assert_eq!(geometries[1].coordinates, [(-73.8, 40.6), (-73.75, 40.65)]);
}

#[test]
fn shapes_follow_point_sequence_test() {
    let data = decode(FeedBuilder::subway());
    let index = FeedIndex::new("test", &data);
    let geometries = select_geometries(&data, &index, &transform::Config::default());

    let ids: Vec<_> = geometries.iter().map(|g| g.route_id.as_str()).collect();
    assert_eq!(ids, ["test:A", "test:C"]);
    assert_eq!(
        geometries[0].coordinates,
        [(-74.0, 40.7), (-73.99, 40.71), (-73.98, 40.72)]
    );
}

#[test]
fn geometry_from_stops_without_shapes_test() {
    let data = decode(FeedBuilder::subway().without("shapes.txt"));
    let index = FeedIndex::new("test", &data);
    let geometries = select_geometries(&data, &index, &transform::Config::default());

    assert_eq!(geometries.len(), 2);
    assert_eq!(geometries[0].route_id, "test:A");
    assert_eq!(
        geometries[0].coordinates,
        [(-74.0, 40.7), (-73.99, 40.71), (-73.98, 40.72)]
    );
    assert_eq!(geometries[1].coordinates.len(), 2);
}

#[test]
fn empty_shapes_table_falls_back_test() {
    let data = decode(
        FeedBuilder::subway().file("shapes.txt", "shape_id,shape_pt_lat,shape_pt_lon\n"),
    );
    let index = FeedIndex::new("test", &data);
    let geometries = select_geometries(&data, &index, &transform::Config::default());
    assert_eq!(geometries.len(), 2);
}

#[test]
fn single_stop_trip_has_no_geometry_test() {
    let stop_times = "trip_id,stop_id,stop_sequence\nA1,S1N,1\nC1,S1N,1\nC1,S2N,2\n";
    let data = decode(
        FeedBuilder::subway()
            .without("shapes.txt")
            .file("stop_times.txt", stop_times),
    );
    let index = FeedIndex::new("test", &data);
    let geometries = select_geometries(&data, &index, &transform::Config::default());
    assert_eq!(geometries.len(), 1);
    assert_eq!(geometries[0].route_id, "test:C");
}

fn geometry(route_id: &str, coordinates: &[(f64, f64)]) -> RouteGeometry {
    RouteGeometry {
        route_id: route_id.to_string(),
        coordinates: coordinates.to_vec(),
    }
}

#[test]
fn lone_geometry_is_untouched_test() {
    let config = transform::Config::default();
    let lone = vec![geometry("x:1", &[(-74.0, 40.7), (-73.9, 40.8)])];
    assert_eq!(apply_parallel_offsets(lone.clone(), &config), lone);

    let apart = vec![
        geometry("x:1", &[(-74.0, 40.7), (-73.9, 40.8)]),
        geometry("x:2", &[(-73.0, 41.7), (-72.9, 41.8)]),
    ];
    assert_eq!(apply_parallel_offsets(apart.clone(), &config), apart);
}

#[test]
fn shared_track_fans_out_test() {
    let config = transform::Config::default();
    let track = [(-74.0, 40.7), (-73.99, 40.7), (-73.98, 40.7)];
    let geometries = vec![
        geometry("x:3", &track),
        geometry("x:1", &track),
        geometry("x:2", &track),
    ];

    let groups = overlap_groups(&geometries, config.grid_precision);
    assert!(groups.iter().all(|group| group.members() == ["x:1", "x:2", "x:3"]));
    let offsets = route_offsets(&geometries, &config);
    assert_eq!(offsets["x:1"], -1.0);
    assert_eq!(offsets["x:2"], 0.0);
    assert_eq!(offsets["x:3"], 1.0);

    let shifted = apply_parallel_offsets(geometries, &config);
    assert_eq!(shifted[0].route_id, "x:3");
    // Eastbound, so positive offsets move north by 10 m per step.
    for (point, original) in shifted[0].coordinates.iter().zip(&track) {
        assert!(close(point.0, original.0));
        assert!(close(point.1, original.1 + 10.0 / 111_000.0));
    }
    for (point, original) in shifted[1].coordinates.iter().zip(&track) {
        assert!(close(point.1, original.1 - 10.0 / 111_000.0));
    }
    assert_eq!(shifted[2].coordinates, track);
}

#[test]
fn pair_is_symmetric_test() {
    let config = transform::Config::default();
    let track = [(-74.0, 40.7), (-73.99, 40.71), (-73.98, 40.72)];
    let shifted = apply_parallel_offsets(
        vec![geometry("x:a", &track), geometry("x:b", &track)],
        &config,
    );
    for ((a, b), original) in shifted[0]
        .coordinates
        .iter()
        .zip(&shifted[1].coordinates)
        .zip(&track)
    {
        assert_ne!(a, b);
        assert!(close((a.0 + b.0) / 2.0, original.0));
        assert!(close((a.1 + b.1) / 2.0, original.1));
    }
}
