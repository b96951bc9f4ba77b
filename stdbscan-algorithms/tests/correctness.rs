use stdbscan_algorithms::{cluster, DbscanConfig, Error, Metric, Point, PointBatch, StDbscan, NOISE};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn triangle(x: f64, y: f64, t: f64) -> Vec<Point> {
    vec![
        Point::new(x, y, t),
        Point::new(x + 0.5, y, t),
        Point::new(x + 0.25, y + 0.4, t),
    ]
}

/// Runs the indexed and brute-force paths and checks they agree.
fn run_both(points: &[Point], config: &DbscanConfig) -> stdbscan_algorithms::Clustering {
    let indexed = cluster(points, &config.clone().with_index(true)).unwrap();
    let brute = cluster(points, &config.clone().with_index(false)).unwrap();
    assert_eq!(indexed, brute, "indexed and brute-force results differ");
    indexed
}

#[test]
fn test_tight_triangle_is_one_cluster() {
    init_logging();
    let result = run_both(&triangle(0.0, 0.0, 0.0), &DbscanConfig::new(1.0, 2));
    assert_eq!(result.labels, vec![0, 0, 0]);
    assert_eq!(result.core_sample_indices, vec![0, 1, 2]);
}

#[test]
fn test_isolated_point_is_noise() {
    init_logging();
    let mut points = triangle(0.0, 0.0, 0.0);
    points.push(Point::new(10.0, 10.0, 0.0));

    let result = run_both(&points, &DbscanConfig::new(1.0, 2));
    assert_eq!(result.labels, vec![0, 0, 0, NOISE]);
    assert!(!result.is_core(3));
    assert_eq!(result.noise_indices(), vec![3]);
}

#[test]
fn test_two_separated_triangles() {
    init_logging();
    let mut points = triangle(0.0, 0.0, 0.0);
    points.extend(triangle(5.0, 5.0, 0.0));

    let result = run_both(&points, &DbscanConfig::new(1.0, 2));
    assert_eq!(result.n_clusters, 2);
    assert_eq!(result.labels, vec![0, 0, 0, 1, 1, 1]);
    assert_eq!(result.cluster_sizes(), vec![3, 3]);
}

#[test]
fn test_chain_at_exactly_eps_is_one_cluster() {
    init_logging();
    let points: Vec<Point> = (0..20)
        .map(|i| Point::new(f64::from(i) * 2.0, 1.0, 0.0))
        .collect();

    let result = run_both(&points, &DbscanConfig::new(2.0, 2));
    assert_eq!(result.n_clusters, 1);
    assert!(result.labels.iter().all(|&label| label == 0));
    assert_eq!(result.core_sample_indices, (0..20).collect::<Vec<_>>());

    // Inner points have both neighbors, so min_samples = 3 still chains
    // while the two end points become border points.
    let result = run_both(&points, &DbscanConfig::new(2.0, 3));
    assert_eq!(result.n_clusters, 1);
    assert_eq!(result.core_sample_indices, (1..19).collect::<Vec<_>>());
    assert!(result.labels.iter().all(|&label| label == 0));
}

#[test]
fn test_exactly_eps_pair_across_rounded_cell_boundary() {
    init_logging();
    let points = vec![
        Point::new(0.0, -0.7, 0.0),
        Point::new(0.0, 1.399_999_999_999_999_7, 0.0),
        Point::new(0.0, 2.099_999_999_999_999_6, 0.0),
    ];

    let result = run_both(&points, &DbscanConfig::new(0.7, 2));
    assert_eq!(result.core_sample_indices, vec![1, 2]);
    assert_eq!(result.labels, vec![NOISE, 0, 0]);
}

#[test]
fn test_time_window_excludes_spatial_neighbor() {
    init_logging();
    let points = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(0.5, 0.0, 0.0),
        Point::new(0.25, 0.0, 3.0),
    ];

    let result = run_both(&points, &DbscanConfig::new(1.0, 2));
    assert_eq!(result.labels, vec![0, 0, NOISE]);

    // Widening the temporal window pulls the late point back in.
    let result = run_both(&points, &DbscanConfig::new(1.0, 2).with_time_scale(3.0));
    assert_eq!(result.labels, vec![0, 0, 0]);
}

#[test]
fn test_min_samples_one_has_no_noise() {
    init_logging();
    let points = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(0.5, 0.0, 0.0),
        Point::new(10.0, 0.0, 0.0),
        Point::new(20.0, 20.0, 0.0),
    ];

    let result = run_both(&points, &DbscanConfig::new(1.0, 1));
    assert_eq!(result.core_sample_indices, vec![0, 1, 2, 3]);
    assert_eq!(result.labels, vec![0, 0, 1, 2]);
    assert!(result.noise_indices().is_empty());
}

#[test]
fn test_empty_input() {
    let result = run_both(&[], &DbscanConfig::new(1.0, 2));
    assert!(result.is_empty());
    assert!(result.core_sample_indices.is_empty());
    assert_eq!(result.n_clusters, 0);
}

#[test]
fn test_single_point() {
    let point = [Point::new(3.0, -4.0, 7.0)];
    assert_eq!(run_both(&point, &DbscanConfig::new(1.0, 2)).labels, vec![NOISE]);
    assert_eq!(run_both(&point, &DbscanConfig::new(1.0, 1)).labels, vec![0]);
}

#[test]
fn test_all_noise() {
    let points: Vec<Point> = (0..10)
        .map(|i| Point::new(f64::from(i) * 10.0, 0.0, 0.0))
        .collect();
    let result = run_both(&points, &DbscanConfig::new(1.0, 2));
    assert_eq!(result.n_clusters, 0);
    assert!(result.labels.iter().all(|&label| label == NOISE));
    assert_eq!(result.statistics().noise_points, 10);
}

#[test]
fn test_coincident_points() {
    let points = vec![Point::new(1.0, 1.0, 1.0); 5];
    let result = run_both(&points, &DbscanConfig::new(0.5, 5));
    assert_eq!(result.labels, vec![0; 5]);

    let result = run_both(&points, &DbscanConfig::new(0.5, 6));
    assert_eq!(result.labels, vec![NOISE; 5]);
}

#[test]
fn test_negative_coordinates() {
    let mut points = triangle(-100.0, -50.0, -5.0);
    points.extend(triangle(100.0, 50.0, 5.0));
    let result = run_both(&points, &DbscanConfig::new(1.0, 3));
    assert_eq!(result.labels, vec![0, 0, 0, 1, 1, 1]);
}

#[test]
fn test_configuration_errors() {
    let points = triangle(0.0, 0.0, 0.0);

    assert_eq!(
        cluster(&points, &DbscanConfig::new(1.0, 2).with_metric(Metric::Haversine)).unwrap_err(),
        Error::UnsupportedMetric("haversine".to_string())
    );
    assert!(matches!(
        cluster(&points, &DbscanConfig::new(0.0, 2)),
        Err(Error::InvalidParameter { name: "eps", .. })
    ));
    assert!(matches!(
        cluster(&points, &DbscanConfig::new(1.0, 0)),
        Err(Error::InvalidParameter {
            name: "min_samples",
            ..
        })
    ));
    // Bad configuration is reported even for empty input.
    assert!(cluster(&[], &DbscanConfig::new(-1.0, 2)).is_err());
}

#[test]
fn test_grid_limit_enforced() {
    let points = vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0e12, 1.0e12, 0.0)];
    let err = cluster(&points, &DbscanConfig::new(1.0e-6, 2)).unwrap_err();
    assert!(matches!(
        err,
        Error::ResourceLimitExceeded {
            resource: "grid cells",
            ..
        }
    ));
}

#[test]
fn test_batch_api_matches_slice_api() {
    let mut points = triangle(0.0, 0.0, 0.0);
    points.extend(triangle(0.2, 0.2, 10.0));
    let batch: PointBatch = points.iter().copied().collect();

    let algo = StDbscan::new(DbscanConfig::new(1.0, 3).with_parallel(false));
    let from_batch = algo.cluster(&batch).unwrap();
    let from_slice = cluster(&points, algo.config()).unwrap();
    assert_eq!(from_batch, from_slice);
    assert_eq!(from_batch.labels, vec![0, 0, 0, 1, 1, 1]);
}
