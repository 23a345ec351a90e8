use kstream::cluster::{
    nearest_centroid, partition, recompute_centroids, BatchKmeans, Clustering, EmptyClusterPolicy,
    History, IncrementalKmeans, Phase,
};
use kstream::Point;
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Point::new(x, y))
}

fn pixel() -> impl Strategy<Value = Point> {
    (0i32..64, 0i32..64).prop_map(Point::from)
}

/// Every input point appears exactly once across the clusters.
fn is_partition_of(clusters: &[Vec<Point>], points: &[Point]) -> bool {
    let mut flat: Vec<Point> = clusters.concat();
    let mut expected = points.to_vec();
    let key = |p: &Point| (p.x.to_bits(), p.y.to_bits());
    flat.sort_by_key(key);
    expected.sort_by_key(key);
    flat == expected
}

proptest! {
    #[test]
    fn prop_batch_labels_in_range(
        points in prop::collection::vec(point(), 1..30),
        k in 1usize..5
    ) {
        let mut model = BatchKmeans::new(k)
            .unwrap()
            .with_empty_cluster_policy(EmptyClusterPolicy::KeepCentroid);
        let labels = model.fit_predict(&points).unwrap();

        prop_assert_eq!(labels.len(), points.len());
        for &l in &labels {
            prop_assert!(l < k.min(points.len()));
        }
    }

    #[test]
    fn prop_batch_every_snapshot_is_a_partition(
        points in prop::collection::vec(pixel(), 1..30),
        k in 1usize..5
    ) {
        let mut model = BatchKmeans::new(k)
            .unwrap()
            .with_iterations(5)
            .with_empty_cluster_policy(EmptyClusterPolicy::KeepCentroid)
            .with_presenter(History::new());
        let run = model.find_k_means(&points).unwrap();

        prop_assert!(is_partition_of(&run.clusters, &points));
        for snap in model.presenter().snapshots() {
            prop_assert_eq!(snap.clusters.len(), snap.centroids.len());
            prop_assert!(is_partition_of(&snap.clusters, &points));
        }
    }

    #[test]
    fn prop_batch_deterministic(
        points in prop::collection::vec(point(), 1..30),
        k in 1usize..5
    ) {
        let run = |pts: &[Point]| {
            BatchKmeans::new(k)
                .unwrap()
                .with_empty_cluster_policy(EmptyClusterPolicy::KeepCentroid)
                .find_k_means(pts)
                .unwrap()
        };
        prop_assert_eq!(run(&points), run(&points));
    }

    #[test]
    fn prop_incremental_state_is_a_partition(
        points in prop::collection::vec(pixel(), 1..40),
        k in 1usize..6
    ) {
        let mut engine = IncrementalKmeans::new(k)
            .unwrap()
            .with_empty_cluster_policy(EmptyClusterPolicy::KeepCentroid)
            .with_presenter(History::new());
        for (i, p) in points.iter().enumerate() {
            let converging = engine.phase() == Phase::Converging;
            engine.add_point(*p).unwrap();
            let seen = &points[..=i];

            let snapshots = engine.presenter_mut().take();
            let expected = if converging { 1 + engine.rounds() } else { 1 };
            prop_assert_eq!(snapshots.len(), expected);
            for (round, snap) in snapshots.iter().enumerate() {
                prop_assert_eq!(snap.iteration, round);
                prop_assert_eq!(snap.clusters.len(), snap.centroids.len());
                prop_assert!(is_partition_of(&snap.clusters, seen));
            }

            let state = engine.state();
            prop_assert_eq!(state.centroids().len(), state.clusters().len());
            prop_assert!(state.len() <= k);
            prop_assert!(is_partition_of(state.clusters(), seen));
            prop_assert!(state.centroids().iter().all(Point::is_finite));
        }
        if engine.phase() == Phase::Converging {
            prop_assert_eq!(engine.state().len(), k);
        }
    }

    #[test]
    fn prop_centroids_are_means(
        clusters in prop::collection::vec(prop::collection::vec(point(), 1..10), 1..6)
    ) {
        let centroids = recompute_centroids(&clusters).unwrap();
        prop_assert_eq!(centroids.len(), clusters.len());
        for (c, cluster) in centroids.iter().zip(&clusters) {
            let n = cluster.len() as f64;
            let mx = cluster.iter().map(|p| p.x).sum::<f64>() / n;
            let my = cluster.iter().map(|p| p.y).sum::<f64>() / n;
            prop_assert!((c.x - mx).abs() <= 1e-9 * mx.abs().max(1.0));
            prop_assert!((c.y - my).abs() <= 1e-9 * my.abs().max(1.0));
        }
    }

    #[test]
    fn prop_nearest_is_minimal_and_first(
        p in point(),
        centroids in prop::collection::vec(point(), 1..10)
    ) {
        let idx = nearest_centroid(&p, &centroids).unwrap();
        let best = p.distance_to(&centroids[idx]);
        for (i, c) in centroids.iter().enumerate() {
            let d = p.distance_to(c);
            prop_assert!(best <= d);
            if i < idx {
                prop_assert!(d > best);
            }
        }
    }

    #[test]
    fn prop_fixed_point_is_stable(
        points in prop::collection::vec(pixel(), 2..30),
        k in 1usize..4
    ) {
        // Iterate until membership stops changing, then check that one more
        // recomputation leaves the centroids where they are.
        let mut model = BatchKmeans::new(k)
            .unwrap()
            .with_iterations(100)
            .with_empty_cluster_policy(EmptyClusterPolicy::KeepCentroid);
        let run = model.find_k_means(&points).unwrap();

        let reassigned = partition(&points, &run.refined_centroids).unwrap();
        if reassigned == run.clusters && reassigned.iter().all(|c| !c.is_empty()) {
            let again = recompute_centroids(&reassigned).unwrap();
            prop_assert_eq!(again, run.refined_centroids);
        }
    }
}

#[test]
fn tie_break_prefers_lower_index() {
    let centroids = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    assert_eq!(nearest_centroid(&Point::new(5.0, 0.0), &centroids), Ok(0));
}

#[test]
fn incremental_growth_then_refinement() {
    let mut engine = IncrementalKmeans::new(3).unwrap().with_presenter(History::new());
    for (x, y) in [(0, 0), (10, 10), (20, 20)] {
        engine.add_point(Point::from((x, y))).unwrap();
    }
    assert_eq!(
        engine.state().centroids(),
        &[
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0)
        ]
    );
    assert_eq!(engine.presenter().snapshots().len(), 3);
    assert!(engine.presenter().snapshots().iter().all(|s| s.iteration == 0));

    engine.add_point(Point::from((1, 1))).unwrap();
    assert_eq!(
        engine.state().clusters()[0],
        vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]
    );
    assert_eq!(engine.state().centroids()[0], Point::new(0.5, 0.5));
    // One placement snapshot plus the default three rounds.
    assert_eq!(engine.presenter().snapshots().len(), 3 + 4);
}

#[test]
fn incremental_is_deterministic() {
    let points: Vec<Point> = (0..50)
        .map(|i| Point::from(((i * 31) % 97, (i * 17) % 59)))
        .collect();
    let run = || {
        let mut engine = IncrementalKmeans::new(4)
            .unwrap()
            .with_empty_cluster_policy(EmptyClusterPolicy::KeepCentroid);
        engine.extend(points.iter().copied()).unwrap();
        engine.state().clone()
    };
    assert_eq!(run(), run());
}
