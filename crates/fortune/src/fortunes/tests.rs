use std::collections::BTreeSet;

use super::*;
use crate::event::{EventId, EventType};
use proptest::prelude::*;

fn pts(xy: &[(i64, i64)]) -> Vec<Point> {
    xy.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn edge(a: (i64, i64), b: (i64, i64)) -> Edge {
    Edge::complete(Point::new(a.0, a.1), Point::new(b.0, b.1))
}

fn run(width: i64, height: i64, xy: &[(i64, i64)]) -> BTreeSet<Edge> {
    let canvas = Canvas::new(width, height).unwrap();
    FortunesAlgorithm::new(canvas, &pts(xy))
        .unwrap()
        .get_areas()
        .unwrap()
}

/// Gap between the nearest and second-nearest site: zero on a Voronoi edge.
fn bisector_gap(p: (f64, f64), sites: &[Point]) -> f64 {
    let mut d: Vec<f64> = sites
        .iter()
        .map(|s| ((s.x as f64 - p.0).powi(2) + (s.y as f64 - p.1).powi(2)).sqrt())
        .collect();
    d.sort_by(f64::total_cmp);
    d[1] - d[0]
}

fn midpoint(e: &Edge) -> (f64, f64) {
    let end = e.end.unwrap();
    (
        (e.start.x + end.x) as f64 / 2.0,
        (e.start.y + end.y) as f64 / 2.0,
    )
}

#[test]
fn no_sites_no_edges() {
    assert!(run(10, 10, &[]).is_empty());
}

#[test]
fn single_site_no_edges() {
    let canvas = Canvas::new(10, 10).unwrap();
    let mut algo = FortunesAlgorithm::new(canvas, &pts(&[(4, 4)])).unwrap();
    assert_eq!(algo.pending_events(), 1);
    assert!(algo.step().unwrap());
    assert_eq!(algo.directrix(), 4);
    assert_eq!(algo.beachline().leaves().len(), 1);
    assert!(!algo.step().unwrap());
    assert!(algo.get_areas().unwrap().is_empty());
}

#[test]
fn two_sites_are_split_by_their_bisector() {
    let edges = run(10, 10, &[(2, 5), (8, 5)]);
    let expected: BTreeSet<Edge> = [edge((5, 5), (5, 0)), edge((5, 5), (5, 10))].into();
    assert_eq!(edges, expected);
}

#[test]
fn sites_sharing_x_give_one_horizontal_edge() {
    let edges = run(10, 10, &[(3, 2), (3, 8)]);
    let expected: BTreeSet<Edge> = [edge((0, 5), (10, 5))].into();
    assert_eq!(edges, expected);
}

#[test]
fn triangle_with_origin_site() {
    let canvas = Canvas::new(10, 10).unwrap();
    let mut algo = FortunesAlgorithm::new(canvas, &pts(&[(0, 0), (0, 10), (10, 5)])).unwrap();
    let edges = algo.get_areas().unwrap();
    let expected: BTreeSet<Edge> = [
        edge((0, 5), (4, 5)),
        edge((4, 5), (7, 0)),
        edge((4, 5), (7, 10)),
    ]
    .into();
    assert_eq!(edges, expected);
    // One circle event; its zero-length second edge is dropped.
    assert_eq!(
        algo.completed_edges(),
        &[edge((0, 5), (4, 5))].into_iter().collect::<BTreeSet<_>>()
    );
    assert!(edges.iter().all(Edge::is_complete));
}

#[test]
fn get_areas_is_idempotent() {
    let canvas = Canvas::new(100, 100).unwrap();
    let sites = pts(&[(12, 40), (25, 85), (31, 10), (47, 55), (60, 30)]);
    let mut algo = FortunesAlgorithm::new(canvas, &sites).unwrap();
    let first = algo.get_areas().unwrap();
    let second = algo.get_areas().unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn sweep_continues_after_get_areas() {
    let canvas = Canvas::new(10, 10).unwrap();
    let mut algo = FortunesAlgorithm::new(canvas, &pts(&[(2, 5)])).unwrap();
    assert!(algo.get_areas().unwrap().is_empty());
    algo.add_point(Point::new(8, 5)).unwrap();
    assert_eq!(algo.get_areas().unwrap(), run(10, 10, &[(2, 5), (8, 5)]));
}

#[test]
fn invalid_input_is_rejected() {
    let canvas = Canvas::new(10, 10).unwrap();
    assert!(matches!(
        FortunesAlgorithm::new(canvas, &pts(&[(1, 1), (1, 1)])),
        Err(FortuneError::Site(SiteError::Duplicate { .. }))
    ));
    assert!(matches!(
        FortunesAlgorithm::new(canvas, &pts(&[(11, 1)])),
        Err(FortuneError::Site(SiteError::OutOfCanvas { .. }))
    ));
    let flat = Canvas {
        width: 0,
        height: 10,
    };
    assert!(matches!(
        FortunesAlgorithm::new(flat, &[]),
        Err(FortuneError::Geometry(GeometryError::InvalidCanvas { .. }))
    ));
}

#[test]
fn rejected_batch_queues_nothing() {
    let canvas = Canvas::new(10, 10).unwrap();
    let mut algo = FortunesAlgorithm::new(canvas, &pts(&[(5, 5)])).unwrap();
    let err = algo.add_points(&pts(&[(1, 1), (20, 1)])).unwrap_err();
    assert!(matches!(err, FortuneError::Site(SiteError::OutOfCanvas { .. })));
    assert_eq!(algo.pending_events(), 1);
    assert_eq!(algo.sites().len(), 1);
}

#[test]
fn sites_behind_the_sweep_are_rejected() {
    let canvas = Canvas::new(10, 10).unwrap();
    let mut algo = FortunesAlgorithm::new(canvas, &pts(&[(6, 5)])).unwrap();
    algo.get_areas().unwrap();
    assert_eq!(
        algo.add_point(Point::new(3, 3)),
        Err(FortuneError::Site(SiteError::BehindSweep {
            site: Point::new(3, 3),
            directrix: 6
        }))
    );
    assert!(algo.add_point(Point::new(6, 9)).is_ok());
}

#[test]
fn site_splitting_a_vanishing_arc_deactivates_its_event() {
    let canvas = Canvas::new(20, 20).unwrap();
    let sites = pts(&[(1, 0), (3, 10), (11, 10), (12, 6)]);
    let mut algo = FortunesAlgorithm::new(canvas, &sites).unwrap();
    for _ in 0..3 {
        assert!(algo.step().unwrap());
    }
    // Ids 0..=3 are the sites; the first circle event follows.
    let pending = EventId(4);
    let event = *algo.queue().get(pending).unwrap();
    assert_eq!(event.kind, EventType::Circle);
    assert_eq!(event.point, Point::new(7, 4));
    assert!(event.active);

    // Site (12, 6) lands on the arc that was about to vanish.
    assert!(algo.step().unwrap());
    assert!(!algo.queue().get(pending).unwrap().active);

    let edges = algo.get_areas().unwrap();
    let expected: BTreeSet<Edge> = [
        edge((-23, 10), (6, 4)),
        edge((6, 4), (8, 0)),
        edge((7, 6), (6, 4)),
        edge((7, 6), (7, 7)),
        edge((7, 7), (20, 10)),
        edge((7, 10), (7, 7)),
        edge((7, 10), (7, 20)),
    ]
    .into();
    assert_eq!(edges, expected);
}

#[test]
fn vertex_behind_the_canvas_edge_drops_the_edge() {
    // (2,126) and (2,993) share x; their bisector meets (33,292)'s cell far
    // to the left of the canvas.
    let edges = run(1000, 1000, &[(2, 126), (2, 993), (33, 292)]);
    let expected: BTreeSet<Edge> = [
        edge((-427, 292), (-1859, 559)),
        edge((0, 212), (1000, 26)),
        edge((0, 641), (1000, 685)),
    ]
    .into();
    assert_eq!(edges, expected);
}

#[test]
fn edges_lie_between_their_two_nearest_sites() {
    let canvas = Canvas::new(100, 100).unwrap();
    let sites = pts(&[
        (12, 40),
        (25, 85),
        (31, 10),
        (47, 55),
        (52, 92),
        (60, 30),
        (71, 70),
        (83, 15),
        (88, 50),
        (95, 88),
    ]);
    let mut algo = FortunesAlgorithm::new(canvas, &sites).unwrap();
    let edges = algo.get_areas().unwrap();
    assert_eq!(edges.len(), 26);
    for e in &edges {
        let gap = bisector_gap(midpoint(e), &sites);
        assert!(gap < 1.5, "edge {e} gap {gap}");
    }
    // Vertices are (nearly) equidistant from three sites.
    for e in algo.completed_edges() {
        let v = e.end.unwrap();
        let mut d: Vec<f64> = sites
            .iter()
            .map(|s| (s.to_vector() - v.to_vector()).norm())
            .collect();
        d.sort_by(f64::total_cmp);
        assert!(d[2] - d[0] < 1.5, "vertex {v}: {:?}", &d[..3]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_sites_give_a_voronoi_subdivision(
        xy in prop::collection::btree_set((0i64..=300, 0i64..=300), 1..30)
    ) {
        let sites: Vec<Point> = xy.into_iter().map(|(x, y)| Point::new(x, y)).collect();
        let canvas = Canvas::new(300, 300).unwrap();
        let mut algo = FortunesAlgorithm::new(canvas, &sites).unwrap();
        let edges = algo.get_areas().unwrap();
        prop_assert_eq!(&edges, &algo.get_areas().unwrap());
        if sites.len() > 1 {
            prop_assert!(!edges.is_empty());
        }
        for e in &edges {
            prop_assert!(e.is_complete());
            prop_assert!(!e.is_degenerate());
            let gap = bisector_gap(midpoint(e), &sites);
            prop_assert!(gap < 3.0, "edge {} gap {}", e, gap);
        }
        for e in algo.boundary_edges() {
            prop_assert!(canvas.contains(e.start) && canvas.contains(e.end.unwrap()));
        }
    }
}
