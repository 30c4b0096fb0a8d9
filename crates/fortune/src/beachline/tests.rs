use super::*;
use crate::geometry::{Arc, Point, Ray};
use proptest::prelude::*;
use proptest::sample::Index;

fn arc(x: i64, y: i64) -> Arc {
    Arc::new(Point::new(x, y))
}

fn ray() -> Ray {
    Ray::new(Point::new(0, 0), Point::new(0, 1))
}

fn foci(bl: &Beachline) -> Vec<Point> {
    bl.leaves()
        .into_iter()
        .map(|id| bl.arc(id).unwrap().focus)
        .collect()
}

/// Neighbor lookups agree with the in-order sequence and parent links are
/// consistent with child links.
fn assert_consistent(bl: &Beachline) {
    let leaves = bl.leaves();
    if leaves.is_empty() {
        assert!(bl.is_empty());
        return;
    }
    assert_eq!(bl.find_next_arc(Side::Left, leaves[0]), None);
    assert_eq!(bl.find_next_arc(Side::Right, *leaves.last().unwrap()), None);
    for pair in leaves.windows(2) {
        assert_eq!(bl.find_next_arc(Side::Right, pair[0]), Some(pair[1]));
        assert_eq!(bl.find_next_arc(Side::Left, pair[1]), Some(pair[0]));
    }
    let bps = bl.breakpoints();
    assert_eq!(bps.len(), leaves.len() - 1);
    for bp in &bps {
        let node = bl.node(bp.node).unwrap();
        assert_eq!(bl.parent(node.left), Some(bp.node));
        assert_eq!(bl.parent(node.right), Some(bp.node));
    }
    assert_eq!(bl.parent(bl.root().unwrap()), None);
}

#[test]
fn empty_beachline_has_nothing_to_find() {
    let bl = Beachline::new();
    assert!(bl.is_empty());
    assert_eq!(bl.find_arc(5, 0), (None, None));
    assert_eq!(bl.find_next_arc(Side::Left, NodeId(0)), None);
    assert!(bl.leaves().is_empty());
    assert!(bl.breakpoints().is_empty());
}

#[test]
fn single_leaf_is_found_without_side() {
    let mut bl = Beachline::new();
    let root = bl.insert_root(arc(1, 1)).unwrap();
    assert_eq!(bl.find_arc(-100, 5), (Some(root), None));
    assert_eq!(bl.find_arc(100, 5), (Some(root), None));
    assert_eq!(bl.find_next_arc(Side::Right, root), None);
    assert_eq!(bl.insert_root(arc(2, 2)), Err(BeachlineError::NotEmpty));
}

#[test]
fn three_way_split_orders_copies_around_new_arc() {
    let mut bl = Beachline::new();
    let root = bl.insert_root(arc(0, 5)).unwrap();
    let lower_ray = Ray::new(Point::new(2, 5), Point::new(0, -1));
    let upper_ray = Ray::new(Point::new(2, 5), Point::new(0, 1));
    let split = bl
        .split_leaf(root, None, arc(4, 5), lower_ray, upper_ray)
        .unwrap();

    assert_eq!(bl.leaves(), vec![split.lower, split.new, split.upper]);
    assert_eq!(
        foci(&bl),
        vec![Point::new(0, 5), Point::new(4, 5), Point::new(0, 5)]
    );
    assert_eq!(bl.root(), Some(split.lower_breakpoint));
    assert_eq!(
        bl.bounding_breakpoints(split.new),
        (Some(split.lower_breakpoint), Some(split.upper_breakpoint))
    );
    assert_eq!(bl.node(split.lower_breakpoint).unwrap().ray, lower_ray);
    assert_eq!(bl.node(split.upper_breakpoint).unwrap().ray, upper_ray);
    // The replaced leaf is gone for good.
    assert!(bl.leaf(root).is_none());
    assert_eq!(
        bl.split_leaf(root, None, arc(9, 9), ray(), ray()),
        Err(BeachlineError::NoSuchLeaf(root))
    );
    assert_consistent(&bl);
}

#[test]
fn find_arc_follows_live_breakpoints() {
    let mut bl = Beachline::new();
    let root = bl.insert_root(arc(0, 5)).unwrap();
    let split = bl.split_leaf(root, None, arc(4, 5), ray(), ray()).unwrap();

    // At d = 4 the new arc is a horizontal ray at y = 5: ties go right.
    assert_eq!(bl.find_arc(0, 4), (Some(split.lower), Some(Side::Left)));
    assert_eq!(bl.find_arc(5, 4), (Some(split.upper), Some(Side::Right)));
    // At d = 6 it has widened to roughly 1.54 ≤ y ≤ 8.46.
    assert_eq!(bl.find_arc(5, 6), (Some(split.new), Some(Side::Left)));
    assert_eq!(bl.find_arc(1, 6), (Some(split.lower), Some(Side::Left)));
    assert_eq!(bl.find_arc(9, 6), (Some(split.upper), Some(Side::Right)));
    let y = bl.breakpoint_y(split.lower_breakpoint, 6).unwrap();
    assert!((y - 1.536).abs() < 1e-3, "y={y}");
}

#[test]
fn split_on_sweep_keeps_y_order() {
    let mut bl = Beachline::new();
    let root = bl.insert_root(arc(3, 2)).unwrap();
    let up = bl.split_leaf_on_sweep(root, None, arc(3, 8), ray()).unwrap();
    assert_eq!(bl.leaves(), vec![root, up]);

    let mut bl = Beachline::new();
    let root = bl.insert_root(arc(3, 2)).unwrap();
    let down = bl.split_leaf_on_sweep(root, None, arc(3, -4), ray()).unwrap();
    assert_eq!(bl.leaves(), vec![down, root]);
    assert_consistent(&bl);
}

#[test]
fn wrong_attachment_side_is_rejected() {
    let mut bl = Beachline::new();
    let root = bl.insert_root(arc(0, 5)).unwrap();
    let split = bl.split_leaf(root, None, arc(4, 5), ray(), ray()).unwrap();
    let err = bl
        .split_leaf(split.lower, Some(Side::Right), arc(6, 1), ray(), ray())
        .unwrap_err();
    assert_eq!(
        err,
        BeachlineError::Detached {
            id: split.lower,
            parent: split.lower_breakpoint
        }
    );
    assert!(bl
        .split_leaf(split.lower, Some(Side::Left), arc(6, 1), ray(), ray())
        .is_ok());
}

#[test]
fn remove_arc_merges_bounding_breakpoints() {
    // A' B A1 C A2
    let mut bl = Beachline::new();
    let root = bl.insert_root(arc(0, 0)).unwrap();
    let first = bl.split_leaf(root, None, arc(1, 1), ray(), ray()).unwrap();
    let second = bl
        .split_leaf(first.upper, None, arc(2, 2), ray(), ray())
        .unwrap();
    assert_eq!(
        bl.leaves(),
        vec![first.lower, first.new, second.lower, second.new, second.upper]
    );

    let center = Point::new(7, 3);
    let removal = bl.remove_arc(first.new, center).unwrap();
    assert_eq!(removal.lower, first.lower);
    assert_eq!(removal.upper, second.lower);
    let merged = bl.node(removal.merged).unwrap();
    assert_eq!(merged.ray.start, center);
    // Both new neighbours are copies of A: no bisector.
    assert_eq!(merged.ray.direction, Point::new(0, 0));
    assert_eq!(
        bl.leaves(),
        vec![first.lower, second.lower, second.new, second.upper]
    );
    assert!(bl.leaf(first.new).is_none());
    assert_consistent(&bl);

    // The edge arcs cannot vanish.
    assert_eq!(
        bl.remove_arc(first.lower, center),
        Err(BeachlineError::NoNeighbor {
            leaf: first.lower,
            side: Side::Left
        })
    );
}

#[test]
fn remove_arc_reports_closed_rays_lower_first() {
    let mut bl = Beachline::new();
    let root = bl.insert_root(arc(0, 0)).unwrap();
    let lo = Ray::new(Point::new(1, 1), Point::new(-1, -1));
    let hi = Ray::new(Point::new(1, 1), Point::new(1, 1));
    let split = bl.split_leaf(root, None, arc(2, 2), lo, hi).unwrap();
    let next = bl
        .split_leaf(split.upper, None, arc(3, 9), ray(), ray())
        .unwrap();
    // [A, B, A, C, A]: remove the middle A.
    let removal = bl.remove_arc(next.lower, Point::new(5, 5)).unwrap();
    assert_eq!(removal.closed[0], hi);
    assert_eq!(removal.closed[1], ray());
    assert_eq!(
        foci(&bl),
        vec![
            Point::new(0, 0),
            Point::new(2, 2),
            Point::new(3, 9),
            Point::new(0, 0)
        ]
    );
    // Merged breakpoint now separates B and C.
    let merged = bl.node(removal.merged).unwrap();
    assert_eq!(merged.ray.direction, Point::new(7, -1));
    assert_consistent(&bl);
}

#[derive(Clone, Debug)]
enum Op {
    Split(Index),
    Remove(Index),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<Index>().prop_map(Op::Split),
        any::<Index>().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn splices_track_a_flat_model(ops in prop::collection::vec(op(), 1..60)) {
        let mut bl = Beachline::new();
        bl.insert_root(arc(0, 0)).unwrap();
        let mut model = vec![Point::new(0, 0)];

        for (k, op) in ops.into_iter().enumerate() {
            let leaves = bl.leaves();
            match op {
                Op::Split(i) => {
                    let i = i.index(leaves.len());
                    let focus = Point::new(k as i64 + 1, 0);
                    bl.split_leaf(leaves[i], None, Arc::new(focus), ray(), ray()).unwrap();
                    let old = model[i];
                    model[i] = focus;
                    model.insert(i + 1, old);
                    model.insert(i, old);
                }
                Op::Remove(i) => {
                    if leaves.len() < 3 {
                        continue;
                    }
                    let i = 1 + i.index(leaves.len() - 2);
                    let removal = bl.remove_arc(leaves[i], Point::new(0, 0)).unwrap();
                    prop_assert_eq!(removal.lower, leaves[i - 1]);
                    prop_assert_eq!(removal.upper, leaves[i + 1]);
                    model.remove(i);
                }
            }
            prop_assert_eq!(foci(&bl), model.clone());
            assert_consistent(&bl);
        }
    }
}
