use super::*;
use nalgebra::vector;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn counts(m: &Mesh) -> (usize, usize, usize) {
    (m.vertices().len(), m.edges().len(), m.polygons().len())
}

#[test]
fn new_mesh_is_one_ccw_rectangle() {
    let m = Mesh::new(10.0, 10.0);
    assert_eq!(counts(&m), (4, 4, 1));
    assert_eq!(
        m.vertices(),
        &[
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0]
        ]
    );
    assert!((m.signed_area(PolyId(0)).unwrap() - 100.0).abs() < 1e-12);
    assert_eq!(m.boundary_edges().count(), 4);
    assert!(m.neighbours(PolyId(0)).is_empty());
    assert_eq!(m.viewport().size(), vector![10.0, 10.0]);
    m.check_invariants().unwrap();
}

#[test]
fn split_square_along_opposite_sides() {
    let mut m = Mesh::new(10.0, 10.0);
    let q = m.split_polygon(PolyId(0), 0, 2, 0.5, 0.5, false).unwrap();
    assert_eq!(q, PolyId(1));
    assert_eq!(counts(&m), (6, 7, 2));
    assert_eq!(m.vertex(VertexId(4)), Some(vector![5.0, 0.0]));
    assert_eq!(m.vertex(VertexId(5)), Some(vector![5.0, 10.0]));
    for p in [PolyId(0), PolyId(1)] {
        assert!((m.signed_area(p).unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(m.polygon(p).unwrap().len(), 4);
    }
    // The cut is the last edge and separates the two halves.
    let cross = m.edge(EdgeId(6)).unwrap();
    assert_eq!(cross.ends, [VertexId(4), VertexId(5)]);
    assert_eq!(cross.polys, [Some(PolyId(0)), Some(PolyId(1))]);
    assert_eq!(m.neighbours(PolyId(0)), vec![PolyId(1)]);
    assert!((m.centroid(PolyId(0)).unwrap() - vector![2.5, 5.0]).norm() < 1e-9);
    assert!((m.centroid(PolyId(1)).unwrap() - vector![7.5, 5.0]).norm() < 1e-9);
    m.check_invariants().unwrap();
}

#[test]
fn split_order_of_positions_does_not_matter() {
    let mut a = Mesh::new(8.0, 4.0);
    let mut b = a.clone();
    a.split_polygon(PolyId(0), 1, 3, 0.3, 0.6, false).unwrap();
    b.split_polygon(PolyId(0), 3, 1, 0.6, 0.3, false).unwrap();
    assert_eq!(a.vertices(), b.vertices());
    assert_eq!(a.edges(), b.edges());
    assert_eq!(a.polygons(), b.polygons());
}

#[test]
fn split_adjacent_sides_cuts_off_a_triangle() {
    let mut m = Mesh::new(4.0, 4.0);
    let q = m.split_polygon_mid(PolyId(0), 0, 1).unwrap();
    assert_eq!(m.polygon(q).unwrap().len(), 3);
    assert_eq!(m.polygon(PolyId(0)).unwrap().len(), 5);
    assert!((m.signed_area(q).unwrap() - 2.0).abs() < 1e-12);
    assert!((m.signed_area(PolyId(0)).unwrap() - 14.0).abs() < 1e-12);
    m.check_invariants().unwrap();
}

#[test]
fn split_first_and_last_sides() {
    let mut m = Mesh::new(4.0, 4.0);
    let q = m.split_polygon_mid(PolyId(0), 0, 3).unwrap();
    assert_eq!(m.polygon(q).unwrap().len(), 5);
    assert_eq!(m.polygon(PolyId(0)).unwrap().len(), 3);
    assert!((m.total_area() - 16.0).abs() < 1e-12);
    m.check_invariants().unwrap();
}

#[test]
fn interior_split_patches_the_neighbour() {
    let mut m = Mesh::new(10.0, 10.0);
    let right = m.split_polygon_mid(PolyId(0), 0, 2).unwrap();
    // Right half: [bottom half, right side, top half, cut(Rev)]; split it
    // along the right side and the shared cut.
    let before = m.polygon(PolyId(0)).unwrap().len();
    let top = m.split_polygon_mid(right, 1, 3).unwrap();
    assert_eq!(counts(&m), (8, 10, 3));
    assert_eq!(m.polygon(PolyId(0)).unwrap().len(), before + 1);
    assert!((m.signed_area(PolyId(0)).unwrap() - 50.0).abs() < 1e-9);
    assert!((m.signed_area(right).unwrap() - 25.0).abs() < 1e-9);
    assert!((m.signed_area(top).unwrap() - 25.0).abs() < 1e-9);
    let mut ns = m.neighbours(PolyId(0));
    ns.sort();
    assert_eq!(ns, vec![right, top]);
    m.check_invariants().unwrap();
}

#[test]
fn bad_arguments_leave_mesh_untouched() {
    let mut m = Mesh::new(10.0, 10.0);
    m.split_polygon_mid(PolyId(0), 0, 2).unwrap();
    let snapshot = m.clone();
    let cases = [
        (PolyId(7), 0, 1, 0.5, 0.5),
        (PolyId(0), 0, 4, 0.5, 0.5),
        (PolyId(0), 2, 2, 0.5, 0.5),
        (PolyId(0), 0, 1, 0.0, 0.5),
        (PolyId(0), 0, 1, 0.5, 1.0),
        (PolyId(0), 0, 1, f64::NAN, 0.5),
    ];
    for (p, a, b, ta, tb) in cases {
        assert!(m.split_polygon(p, a, b, ta, tb, true).is_err());
        assert_eq!(m.vertices(), snapshot.vertices());
        assert_eq!(m.edges(), snapshot.edges());
        assert_eq!(m.polygons(), snapshot.polygons());
    }
    assert_eq!(
        m.split_polygon_mid(PolyId(0), 2, 2),
        Err(MeshError::SameSide {
            poly: PolyId(0),
            index: 2
        })
    );
    assert_eq!(
        m.split_polygon_mid(PolyId(3), 0, 1),
        Err(MeshError::UnknownPolygon {
            poly: PolyId(3),
            count: 2
        })
    );
}

#[test]
fn displacement_keeps_boundary_points_fixed() {
    let mut plain = Mesh::new(10.0, 10.0);
    let mut moved = plain.clone();
    plain.split_polygon(PolyId(0), 0, 2, 0.5, 0.5, false).unwrap();
    moved.split_polygon(PolyId(0), 0, 2, 0.5, 0.5, true).unwrap();
    assert_eq!(plain.vertices(), moved.vertices());
}

#[test]
fn displacement_slides_interior_point_toward_the_other() {
    let mut m = Mesh::new(10.0, 10.0);
    m.split_polygon_mid(PolyId(0), 0, 2).unwrap();
    // Left half: [bottom, cut(Fwd), top, left side]. The neighbour's sides next
    // to the cut are horizontal, parallel to the new cut, so only the cap applies.
    m.split_polygon(PolyId(0), 1, 3, 0.5, 0.5, true).unwrap();
    assert!((m.vertices()[6] - vector![3.75, 5.0]).norm() < 1e-12);
    assert!((m.vertices()[7] - vector![0.0, 5.0]).norm() < 1e-12);
    assert!((m.total_area() - 100.0).abs() < 1e-9);
    m.check_invariants().unwrap();
}

/// Unit-ish square plus a triangle glued to its right side whose upper side
/// leans back over the square.
fn square_with_leaning_neighbour() -> Mesh {
    let mut m = Mesh::new(10.0, 10.0);
    let q = PolyId(1);
    m.verts.push(vector![15.0, 20.0]);
    m.edges[1].polys[1] = Some(q);
    m.edges.push(Edge {
        ends: [VertexId(1), VertexId(4)],
        polys: [Some(q), None],
    });
    m.edges.push(Edge {
        ends: [VertexId(4), VertexId(2)],
        polys: [Some(q), None],
    });
    m.polys.push(Polygon {
        sides: vec![
            OrientedEdge::new(EdgeId(1), Orient::Rev),
            OrientedEdge::new(EdgeId(4), Orient::Fwd),
            OrientedEdge::new(EdgeId(5), Orient::Fwd),
        ],
    });
    m
}

#[test]
fn displacement_stops_at_neighbour_side() {
    let mut m = square_with_leaning_neighbour();
    m.check_invariants().unwrap();
    assert!((m.signed_area(PolyId(1)).unwrap() - 25.0).abs() < 1e-12);
    // Cut from (10,5) toward (0,9); the line through (15,20) and (10,10)
    // crosses it at t = 5/24, below the cap.
    m.split_polygon(PolyId(0), 1, 3, 0.5, 0.1, true).unwrap();
    let from = vector![10.0, 5.0];
    let to = vector![0.0, 9.0];
    assert!((m.vertices()[5] - (from + (to - from) * (5.0 / 24.0))).norm() < 1e-12);
    assert!((m.vertices()[6] - to).norm() < 1e-12);
    assert_eq!(m.polygon(PolyId(1)).unwrap().len(), 4);
    assert!((m.total_area() - 125.0).abs() < 1e-9);
    m.check_invariants().unwrap();
}

#[test]
fn check_invariants_reports_broken_adjacency() {
    let mut m = Mesh::new(2.0, 2.0);
    m.edges[0].polys[0] = None;
    assert!(matches!(m.check_invariants(), Err(MeshError::Invariant { .. })));
    let mut m = Mesh::new(2.0, 2.0);
    m.polys[0].sides.swap(0, 1);
    assert!(matches!(m.check_invariants(), Err(MeshError::Invariant { .. })));
}

#[test]
fn neighbour_missing_the_edge_is_rejected_before_mutation() {
    let mut m = Mesh::new(10.0, 10.0);
    m.split_polygon_mid(PolyId(0), 0, 2).unwrap();
    // Corrupt: drop the cut from the right half's loop.
    m.polys[1].sides.pop();
    let snapshot = m.clone();
    assert_eq!(
        m.split_polygon_mid(PolyId(0), 1, 3),
        Err(MeshError::MissingNeighbourSide {
            edge: EdgeId(6),
            poly: PolyId(1)
        })
    );
    assert_eq!(m.edges(), snapshot.edges());
    assert_eq!(m.polygons(), snapshot.polygons());
}

/// Two faces glued along all four edges; the outer face lists the edges in
/// reverse, starting from edge 0.
fn pillow() -> Mesh {
    let mut m = Mesh::new(4.0, 4.0);
    for e in &mut m.edges {
        e.polys[1] = Some(PolyId(1));
    }
    m.polys.push(Polygon {
        sides: [0, 3, 2, 1]
            .into_iter()
            .map(|k| OrientedEdge::new(EdgeId(k), Orient::Rev))
            .collect(),
    });
    m
}

#[test]
fn same_neighbour_across_both_split_sides() {
    let mut m = pillow();
    m.check_invariants().unwrap();
    let q = m.split_polygon_mid(PolyId(0), 0, 2).unwrap();
    assert_eq!(m.polygon(PolyId(1)).unwrap().len(), 6);
    assert!((m.signed_area(PolyId(0)).unwrap() - 8.0).abs() < 1e-12);
    assert!((m.signed_area(q).unwrap() - 8.0).abs() < 1e-12);
    assert!((m.signed_area(PolyId(1)).unwrap() + 16.0).abs() < 1e-12);
    m.check_invariants().unwrap();
}

fn random_split(m: &mut Mesh, rng: &mut StdRng, displace: bool) -> Result<PolyId, MeshError> {
    let p = PolyId(rng.gen_range(0..m.polygons().len()));
    let n = m.polygon(p).map_or(0, Polygon::len);
    let a = rng.gen_range(0..n);
    let b = (a + rng.gen_range(1..n)) % n;
    let ta = rng.gen_range(0.05..0.95);
    let tb = rng.gen_range(0.05..0.95);
    m.split_polygon(p, a, b, ta, tb, displace)
}

proptest! {
    #[test]
    fn random_splits_keep_invariants(seed in any::<u64>(), steps in 1usize..40, displace in any::<bool>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut m = Mesh::new(10.0, 6.0);
        for _ in 0..steps {
            let old = m.clone();
            let (v, e, p) = counts(&m);
            random_split(&mut m, &mut rng, displace).unwrap();
            prop_assert_eq!(counts(&m), (v + 2, e + 3, p + 1));
            // Old vertices never move and nothing is reindexed.
            prop_assert_eq!(&m.vertices()[..v], old.vertices());
            prop_assert!(m.check_invariants().is_ok());
            prop_assert!((m.total_area() - 60.0).abs() < 1e-9);
        }
    }

    #[test]
    fn undisplaced_split_conserves_area(seed in any::<u64>(), steps in 1usize..25) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut m = Mesh::new(7.0, 3.0);
        for _ in 0..steps {
            let p = PolyId(rng.gen_range(0..m.polygons().len()));
            let before = m.signed_area(p).unwrap();
            let n = m.polygon(p).unwrap().len();
            let a = rng.gen_range(0..n);
            let b = (a + rng.gen_range(1..n)) % n;
            let q = m.split_polygon(p, a, b, rng.gen_range(0.1..0.9), rng.gen_range(0.1..0.9), false).unwrap();
            let after = m.signed_area(p).unwrap() + m.signed_area(q).unwrap();
            prop_assert!((before - after).abs() < 1e-9);
        }
    }
}
