//! The mesh arenas: construction, read access and invariant checks.

use crate::geom::{self, Vec2};

use super::types::{Edge, EdgeId, MeshError, Orient, OrientedEdge, PolyId, Polygon, VertexId, Viewport};

/// Append-only planar mesh.
///
/// Owns every vertex, edge and polygon; polygons and adjacency slots only hold
/// handles. Nothing is removed or reindexed once created.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub(super) verts: Vec<Vec2>,
    pub(super) edges: Vec<Edge>,
    pub(super) polys: Vec<Polygon>,
    viewport: Viewport,
}

impl Mesh {
    /// Single counterclockwise rectangle `(0,0)–(width,height)`.
    ///
    /// Edge `k` runs from vertex `k` to vertex `k+1`; side 0 faces the
    /// rectangle, side 1 is boundary.
    pub fn new(width: f64, height: f64) -> Self {
        let verts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ];
        let edges = (0..4)
            .map(|k| Edge {
                ends: [VertexId(k), VertexId((k + 1) % 4)],
                polys: [Some(PolyId(0)), None],
            })
            .collect();
        let sides = (0..4)
            .map(|k| OrientedEdge::new(EdgeId(k), Orient::Fwd))
            .collect();
        Self {
            verts,
            edges,
            polys: vec![Polygon { sides }],
            viewport: Viewport {
                min: Vec2::zeros(),
                max: Vec2::new(width, height),
            },
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.verts
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polys
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn vertex(&self, v: VertexId) -> Option<Vec2> {
        self.verts.get(v.0).copied()
    }

    #[inline]
    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e.0)
    }

    #[inline]
    pub fn polygon(&self, p: PolyId) -> Option<&Polygon> {
        self.polys.get(p.0)
    }

    pub fn poly_ids(&self) -> impl Iterator<Item = PolyId> {
        (0..self.polys.len()).map(PolyId)
    }

    pub(super) fn try_polygon(&self, p: PolyId) -> Result<&Polygon, MeshError> {
        self.polys.get(p.0).ok_or(MeshError::UnknownPolygon {
            poly: p,
            count: self.polys.len(),
        })
    }

    // The side-level queries below index directly: `side` must come from a
    // polygon of this mesh.

    #[inline]
    pub fn leading(&self, side: OrientedEdge) -> VertexId {
        side.leading(&self.edges[side.edge.0])
    }

    #[inline]
    pub fn trailing(&self, side: OrientedEdge) -> VertexId {
        side.trailing(&self.edges[side.edge.0])
    }

    /// Leading and trailing positions of `side`.
    #[inline]
    pub fn side_points(&self, side: OrientedEdge) -> (Vec2, Vec2) {
        (
            self.verts[self.leading(side).0],
            self.verts[self.trailing(side).0],
        )
    }

    /// Walking direction (not normalized).
    #[inline]
    pub fn side_vector(&self, side: OrientedEdge) -> Vec2 {
        let (a, b) = self.side_points(side);
        b - a
    }

    #[inline]
    pub fn side_len_sq(&self, side: OrientedEdge) -> f64 {
        self.side_vector(side).norm_squared()
    }

    #[inline]
    pub fn side_midpoint(&self, side: OrientedEdge) -> Vec2 {
        let (a, b) = self.side_points(side);
        geom::lerp(a, b, 0.5)
    }

    /// Polygon on the other side of `side`, if any.
    #[inline]
    pub fn across(&self, side: OrientedEdge) -> Option<PolyId> {
        self.edges[side.edge.0].polys[side.orient.flip().index()]
    }

    /// Closed loop of points (leading vertex of each side, in order).
    pub fn outline(&self, p: PolyId) -> Option<Vec<Vec2>> {
        let poly = self.polys.get(p.0)?;
        Some(
            poly.sides
                .iter()
                .map(|s| self.verts[self.leading(*s).0])
                .collect(),
        )
    }

    /// Shoelace signed area; positive for counterclockwise loops.
    pub fn signed_area(&self, p: PolyId) -> Option<f64> {
        self.outline(p).map(|pts| geom::signed_area(&pts))
    }

    pub fn centroid(&self, p: PolyId) -> Option<Vec2> {
        self.outline(p).and_then(|pts| geom::area_centroid(&pts))
    }

    /// Sum of all polygon signed areas.
    pub fn total_area(&self) -> f64 {
        self.poly_ids().filter_map(|p| self.signed_area(p)).sum()
    }

    /// Polygons sharing at least one edge with `p`, in loop order without repeats.
    pub fn neighbours(&self, p: PolyId) -> Vec<PolyId> {
        let mut out = Vec::new();
        if let Some(poly) = self.polys.get(p.0) {
            for s in &poly.sides {
                if let Some(q) = self.across(*s) {
                    if !out.contains(&q) {
                        out.push(q);
                    }
                }
            }
        }
        out
    }

    /// Edges with no polygon on at least one side.
    pub fn boundary_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_boundary())
            .map(|(i, _)| EdgeId(i))
    }

    /// Full closure + adjacency check. Returns the first violation found.
    pub fn check_invariants(&self) -> Result<(), MeshError> {
        let nv = self.verts.len();
        let ne = self.edges.len();
        let np = self.polys.len();
        for (i, e) in self.edges.iter().enumerate() {
            if e.ends.iter().any(|v| v.0 >= nv) {
                return Err(MeshError::invariant(format!("edge {i} has a dangling endpoint")));
            }
            if let [Some(a), Some(b)] = e.polys {
                if a == b {
                    return Err(MeshError::invariant(format!(
                        "edge {i} has polygon {} on both sides",
                        a.0
                    )));
                }
            }
            if e.polys.iter().flatten().any(|p| p.0 >= np) {
                return Err(MeshError::invariant(format!("edge {i} names a missing polygon")));
            }
        }
        // How often each (edge, side) appears across all loops.
        let mut listed = vec![[0usize; 2]; ne];
        for (pi, poly) in self.polys.iter().enumerate() {
            let n = poly.sides.len();
            if n < 3 {
                return Err(MeshError::invariant(format!("polygon {pi} has {n} sides")));
            }
            for (i, s) in poly.sides.iter().enumerate() {
                if s.edge.0 >= ne {
                    return Err(MeshError::invariant(format!(
                        "polygon {pi} side {i} names a missing edge"
                    )));
                }
                let next = poly.sides[(i + 1) % n];
                if next.edge.0 >= ne {
                    continue;
                }
                if self.trailing(*s) != self.leading(next) {
                    return Err(MeshError::invariant(format!(
                        "polygon {pi} is not closed after side {i}"
                    )));
                }
                if self.edges[s.edge.0].polys[s.orient.index()] != Some(PolyId(pi)) {
                    return Err(MeshError::invariant(format!(
                        "edge {} does not point back to polygon {pi}",
                        s.edge.0
                    )));
                }
                listed[s.edge.0][s.orient.index()] += 1;
            }
        }
        for (i, e) in self.edges.iter().enumerate() {
            for side in 0..2 {
                let expected = usize::from(e.polys[side].is_some());
                if listed[i][side] != expected {
                    return Err(MeshError::invariant(format!(
                        "edge {i} side {side} is listed {} times, expected {expected}",
                        listed[i][side]
                    )));
                }
            }
        }
        Ok(())
    }
}
