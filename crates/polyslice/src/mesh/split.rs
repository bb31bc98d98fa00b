//! Polygon splitting: the only mutating mesh operation.
//!
//! A split cuts polygon `P` along two of its sides `e0, e1` (positions
//! `i0 < i1`) at parametric points `m0, m1`:
//!
//! ```text
//!   before:  P = [.., e0, s(i0+1), .., s(i1-1), e1, ..]
//!   after:   P = [.., e0', cross(Fwd), e1'', ..]
//!            Q = [e0'', s(i0+1), .., s(i1-1), e1', cross(Rev)]
//! ```
//!
//! `x'` is the retained edge object (leading vertex → midpoint), `x''` the
//! appended half (midpoint → trailing vertex). A neighbour across `e_k` gets
//! `e_k''` inserted right before `e_k'` in its own loop. All checks run before
//! the first write, so an error leaves the mesh untouched.

use crate::geom::{self, Vec2};

use super::store::Mesh;
use super::types::{Edge, EdgeId, MeshError, Orient, OrientedEdge, PolyId, Polygon, VertexId};

/// Cap on how far a midpoint may slide toward the other one.
const MAX_DISPLACEMENT: f64 = 0.25;

/// Everything `apply` needs, computed without touching the mesh.
#[derive(Clone, Debug)]
struct SplitPlan {
    poly: PolyId,
    /// Loop positions, `i0 < i1`.
    pos: [usize; 2],
    sides: [OrientedEdge; 2],
    mids: [Vec2; 2],
    /// Far-side neighbour and the position of the split edge in its loop.
    far: [Option<(PolyId, usize)>; 2],
}

impl Mesh {
    /// Split `poly` along its sides at loop positions `a` and `b`.
    ///
    /// `ta`, `tb` place the cut points along each side (from its leading vertex)
    /// and must lie in `(0, 1)`. With `displace`, cut points on interior edges
    /// slide toward each other so the cut stays clear of the neighbour's
    /// adjacent edges.
    ///
    /// Returns the id of the new polygon. Appends 2 vertices, 3 edges and 1 polygon.
    pub fn split_polygon(
        &mut self,
        poly: PolyId,
        a: usize,
        b: usize,
        ta: f64,
        tb: f64,
        displace: bool,
    ) -> Result<PolyId, MeshError> {
        let plan = self.plan_split(poly, a, b, ta, tb, displace)?;
        Ok(self.apply_split(plan))
    }

    /// `split_polygon` at both midpoints without displacement.
    pub fn split_polygon_mid(&mut self, poly: PolyId, a: usize, b: usize) -> Result<PolyId, MeshError> {
        self.split_polygon(poly, a, b, 0.5, 0.5, false)
    }

    fn plan_split(
        &self,
        poly: PolyId,
        a: usize,
        b: usize,
        ta: f64,
        tb: f64,
        displace: bool,
    ) -> Result<SplitPlan, MeshError> {
        let p = self.try_polygon(poly)?;
        let len = p.len();
        for index in [a, b] {
            if index >= len {
                return Err(MeshError::SideOutOfRange { poly, index, len });
            }
        }
        if a == b {
            return Err(MeshError::SameSide { poly, index: a });
        }
        for t in [ta, tb] {
            if !(t > 0.0 && t < 1.0) {
                return Err(MeshError::ParamOutOfRange { t });
            }
        }
        let ((i0, t0), (i1, t1)) = if a < b { ((a, ta), (b, tb)) } else { ((b, tb), (a, ta)) };
        let sides = [p.sides[i0], p.sides[i1]];
        let mut mids = [0usize, 1].map(|k| {
            let (lead, trail) = self.side_points(sides[k]);
            geom::lerp(lead, trail, [t0, t1][k])
        });

        let mut far = [None, None];
        for k in 0..2 {
            if let Some(q) = self.across(sides[k]) {
                let j = self
                    .try_polygon(q)?
                    .sides
                    .iter()
                    .position(|s| s.edge == sides[k].edge && s.orient == sides[k].orient.flip())
                    .ok_or(MeshError::MissingNeighbourSide {
                        edge: sides[k].edge,
                        poly: q,
                    })?;
                far[k] = Some((q, j));
            }
        }

        if displace {
            let frac = [0usize, 1].map(|k| self.displacement(far[k], mids[k], mids[1 - k]));
            let orig = mids;
            for k in 0..2 {
                mids[k] = geom::lerp(orig[k], orig[1 - k], frac[k]);
            }
        }

        Ok(SplitPlan {
            poly,
            pos: [i0, i1],
            sides,
            mids,
            far,
        })
    }

    /// Fraction of the way from `from` toward `to` that a cut point may slide.
    ///
    /// Zero on the boundary. Otherwise the smallest forward crossing of the cut
    /// line with the neighbour's two sides adjacent to the split edge, capped
    /// at `MAX_DISPLACEMENT`; parallel or backward crossings do not constrain.
    fn displacement(&self, far: Option<(PolyId, usize)>, from: Vec2, to: Vec2) -> f64 {
        let Some((q, j)) = far else {
            return 0.0;
        };
        let loop_ = &self.polys[q.0].sides;
        let n = loop_.len();
        [loop_[(j + n - 1) % n], loop_[(j + 1) % n]]
            .into_iter()
            .map(|s| {
                let (p2, p3) = self.side_points(s);
                match geom::line_cross_param(from, to, p2, p3) {
                    Some(t) if t >= 0.0 => t,
                    _ => 1.0,
                }
            })
            .fold(1.0, f64::min)
            .min(MAX_DISPLACEMENT)
    }

    fn apply_split(&mut self, plan: SplitPlan) -> PolyId {
        let SplitPlan {
            poly,
            pos: [i0, i1],
            sides,
            mids,
            mut far,
        } = plan;
        let new_poly = PolyId(self.polys.len());
        let m = mids.map(|p| {
            self.verts.push(p);
            VertexId(self.verts.len() - 1)
        });

        // Same neighbour across both sides: the first insertion shifts the second.
        if let [Some((q0, j0)), Some((q1, j1))] = &mut far {
            if q0 == q1 && *j1 > *j0 {
                *j1 += 1;
            }
        }

        let mut halves = [EdgeId(0); 2];
        for k in 0..2 {
            let OrientedEdge { edge, orient } = sides[k];
            let o = orient.index();
            let mut half = self.edges[edge.0];
            self.edges[edge.0].ends[1 - o] = m[k];
            half.ends[o] = m[k];
            halves[k] = EdgeId(self.edges.len());
            self.edges.push(half);
            if let Some((q, j)) = far[k] {
                self.polys[q.0]
                    .sides
                    .insert(j, OrientedEdge::new(halves[k], orient.flip()));
            }
        }

        let cross = EdgeId(self.edges.len());
        self.edges.push(Edge {
            ends: [m[0], m[1]],
            polys: [Some(poly), Some(new_poly)],
        });

        let mut moved = Vec::with_capacity(i1 - i0 + 2);
        moved.push(OrientedEdge::new(halves[0], sides[0].orient));
        moved.extend(self.polys[poly.0].sides.splice(
            i0 + 1..=i1,
            [
                OrientedEdge::new(cross, Orient::Fwd),
                OrientedEdge::new(halves[1], sides[1].orient),
            ],
        ));
        moved.push(OrientedEdge::new(cross, Orient::Rev));
        for s in &moved {
            self.edges[s.edge.0].polys[s.orient.index()] = Some(new_poly);
        }
        self.polys.push(Polygon { sides: moved });
        new_poly
    }
}
