//! Flat surface for the presentation layer (renderers, exporters).
//!
//! Everything here is plain data copied out of a `Mesh`, so callers never
//! hold borrows into the arenas while the mesh keeps growing.

use crate::geom::Vec2;
use crate::mesh::{Mesh, PolyId};

/// One polygon as a closed point loop plus the numbers exporters usually want.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonView {
    pub id: PolyId,
    /// Vertex indices in loop order (leading vertex of each side).
    pub vertex_ids: Vec<usize>,
    pub points: Vec<Vec2>,
    pub area: f64,
    pub centroid: Option<Vec2>,
    /// Sides with no neighbour across them.
    pub boundary_sides: usize,
}

/// Snapshot every polygon of `mesh`.
pub fn polygon_views(mesh: &Mesh) -> Vec<PolygonView> {
    mesh.poly_ids()
        .filter_map(|id| {
            let poly = mesh.polygon(id)?;
            let points = mesh.outline(id)?;
            Some(PolygonView {
                id,
                vertex_ids: poly.sides.iter().map(|s| mesh.leading(*s).0).collect(),
                area: crate::geom::signed_area(&points),
                centroid: crate::geom::area_centroid(&points),
                boundary_sides: poly.sides.iter().filter(|s| mesh.across(**s).is_none()).count(),
                points,
            })
        })
        .collect()
}

/// Unit-square coordinates of `p` relative to the mesh viewport.
pub fn to_viewport_unit(mesh: &Mesh, p: Vec2) -> Vec2 {
    let vp = mesh.viewport();
    let size = vp.size();
    let d = p - vp.min;
    Vec2::new(d.x / size.x, d.y / size.y)
}
