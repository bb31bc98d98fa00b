//! Append-only planar polygon mesh with shared edges.
//!
//! Purpose
//! - Store vertices, edges and polygons in arenas addressed by stable handles
//!   (`VertexId`, `EdgeId`, `PolyId`) and keep every polygon's loop closed and
//!   every edge's two adjacency slots consistent across splits.
//!
//! Model
//! - An `Edge` has two endpoints and two optional neighbours, one per walking
//!   direction. A `Polygon` is a cyclic list of `OrientedEdge`s.
//! - `Mesh::new` builds one rectangle; `Mesh::split_polygon` is the only
//!   mutation and only appends or splices locally.
//!
//! Layout
//! - `types.rs` (handles, edges, polygons, errors), `store.rs` (arenas,
//!   queries, invariant check), `split.rs` (the split).

mod split;
mod store;
mod types;

pub use store::Mesh;
pub use types::{Edge, EdgeId, MeshError, Orient, OrientedEdge, PolyId, Polygon, VertexId, Viewport};

#[cfg(test)]
mod tests;
