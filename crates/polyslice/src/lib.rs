//! Planar polygon mesh that is refined by repeated randomized slicing.
//!
//! Layers, leaf first:
//! - `geom`: 2D helpers on `nalgebra::Vector2<f64>`.
//! - `rank`: bounded top-N ranking with single/multi choice policies.
//! - `mesh`: append-only vertex/edge/polygon arenas and `split_polygon`.
//! - `slicer`: picks polygon, sides and cut points, then splits.
//!
//! Rendering, colouring and UI live outside this crate; they only need
//! `Mesh::vertices`, `Mesh::polygons`/`Mesh::outline` and `Slicer::slice`.

pub mod api;
pub mod geom;
pub mod mesh;
pub mod rank;
pub mod slicer;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::Vec2;
pub use mesh::{Mesh, MeshError, PolyId};
pub use slicer::{SliceCfg, SliceError, Slicer};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::mesh::{Edge, EdgeId, Mesh, Orient, OrientedEdge, PolyId, Polygon, VertexId};
    pub use crate::rank::{Choose, ChooseMany, Ranker};
    pub use crate::slicer::{fuzz, SliceCfg, SliceReport, Slicer};
    pub use crate::Vec2;
}
