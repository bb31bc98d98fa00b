//! Handles, edges, polygons and the mesh error type.
//!
//! Kept small and explicit so `store` and `split` read as plain index juggling.

use std::fmt;

use crate::geom::Vec2;

/// Identifier types; indices into the mesh arenas, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolyId(pub usize);

/// Which endpoint leads when an edge is walked as part of a polygon loop.
///
/// `Fwd` walks `ends[0] → ends[1]` and owns adjacency side 0; `Rev` walks
/// `ends[1] → ends[0]` and owns side 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orient {
    Fwd,
    Rev,
}

impl Orient {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Orient::Fwd => 0,
            Orient::Rev => 1,
        }
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Orient::Fwd => Orient::Rev,
            Orient::Rev => Orient::Fwd,
        }
    }
}

/// Undirected edge with one adjacency slot per walking direction.
/// `None` on a side means the mesh boundary lies there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub ends: [VertexId; 2],
    pub polys: [Option<PolyId>; 2],
}

impl Edge {
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.polys.iter().any(Option::is_none)
    }
}

/// An edge as it appears inside one polygon loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrientedEdge {
    pub edge: EdgeId,
    pub orient: Orient,
}

impl OrientedEdge {
    #[inline]
    pub fn new(edge: EdgeId, orient: Orient) -> Self {
        Self { edge, orient }
    }

    /// Endpoint the walk starts from.
    #[inline]
    pub fn leading(&self, e: &Edge) -> VertexId {
        e.ends[self.orient.index()]
    }

    /// Endpoint the walk arrives at.
    #[inline]
    pub fn trailing(&self, e: &Edge) -> VertexId {
        e.ends[self.orient.flip().index()]
    }
}

/// Cyclic loop of oriented edges.
///
/// Invariants (maintained by `Mesh`):
/// - Closure: `trailing(sides[i]) == leading(sides[i + 1 mod n])`.
/// - Adjacency: `edges[s.edge].polys[s.orient]` names this polygon for every side `s`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polygon {
    pub sides: Vec<OrientedEdge>,
}

impl Polygon {
    #[inline]
    pub fn len(&self) -> usize {
        self.sides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    /// Position of `edge` in this loop, if present.
    pub fn position_of(&self, edge: EdgeId) -> Option<usize> {
        self.sides.iter().position(|s| s.edge == edge)
    }
}

/// Axis-aligned framing rectangle, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Errors reported by mesh operations. A failed split leaves the mesh unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshError {
    UnknownPolygon { poly: PolyId, count: usize },
    SideOutOfRange { poly: PolyId, index: usize, len: usize },
    SameSide { poly: PolyId, index: usize },
    ParamOutOfRange { t: f64 },
    MissingNeighbourSide { edge: EdgeId, poly: PolyId },
    Invariant { reason: String },
}

impl MeshError {
    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::Invariant {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPolygon { poly, count } => {
                write!(f, "polygon {} not in mesh ({count} polygons)", poly.0)
            }
            Self::SideOutOfRange { poly, index, len } => {
                write!(f, "side {index} out of range for polygon {} with {len} sides", poly.0)
            }
            Self::SameSide { poly, index } => {
                write!(f, "cannot split polygon {} twice along side {index}", poly.0)
            }
            Self::ParamOutOfRange { t } => write!(f, "split parameter {t} not in (0, 1)"),
            Self::MissingNeighbourSide { edge, poly } => write!(
                f,
                "edge {} claims polygon {} as neighbour but is not in its loop",
                edge.0, poly.0
            ),
            Self::Invariant { reason } => write!(f, "mesh invariant violated: {reason}"),
        }
    }
}

impl std::error::Error for MeshError {}
