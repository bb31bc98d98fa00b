//! Slicer tuning knobs and the slicer error type.

use std::fmt;

use crate::mesh::{MeshError, PolyId};
use crate::rank::RankError;

/// Slicer configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceCfg {
    /// Fuzz factor on polygon area scores. `1.0` always picks the largest polygon.
    pub area_fuzz: f64,
    /// Fuzz factor on squared side-length scores.
    pub length_fuzz: f64,
    /// Width of the window around `0.5` the cut points are drawn from, in `[0, 1)`.
    pub midpoint_jitter: f64,
}

impl Default for SliceCfg {
    fn default() -> Self {
        Self {
            area_fuzz: 2.0,
            length_fuzz: 2.0,
            midpoint_jitter: 0.5,
        }
    }
}

impl SliceCfg {
    pub fn validate(&self) -> Result<(), SliceError> {
        for (name, f) in [("area_fuzz", self.area_fuzz), ("length_fuzz", self.length_fuzz)] {
            if !f.is_finite() || f <= 0.0 {
                return Err(SliceError::invalid(format!("{name} must be finite and > 0, got {f}")));
            }
        }
        if !(0.0..1.0).contains(&self.midpoint_jitter) {
            return Err(SliceError::invalid(format!(
                "midpoint_jitter must lie in [0, 1), got {}",
                self.midpoint_jitter
            )));
        }
        Ok(())
    }

    /// Closed interval the split parameters are drawn from.
    #[inline]
    pub fn param_range(&self) -> (f64, f64) {
        (
            0.5 * (1.0 - self.midpoint_jitter),
            0.5 * (1.0 + self.midpoint_jitter),
        )
    }
}

/// Error type shared by all slicer entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum SliceError {
    InvalidCfg { reason: String },
    TooFewSides { poly: PolyId, len: usize },
    Mesh(MeshError),
    Rank(RankError),
}

impl SliceError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidCfg {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCfg { reason } => write!(f, "invalid slicer config: {reason}"),
            Self::TooFewSides { poly, len } => {
                write!(f, "polygon {} has {len} sides, need at least 2", poly.0)
            }
            Self::Mesh(e) => write!(f, "mesh: {e}"),
            Self::Rank(e) => write!(f, "selection: {e}"),
        }
    }
}

impl std::error::Error for SliceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mesh(e) => Some(e),
            Self::Rank(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MeshError> for SliceError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<RankError> for SliceError {
    fn from(e: RankError) -> Self {
        Self::Rank(e)
    }
}
