//! Randomized repeated slicing of a mesh.
//!
//! Purpose
//! - Decide, on every call, which polygon to cut, along which two sides and
//!   where along them, then hand the cut to `Mesh::split_polygon`.
//!
//! Model
//! - Scores are perturbed by `fuzz`, a log-uniform factor in `[1/f, f]`, then
//!   ranked in small top-N `Ranker`s and picked deterministically.
//! - Polygons score by signed area, sides by squared length. The second side
//!   must make a real angle with the first: the direction between the two side
//!   midpoints has `|cos| < 0.5` against both side directions. If no side
//!   qualifies, the one with the smallest worse `|cos|` is taken.
//! - All randomness comes from the slicer's own `R: Rng`.

mod cfg;

pub use cfg::{SliceCfg, SliceError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::mesh::{Mesh, MeshError, PolyId};
use crate::rank::{Choose, Ranker};

/// How many candidates each ranking keeps.
const TOP_N: usize = 3;
/// Upper bound (exclusive) on `|cos|` for an acceptable second side.
const MAX_ABS_COS: f64 = 0.5;

/// Multiplicative log-symmetric noise: `exp(ln(factor) * u)`, `u ~ U[-1, 1]`.
#[inline]
pub fn fuzz<R: Rng + ?Sized>(factor: f64, rng: &mut R) -> f64 {
    let u: f64 = rng.gen_range(-1.0..=1.0);
    (factor.ln() * u).exp()
}

/// Outcome of one `Slicer::slice` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceReport {
    /// Polygon that was cut (keeps its id).
    pub poly: PolyId,
    /// Polygon created by the cut.
    pub new_poly: PolyId,
    /// Loop positions of the two cut sides in `poly`, as selected.
    pub sides: [usize; 2],
    /// Split parameters used for `sides`.
    pub params: [f64; 2],
}

/// Owns a mesh and repeatedly slices it.
#[derive(Clone, Debug)]
pub struct Slicer<R> {
    mesh: Mesh,
    cfg: SliceCfg,
    rng: R,
}

impl Slicer<StdRng> {
    /// Fresh `width × height` rectangle with a seeded `StdRng`.
    pub fn seeded(width: f64, height: f64, cfg: SliceCfg, seed: u64) -> Result<Self, SliceError> {
        Self::new(Mesh::new(width, height), cfg, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Slicer<R> {
    pub fn new(mesh: Mesh, cfg: SliceCfg, rng: R) -> Result<Self, SliceError> {
        cfg.validate()?;
        Ok(Self { mesh, cfg, rng })
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[inline]
    pub fn cfg(&self) -> &SliceCfg {
        &self.cfg
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    /// Largest polygon by fuzzed signed area.
    pub fn select_polygon(&mut self) -> Result<PolyId, SliceError> {
        let mut ranked = Ranker::new(TOP_N);
        for p in self.mesh.poly_ids() {
            let area = self.mesh.signed_area(p).unwrap_or(0.0);
            ranked.insert(p, fuzz(self.cfg.area_fuzz, &mut self.rng) * area);
        }
        let p = *ranked.select(Choose::Best, &mut self.rng)?;
        trace!(poly = p.0, candidates = ranked.len(), "selected polygon");
        Ok(p)
    }

    /// Two loop positions of `poly` to cut along: the longest side by fuzzed
    /// squared length, then the longest side at a usable angle to it.
    pub fn select_edges(&mut self, poly: PolyId) -> Result<(usize, usize), SliceError> {
        let sides = match self.mesh.polygon(poly) {
            Some(p) => p.sides.clone(),
            None => {
                return Err(MeshError::UnknownPolygon {
                    poly,
                    count: self.mesh.polygons().len(),
                }
                .into())
            }
        };
        let n = sides.len();
        if n < 2 {
            return Err(SliceError::TooFewSides { poly, len: n });
        }

        let scores: Vec<f64> = sides
            .iter()
            .map(|s| fuzz(self.cfg.length_fuzz, &mut self.rng) * self.mesh.side_len_sq(*s))
            .collect();
        let mut ranked = Ranker::new(TOP_N);
        for (i, score) in scores.iter().enumerate() {
            ranked.insert(i, *score);
        }
        let first = *ranked.select(Choose::Best, &mut self.rng)?;

        let mid_first = self.mesh.side_midpoint(sides[first]);
        let dir_first = self.mesh.side_vector(sides[first]).normalize();
        let mut angled = Ranker::new(TOP_N);
        let mut fallback = Ranker::new(1);
        for (j, side) in sides.iter().enumerate() {
            if j == first {
                continue;
            }
            let d = (self.mesh.side_midpoint(*side) - mid_first).normalize();
            let cos_first = d.dot(&dir_first).abs();
            let cos_other = d.dot(&self.mesh.side_vector(*side).normalize()).abs();
            if cos_first < MAX_ABS_COS && cos_other < MAX_ABS_COS {
                angled.insert(j, scores[j]);
            }
            fallback.insert(j, -cos_first.max(cos_other));
        }
        let second = if angled.is_empty() {
            trace!(poly = poly.0, first, "no side at a usable angle, using fallback");
            *fallback.select(Choose::Best, &mut self.rng)?
        } else {
            *angled.select(Choose::Best, &mut self.rng)?
        };
        Ok((first, second))
    }

    /// One cut: pick a polygon, two sides and two jittered split points, then split.
    pub fn slice(&mut self, displace: bool) -> Result<SliceReport, SliceError> {
        let poly = self.select_polygon()?;
        let (a, b) = self.select_edges(poly)?;
        let (lo, hi) = self.cfg.param_range();
        let ta = self.rng.gen_range(lo..=hi);
        let tb = self.rng.gen_range(lo..=hi);
        let new_poly = self.mesh.split_polygon(poly, a, b, ta, tb, displace)?;
        debug!(
            poly = poly.0,
            new_poly = new_poly.0,
            a,
            b,
            ta,
            tb,
            displace,
            "slice"
        );
        Ok(SliceReport {
            poly,
            new_poly,
            sides: [a, b],
            params: [ta, tb],
        })
    }

    /// `count` consecutive slices.
    pub fn slice_many(&mut self, count: usize, displace: bool) -> Result<Vec<SliceReport>, SliceError> {
        let reports = (0..count)
            .map(|_| self.slice(displace))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            count,
            polygons = self.mesh.polygons().len(),
            area = self.mesh.total_area(),
            "slice batch done"
        );
        Ok(reports)
    }
}
