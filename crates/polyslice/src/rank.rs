//! Bounded top-N ranking with pluggable selection policies.
//!
//! Purpose
//! - Keep the best `N` (object, score) pairs seen so far, sorted by score
//!   descending, and pick one or several of them afterwards.
//! - Policies are plain enums (`Choose`, `ChooseMany`); randomness comes from
//!   the caller's `Rng`, never from a global source.
//!
//! Conventions
//! - Ties rank after entries already holding the same score. A score tied with
//!   the worst entry of a full ranker is therefore discarded.
//! - Weighted policies require non-negative scores.

use rand::Rng;
use std::fmt;

/// Selection failures. All of them are caller errors.
#[derive(Clone, Debug, PartialEq)]
pub enum RankError {
    Empty,
    TooMany { k: usize, len: usize },
    NegativeScore { index: usize, score: f64 },
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "cannot select from an empty ranker"),
            Self::TooMany { k, len } => {
                write!(f, "cannot choose {k} distinct entries out of {len}")
            }
            Self::NegativeScore { index, score } => {
                write!(f, "weighted selection needs scores >= 0 (entry {index} has {score})")
            }
        }
    }
}

impl std::error::Error for RankError {}

/// Single-choice policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choose {
    /// Always the top entry.
    Best,
    /// Uniform over retained entries.
    Uniform,
    /// Proportional to score.
    Weighted,
}

/// Multi-choice policy: `k` distinct positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChooseMany {
    /// Positions `0..k`.
    BestK,
    /// One-pass selection sampling; every `k`-subset is equally likely.
    SinglePassK,
    /// Repeated weighted draws, duplicates rejected.
    WeightedK,
}

impl Choose {
    /// Pick a position in `scores` (best first).
    pub fn pick<R: Rng + ?Sized>(self, scores: &[f64], rng: &mut R) -> Result<usize, RankError> {
        if scores.is_empty() {
            return Err(RankError::Empty);
        }
        match self {
            Choose::Best => Ok(0),
            Choose::Uniform => Ok(rng.gen_range(0..scores.len())),
            Choose::Weighted => {
                check_weights(scores)?;
                Ok(weighted_index(scores, rng))
            }
        }
    }
}

impl ChooseMany {
    /// Pick `k` distinct positions in `scores`, in ascending order for `BestK`
    /// and `SinglePassK`, in draw order for `WeightedK`.
    pub fn pick<R: Rng + ?Sized>(
        self,
        scores: &[f64],
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>, RankError> {
        let len = scores.len();
        if k > len {
            return Err(RankError::TooMany { k, len });
        }
        match self {
            ChooseMany::BestK => Ok((0..k).collect()),
            ChooseMany::SinglePassK => {
                let mut out = Vec::with_capacity(k);
                for i in 0..len {
                    let remaining = (len - i) as f64;
                    let needed = (k - out.len()) as f64;
                    if rng.gen::<f64>() < needed / remaining {
                        out.push(i);
                    }
                }
                Ok(out)
            }
            ChooseMany::WeightedK => {
                check_weights(scores)?;
                // Drawn positions get weight zero.
                let mut w = scores.to_vec();
                let mut taken = vec![false; len];
                let mut out = Vec::with_capacity(k);
                while out.len() < k {
                    let total: f64 = w.iter().sum();
                    let i = if total > 0.0 {
                        weighted_index(&w, rng)
                    } else {
                        // Only zero weights left: fall back to the best untaken.
                        match taken.iter().position(|t| !t) {
                            Some(i) => i,
                            None => break,
                        }
                    };
                    if taken[i] {
                        continue;
                    }
                    taken[i] = true;
                    w[i] = 0.0;
                    out.push(i);
                }
                Ok(out)
            }
        }
    }
}

fn check_weights(scores: &[f64]) -> Result<(), RankError> {
    match scores.iter().position(|s| *s < 0.0) {
        Some(index) => Err(RankError::NegativeScore {
            index,
            score: scores[index],
        }),
        None => Ok(()),
    }
}

/// First position whose cumulative score reaches a threshold drawn in `[0, sum)`.
fn weighted_index<R: Rng + ?Sized>(scores: &[f64], rng: &mut R) -> usize {
    let total: f64 = scores.iter().sum();
    let threshold = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    for (i, s) in scores.iter().enumerate() {
        acc += s;
        if acc >= threshold {
            return i;
        }
    }
    // Rounding can leave `acc` a hair below `threshold`.
    scores.len() - 1
}

/// Top-`N` container, sorted by score descending.
#[derive(Clone, Debug)]
pub struct Ranker<T> {
    cap: usize,
    items: Vec<T>,
    scores: Vec<f64>,
}

impl<T> Ranker<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            items: Vec::with_capacity(cap),
            scores: Vec::with_capacity(cap),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Scores, best first.
    #[inline]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Offer `item` with `score`. Returns whether it was retained.
    /// NaN scores are never retained.
    pub fn insert(&mut self, item: T, score: f64) -> bool {
        if score.is_nan() {
            return false;
        }
        // Slot right after the last entry scoring at least as high.
        let pos = self.scores.iter().take_while(|s| **s >= score).count();
        if pos >= self.cap {
            return false;
        }
        self.items.insert(pos, item);
        self.scores.insert(pos, score);
        self.items.truncate(self.cap);
        self.scores.truncate(self.cap);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.items.iter().zip(self.scores.iter().copied())
    }

    /// Entry at `pos` (0 = best).
    pub fn get(&self, pos: usize) -> Option<(&T, f64)> {
        Some((self.items.get(pos)?, self.scores[pos]))
    }

    pub fn select<R: Rng + ?Sized>(&self, policy: Choose, rng: &mut R) -> Result<&T, RankError> {
        let i = policy.pick(&self.scores, rng)?;
        Ok(&self.items[i])
    }

    pub fn select_many<R: Rng + ?Sized>(
        &self,
        policy: ChooseMany,
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<&T>, RankError> {
        let picks = policy.pick(&self.scores, k, rng)?;
        Ok(picks.into_iter().map(|i| &self.items[i]).collect())
    }

    /// Consume and return the best item.
    pub fn into_best(self) -> Result<T, RankError> {
        self.items.into_iter().next().ok_or(RankError::Empty)
    }
}

impl<T> IntoIterator for Ranker<T> {
    type Item = (T, f64);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<T>, std::vec::IntoIter<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter().zip(self.scores)
    }
}
