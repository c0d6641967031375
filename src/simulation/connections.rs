//! Line connections between holes
//!
//! Pairs holes into disjoint segments. Every hole takes part in at most one
//! pair; holes are visited in index order and matched against the holes that
//! are still free.

use std::cmp::Ordering;

use rand::Rng;

use super::states::NVec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairStrategy {
    Random,   // with probability p, any free partner
    Closest,  // nearest free partner
    Farthest, // most distant free partner
}

/// Build the list of `(a, b)` index pairs for `points`.
/// `probability` only matters for [`PairStrategy::Random`].
pub fn connect<R: Rng + ?Sized>(points: &[NVec3], strategy: PairStrategy, probability: f64, rng: &mut R) -> Vec<(usize, usize)> {
    let n = points.len();
    let mut used = vec![false; n];
    let mut pairs = Vec::new();

    for i in 0..n {
        if used[i] {
            continue;
        }

        let free = (0..n).filter(|&j| j != i && !used[j]);
        let partner = match strategy {
            PairStrategy::Random => {
                let free: Vec<usize> = free.collect();
                if free.is_empty() {
                    break;
                }
                if rng.gen::<f64>() < probability {
                    Some(free[rng.gen_range(0..free.len())])
                } else {
                    None
                }
            }
            PairStrategy::Closest => free.min_by(|&a, &b| by_distance(points, i, a, b)),
            PairStrategy::Farthest => free.max_by(|&a, &b| by_distance(points, i, a, b)),
        };

        if let Some(j) = partner {
            used[i] = true;
            used[j] = true;
            pairs.push((i, j));
        }
    }
    pairs
}

fn by_distance(points: &[NVec3], from: usize, a: usize, b: usize) -> Ordering {
    let da = (points[a] - points[from]).norm_squared();
    let db = (points[b] - points[from]).norm_squared();
    da.partial_cmp(&db).unwrap_or(Ordering::Equal)
}
