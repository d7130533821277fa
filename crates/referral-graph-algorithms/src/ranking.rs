//! Score ranking helpers shared by the influence metrics

use super::common::NodeIndex;

/// Indices with a positive score, highest first, at most `k` of them.
///
/// The sort is stable, so equal scores keep index order (first-seen order
/// when indices follow insertion).
pub fn top_k<S>(scores: &[S], k: usize) -> Vec<(NodeIndex, S)>
where
    S: Copy + Ord + Default,
{
    let zero = S::default();
    let mut ranked: Vec<(NodeIndex, S)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, score)| score > zero)
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(k);
    ranked
}
