use crate::domain::model::CategorySummary;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("pool has {available} items but {required} were requested")]
pub struct InsufficientPool {
    pub available: usize,
    pub required: usize,
}

/// 從 pool 中均勻隨機、不放回地抽出 `n` 個元素，順序即抽樣順序
pub fn sample_without_replacement<T, R>(
    pool: Vec<T>,
    n: usize,
    rng: &mut R,
) -> Result<Vec<T>, InsufficientPool>
where
    R: Rng + ?Sized,
{
    if n > pool.len() {
        return Err(InsufficientPool {
            available: pool.len(),
            required: n,
        });
    }

    let picked = rand::seq::index::sample(rng, pool.len(), n);
    let mut slots: Vec<Option<T>> = pool.into_iter().map(Some).collect();

    Ok(picked
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect())
}

/// 去除重複的分類 id，保留第一次出現的順序
pub fn distinct_ids(summaries: &[CategorySummary]) -> Vec<u64> {
    let mut seen = HashSet::new();
    summaries
        .iter()
        .map(|summary| summary.id)
        .filter(|id| seen.insert(*id))
        .collect()
}
