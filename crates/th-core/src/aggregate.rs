//! Counting helpers shared by temple and contribution statistics

use ahash::{AHashSet, RandomState};
use indexmap::IndexMap;

/// Insertion-ordered counts keyed by value
pub type ValueCounts<'a> = IndexMap<&'a str, usize, RandomState>;

/// Count occurrences, keeping keys in first-encountered order
pub fn value_counts<'a, I>(values: I) -> ValueCounts<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = ValueCounts::with_hasher(RandomState::new());
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value; ties go to the value seen first
pub fn modal_value<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in value_counts(values) {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Counts ordered by frequency, descending; equal counts keep encounter order
pub fn ranked_counts<'a, I>(values: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked: Vec<_> = value_counts(values).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Distinct values in the order they first appear
pub fn distinct_in_order<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = AHashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
