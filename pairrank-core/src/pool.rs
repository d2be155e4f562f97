/// Working-set selection: which catalog items a session ranks, and in what
/// order they are offered.
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_POOL_PRESET, POOL_PRESETS};
use crate::types::{Catalog, Category, Item};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolOptions {
    pub include_covers: bool,
    /// Keep only the N most played items. `None` keeps everything.
    pub pool_size: Option<usize>,
    /// Shuffle the selected pool instead of offering most-played first.
    pub shuffle: bool,
}

impl Default for PoolOptions {
    fn default() -> Self {
        PoolOptions {
            include_covers: true,
            pool_size: POOL_PRESETS[DEFAULT_POOL_PRESET].1,
            shuffle: false,
        }
    }
}

/// Filter, order and truncate the catalog into a session pool.
///
/// Items are sorted by play count, most played first; ties keep catalog order.
/// Shuffling happens after truncation, so it changes the order but not the
/// membership.
pub fn build_pool(catalog: &Catalog, options: &PoolOptions) -> Vec<Item> {
    let mut pool: Vec<Item> = catalog
        .items()
        .iter()
        .filter(|item| options.include_covers || item.category != Category::Cover)
        .cloned()
        .collect();

    pool.sort_by(|a, b| b.times_played.cmp(&a.times_played));

    if let Some(limit) = options.pool_size {
        pool.truncate(limit);
    }

    if options.shuffle {
        pool.shuffle(&mut rand::rng());
    }

    pool
}

/// Look up a preset by its label (case-insensitive) or by size.
pub fn preset_size(label_or_size: &str) -> Option<Option<usize>> {
    let wanted = label_or_size.trim();
    if wanted.eq_ignore_ascii_case("all") {
        return Some(None);
    }
    if let Ok(n) = wanted.parse::<usize>() {
        return Some(Some(n));
    }
    POOL_PRESETS
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(wanted))
        .map(|&(_, size)| size)
}

/// Summary numbers for a set of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PoolStats {
    pub total: usize,
    pub originals: usize,
    pub side_projects: usize,
    pub covers: usize,
    pub most_played: Option<u32>,
    pub least_played: Option<u32>,
    /// Integer average, rounded down.
    pub average_played: Option<u32>,
}

impl PoolStats {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>, merge_side_projects: bool) -> Self {
        let mut stats = PoolStats::default();
        let mut sum: u64 = 0;

        for item in items {
            stats.total += 1;
            match item.category.effective(merge_side_projects) {
                Category::Original => stats.originals += 1,
                Category::SideProject => stats.side_projects += 1,
                Category::Cover => stats.covers += 1,
            }
            sum += u64::from(item.times_played);
            stats.most_played = Some(stats.most_played.map_or(item.times_played, |m| m.max(item.times_played)));
            stats.least_played = Some(stats.least_played.map_or(item.times_played, |m| m.min(item.times_played)));
        }

        if stats.total > 0 {
            stats.average_played = Some((sum / stats.total as u64) as u32);
        }
        stats
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Original => self.originals,
            Category::SideProject => self.side_projects,
            Category::Cover => self.covers,
        }
    }
}
