use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};

/// Where an item comes from. The set is small and fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Original,
    SideProject,
    Cover,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Original, Category::SideProject, Category::Cover];

    /// The category used for grouping. With `merge_side_projects` on, side
    /// projects are counted as originals.
    pub fn effective(self, merge_side_projects: bool) -> Category {
        match self {
            Category::SideProject if merge_side_projects => Category::Original,
            other => other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Original => "Original",
            Category::SideProject => "Side Project",
            Category::Cover => "Cover",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rankable entity. Reference data: the engine clones items around but never
/// edits them.
///
/// The `name` is the item's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub artist: String,
    pub category: Category,
    #[serde(default)]
    pub times_played: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, artist: impl Into<String>, category: Category, times_played: u32) -> Self {
        Item {
            name: name.into(),
            artist: artist.into(),
            category,
            times_played,
        }
    }

    pub fn id(&self) -> &str {
        &self.name
    }
}

/// Resolves item identifiers to items.
pub trait CatalogLookup {
    fn lookup(&self, id: &str) -> Option<&Item>;
}

/// Read-only, duplicate-free item collection with an id → index map.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    id_to_idx: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut id_to_idx = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if id_to_idx.insert(item.name.clone(), idx).is_some() {
                return Err(RankError::DuplicateItem(item.name.clone()));
            }
        }
        Ok(Catalog { items, id_to_idx })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.id_to_idx.get(id).map(|&idx| &self.items[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_idx.contains_key(id)
    }
}

impl CatalogLookup for Catalog {
    fn lookup(&self, id: &str) -> Option<&Item> {
        self.get(id)
    }
}

impl CatalogLookup for [Item] {
    fn lookup(&self, id: &str) -> Option<&Item> {
        self.iter().find(|item| item.id() == id)
    }
}

impl CatalogLookup for Vec<Item> {
    fn lookup(&self, id: &str) -> Option<&Item> {
        self.as_slice().lookup(id)
    }
}

fn check_unique<'a>(items: impl IntoIterator<Item = &'a Item>) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(RankError::DuplicateItem(item.name.clone()));
        }
    }
    Ok(())
}

/// Best-first ordered result. Index 0 is rank 1.
///
/// Only the engine mutates a ranked list; callers read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedList {
    items: Vec<Item>,
}

impl RankedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from an already-ordered sequence (best first).
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        check_unique(&items)?;
        Ok(RankedList { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Item> {
        self.items.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name.clone()).collect()
    }

    /// Zero-based index of `id`, if ranked.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub(crate) fn insert(&mut self, idx: usize, item: Item) {
        debug_assert!(!self.contains(item.id()), "duplicate ranked item {}", item.name);
        self.items.insert(idx, item);
    }

    pub(crate) fn remove(&mut self, idx: usize) -> Item {
        self.items.remove(idx)
    }

    pub(crate) fn take_all(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }

    pub(crate) fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Items waiting for a ranking decision, front first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnrankedQueue {
    items: VecDeque<Item>,
}

impl UnrankedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        check_unique(&items)?;
        Ok(UnrankedQueue { items: items.into() })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn front(&self) -> Option<&Item> {
        self.items.front()
    }

    pub fn get(&self, idx: usize) -> Option<&Item> {
        self.items.get(idx)
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub(crate) fn pop_front(&mut self) -> Option<Item> {
        self.items.pop_front()
    }

    pub(crate) fn push_back(&mut self, item: Item) {
        self.items.push_back(item);
    }

    /// Move the item with `id` to the front. Returns false if it isn't queued.
    pub(crate) fn move_to_front(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) => {
                if let Some(item) = self.items.remove(idx) {
                    self.items.push_front(item);
                }
                true
            }
            None => false,
        }
    }

    /// Send the front item to the back. Returns the moved item.
    pub(crate) fn rotate_front_to_back(&mut self) -> Option<&Item> {
        let item = self.items.pop_front()?;
        self.items.push_back(item);
        self.items.back()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn item(name: &str) -> Item {
        Item::new(name, "Goose", Category::Original, 0)
    }

    pub fn items(names: &[&str]) -> Vec<Item> {
        names.iter().map(|n| item(n)).collect()
    }

    pub fn ranked(names: &[&str]) -> RankedList {
        RankedList::from_items(items(names)).unwrap()
    }

    pub fn names(list: &RankedList) -> Vec<&str> {
        list.iter().map(|i| i.id()).collect()
    }
}
