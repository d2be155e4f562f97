/// Binary insertion search driven by one human comparison at a time.
///
/// The search holds `[low, high]` bounds into the ranked list and asks the
/// caller to compare the target against the middle entry. Each answer moves one
/// bound past the middle, so a list of `N` items needs at most
/// `⌈log2(N + 1)⌉` answers. Answers are trusted as given: inconsistent
/// preferences produce an inconsistent list, and nothing here tries to detect
/// that.
///
/// The state survives between calls; the caller keeps the `InsertionSearch`
/// (and the ranked list it was started against) and feeds answers back in.
use crate::error::{RankError, Result};
use crate::types::{Item, RankedList};

/// Lifecycle of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Active,
    /// Target inserted at the given 1-based rank.
    Complete { rank: usize },
    Cancelled,
}

/// A pending comparison: which ranked index to show against the target, and
/// the sequence number of the answer it expects.
///
/// Handing a ticket back to `InsertionSearch::answer` rejects answers given
/// against a comparison that is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub index: usize,
    pub sequence: usize,
}

/// Result of one accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Bounds narrowed; `next` is the comparison to show now.
    Advanced { next: Comparison, comparisons_made: usize },
    /// Bounds crossed; the target now sits at `index` (rank `index + 1`).
    Inserted { index: usize, rank: usize, comparisons_made: usize },
}

#[derive(Debug, Clone, Default)]
pub struct InsertionSearch {
    target: Option<Item>,
    low: usize,
    /// One past `high`. Keeps the bounds unsigned: `high = end - 1`.
    end: usize,
    comparisons_made: usize,
    /// Length of the ranked list when the search started.
    list_len: usize,
    phase: SearchPhase,
}

/// Upper bound on answers needed to place one item into a list of `len` items.
pub fn max_comparisons(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

impl InsertionSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SearchPhase::Active
    }

    pub fn target(&self) -> Option<&Item> {
        self.target.as_ref()
    }

    pub fn low(&self) -> usize {
        self.low
    }

    /// Inclusive upper bound. `-1` once the target belongs above everything.
    pub fn high(&self) -> isize {
        self.end as isize - 1
    }

    pub fn comparisons_made(&self) -> usize {
        self.comparisons_made
    }

    /// Begin placing `item` into `ranked`.
    ///
    /// Fails with `EmptyList` if there is nothing to compare against and with
    /// `InvalidState` if a search is already running.
    pub fn start(&mut self, item: Item, ranked: &RankedList) -> Result<Comparison> {
        if self.is_active() {
            return Err(RankError::invalid_state("a search is already in progress"));
        }
        if ranked.is_empty() {
            return Err(RankError::EmptyList);
        }
        if ranked.contains(item.id()) {
            return Err(RankError::DuplicateItem(item.name));
        }

        tracing::debug!(target_item = %item.name, list_len = ranked.len(), "insertion search started");

        *self = InsertionSearch {
            target: Some(item),
            low: 0,
            end: ranked.len(),
            comparisons_made: 0,
            list_len: ranked.len(),
            phase: SearchPhase::Active,
        };
        Ok(self.ticket())
    }

    /// The comparison the caller should present next.
    pub fn current_comparison(&self) -> Result<Comparison> {
        if !self.is_active() {
            return Err(RankError::invalid_state(format!(
                "no comparison pending (search is {:?})",
                self.phase
            )));
        }
        // An active search always has low <= high; completion happens inside submit.
        debug_assert!(self.low < self.end);
        Ok(self.ticket())
    }

    /// Index into the ranked list of the item to compare against the target.
    pub fn current_comparison_index(&self) -> Result<usize> {
        self.current_comparison().map(|c| c.index)
    }

    /// Record an answer for the current comparison.
    ///
    /// `prefer_target` means the target ranks above the item at the middle
    /// index. When the bounds cross, the target is inserted into `ranked`.
    pub fn submit(&mut self, prefer_target: bool, ranked: &mut RankedList) -> Result<SubmitOutcome> {
        let ticket = self.current_comparison()?;
        self.apply(ticket, prefer_target, ranked)
    }

    /// Like `submit`, but only if `ticket` is still the pending comparison.
    pub fn answer(&mut self, ticket: Comparison, prefer_target: bool, ranked: &mut RankedList) -> Result<SubmitOutcome> {
        let current = self.current_comparison()?;
        if ticket != current {
            return Err(RankError::invalid_state(format!(
                "stale comparison: answered index {} (#{}), pending index {} (#{})",
                ticket.index, ticket.sequence, current.index, current.sequence
            )));
        }
        self.apply(current, prefer_target, ranked)
    }

    /// Abandon the search. The ranked list is untouched; the target is handed
    /// back to the caller to requeue or drop.
    pub fn cancel(&mut self) -> Result<Item> {
        if !self.is_active() {
            return Err(RankError::invalid_state("no search to cancel"));
        }
        let target = self
            .target
            .take()
            .ok_or_else(|| RankError::invalid_state("active search has no target"))?;
        tracing::debug!(target_item = %target.name, comparisons = self.comparisons_made, "insertion search cancelled");
        self.phase = SearchPhase::Cancelled;
        Ok(target)
    }

    fn ticket(&self) -> Comparison {
        Comparison {
            index: (self.low + self.end - 1) / 2,
            sequence: self.comparisons_made,
        }
    }

    fn apply(&mut self, ticket: Comparison, prefer_target: bool, ranked: &mut RankedList) -> Result<SubmitOutcome> {
        if ranked.len() != self.list_len {
            return Err(RankError::invalid_state(format!(
                "ranked list changed from {} to {} items during the search",
                self.list_len,
                ranked.len()
            )));
        }

        let mid = ticket.index;
        if prefer_target {
            self.end = mid;
        } else {
            self.low = mid + 1;
        }
        self.comparisons_made += 1;

        tracing::debug!(
            mid,
            prefer_target,
            low = self.low,
            high = self.high(),
            comparisons = self.comparisons_made,
            "comparison recorded"
        );

        if self.low < self.end {
            return Ok(SubmitOutcome::Advanced {
                next: self.ticket(),
                comparisons_made: self.comparisons_made,
            });
        }

        let target = self
            .target
            .take()
            .ok_or_else(|| RankError::invalid_state("active search has no target"))?;
        let index = self.low;
        ranked.insert(index, target);
        self.phase = SearchPhase::Complete { rank: index + 1 };

        Ok(SubmitOutcome::Inserted {
            index,
            rank: index + 1,
            comparisons_made: self.comparisons_made,
        })
    }
}
