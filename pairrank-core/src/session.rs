/// Session orchestration: the unranked queue, the ranked list, and whichever
/// bootstrap matchup or insertion search is currently waiting on the user.
///
/// A `Session` is the whole per-user state. The caller owns it, calls one
/// operation per user decision, and renders from `prompt()` plus the returned
/// events. Every operation finishes its auto-advance before returning.
///
/// The item being decided on always sits at the front of the queue until it is
/// ranked; skipping sends it to the back, cancelling leaves it in place.
use serde::{Deserialize, Serialize};

use crate::bootstrap::{self, Matchup, Opening};
use crate::error::{RankError, Result};
use crate::pool::PoolStats;
use crate::scoring::{ScoredItem, scored};
use crate::search::{Comparison, InsertionSearch, SubmitOutcome};
use crate::share;
use crate::types::{Item, RankedList, UnrankedQueue};

/// Behaviour switches for one engine instead of several forked variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Count side projects as originals in category breakdowns.
    pub merge_side_projects: bool,
    /// Refuse to produce a share code without an owner name.
    pub require_owner_name: bool,
    pub allow_skip: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            merge_side_projects: false,
            require_owner_name: false,
            allow_skip: true,
        }
    }
}

/// What happened during one operation, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The only item there was became rank 1 without a comparison.
    Admitted { item: Item },
    /// A bootstrap matchup is waiting for `Session::bootstrap`.
    MatchupReady { a: Item, b: Item },
    BootstrapResolved { winner: Item, loser: Item },
    /// An insertion search began (or restarted) for `item`.
    SearchStarted { item: Item, next: Comparison },
    SearchAdvanced { item: Item, comparisons_made: usize, next: Comparison },
    Inserted { item: Item, rank: usize, comparisons_made: usize },
    Skipped { item: Item },
    Cancelled { item: Item },
    Prioritized { item: Item },
    Removed { item: Item, rank: usize },
    Cleared { returned: usize },
    /// The queue is empty; no further questions will be asked.
    Completed { ranked: usize, comparisons: usize },
}

/// What the presentation layer should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'a> {
    /// `begin` hasn't run yet.
    NotStarted,
    Matchup { a: &'a Item, b: &'a Item },
    Compare {
        target: &'a Item,
        opponent: &'a Item,
        /// 1-based rank of `opponent`.
        opponent_rank: usize,
        ticket: Comparison,
    },
    /// Cancelled by the user; `resume` or `prioritize` continues.
    Paused { next: Option<&'a Item> },
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub ranked: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.ranked as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Idle,
    Matchup(Matchup),
    Searching,
    Paused,
    Complete,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    ranked: RankedList,
    queue: UnrankedQueue,
    search: InsertionSearch,
    phase: Phase,
    total_comparisons: usize,
}

impl Session {
    /// A fresh session over `pool`, nothing ranked yet. Call `begin` next.
    pub fn new(pool: Vec<Item>, config: SessionConfig) -> Result<Self> {
        Self::with_state(RankedList::new(), UnrankedQueue::from_items(pool)?, config)
    }

    /// Pick up from a previously saved ranked list and queue.
    pub fn with_state(ranked: RankedList, queue: UnrankedQueue, config: SessionConfig) -> Result<Self> {
        if let Some(dup) = queue.iter().find(|item| ranked.contains(item.id())) {
            return Err(RankError::DuplicateItem(dup.name.clone()));
        }
        Ok(Session {
            config,
            ranked,
            queue,
            search: InsertionSearch::new(),
            phase: Phase::NotStarted,
            total_comparisons: 0,
        })
    }

    /// Start asking questions.
    pub fn begin(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::NotStarted {
            self.phase = Phase::Idle;
            self.advance(&mut events);
        }
        events
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ranked(&self) -> &RankedList {
        &self.ranked
    }

    pub fn queue(&self) -> &UnrankedQueue {
        &self.queue
    }

    pub fn search(&self) -> &InsertionSearch {
        &self.search
    }

    pub fn total_comparisons(&self) -> usize {
        self.total_comparisons
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn prompt(&self) -> Prompt<'_> {
        match &self.phase {
            Phase::NotStarted | Phase::Idle => Prompt::NotStarted,
            Phase::Matchup(m) => Prompt::Matchup { a: &m.a, b: &m.b },
            Phase::Searching => {
                let compare = self.search.current_comparison().ok().and_then(|ticket| {
                    let target = self.search.target()?;
                    let opponent = self.ranked.get(ticket.index)?;
                    Some(Prompt::Compare {
                        target,
                        opponent,
                        opponent_rank: ticket.index + 1,
                        ticket,
                    })
                });
                compare.unwrap_or(Prompt::NotStarted)
            }
            Phase::Paused => Prompt::Paused { next: self.queue.front() },
            Phase::Complete => Prompt::Complete,
        }
    }

    /// Resolve the pending matchup. `choose_a` picks `Prompt::Matchup::a`.
    pub fn bootstrap(&mut self, choose_a: bool) -> Result<Vec<SessionEvent>> {
        let Phase::Matchup(matchup) = &self.phase else {
            return Err(RankError::invalid_state("no matchup is pending"));
        };
        let matchup = matchup.clone();
        let outcome = bootstrap::bootstrap(&mut self.ranked, &mut self.queue, &matchup, choose_a)?;
        self.total_comparisons += 1;
        self.phase = Phase::Idle;

        let mut events = vec![SessionEvent::BootstrapResolved {
            winner: outcome.winner,
            loser: outcome.loser,
        }];
        self.advance(&mut events);
        Ok(events)
    }

    /// Answer the pending insertion comparison.
    pub fn submit(&mut self, prefer_target: bool) -> Result<Vec<SessionEvent>> {
        self.require_searching()?;
        let outcome = self.search.submit(prefer_target, &mut self.ranked)?;
        Ok(self.record(outcome))
    }

    /// Answer a specific comparison; rejected if `ticket` is no longer pending.
    pub fn answer(&mut self, ticket: Comparison, prefer_target: bool) -> Result<Vec<SessionEvent>> {
        self.require_searching()?;
        let outcome = self.search.answer(ticket, prefer_target, &mut self.ranked)?;
        Ok(self.record(outcome))
    }

    /// Send the item being decided on to the back of the queue and move on.
    pub fn skip(&mut self) -> Result<Vec<SessionEvent>> {
        if !self.config.allow_skip {
            return Err(RankError::invalid_state("skipping is disabled for this session"));
        }
        match self.phase {
            Phase::Searching => {
                self.search.cancel()?;
            }
            Phase::Matchup(_) => {}
            _ => return Err(RankError::invalid_state("nothing to skip")),
        }

        let item = self
            .queue
            .rotate_front_to_back()
            .cloned()
            .ok_or_else(|| RankError::invalid_state("queue is empty"))?;
        tracing::debug!(item = %item.name, "skipped to the back of the queue");

        self.phase = Phase::Idle;
        let mut events = vec![SessionEvent::Skipped { item }];
        self.advance(&mut events);
        Ok(events)
    }

    /// Abandon the current question without ranking. The item stays at the
    /// front of the queue and the session pauses until `resume`.
    pub fn cancel(&mut self) -> Result<Vec<SessionEvent>> {
        let item = match &self.phase {
            Phase::Searching => self.search.cancel()?,
            Phase::Matchup(_) => self
                .queue
                .front()
                .cloned()
                .ok_or_else(|| RankError::invalid_state("queue is empty"))?,
            _ => return Err(RankError::invalid_state("nothing to cancel")),
        };
        self.phase = Phase::Paused;
        Ok(vec![SessionEvent::Cancelled { item }])
    }

    pub fn resume(&mut self) -> Result<Vec<SessionEvent>> {
        if self.phase != Phase::Paused {
            return Err(RankError::invalid_state("session is not paused"));
        }
        self.phase = Phase::Idle;
        let mut events = Vec::new();
        self.advance(&mut events);
        Ok(events)
    }

    /// Jump a queued item to the front and start deciding on it right away.
    ///
    /// Any other in-progress search is cancelled (its target stays queued).
    /// Prioritizing the item already being searched is a no-op.
    pub fn prioritize(&mut self, id: &str) -> Result<Vec<SessionEvent>> {
        if self.ranked.contains(id) {
            return Err(RankError::invalid_state(format!("{id} is already ranked")));
        }
        if !self.queue.contains(id) {
            return Err(RankError::UnknownItem(id.to_string()));
        }
        if self.phase == Phase::Searching && self.search.target().is_some_and(|t| t.id() == id) {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        if self.phase == Phase::Searching {
            let abandoned = self.search.cancel()?;
            events.push(SessionEvent::Cancelled { item: abandoned });
        }

        self.queue.move_to_front(id);
        if let Some(item) = self.queue.front() {
            events.push(SessionEvent::Prioritized { item: item.clone() });
        }
        self.phase = Phase::Idle;
        self.advance(&mut events);
        Ok(events)
    }

    /// Remove the item at 1-based `rank` and return it to the back of the queue.
    ///
    /// Other items keep their relative order. A running search restarts
    /// against the shorter list; a pending matchup is re-planned.
    pub fn remove(&mut self, rank: usize) -> Result<Vec<SessionEvent>> {
        if rank == 0 || rank > self.ranked.len() {
            return Err(RankError::RankOutOfRange {
                rank,
                len: self.ranked.len(),
            });
        }

        if self.phase == Phase::Searching {
            self.search.cancel()?;
            self.phase = Phase::Idle;
        } else if matches!(self.phase, Phase::Matchup(_)) {
            self.phase = Phase::Idle;
        }

        let item = self.ranked.remove(rank - 1);
        self.queue.push_back(item.clone());
        tracing::info!(item = %item.name, rank, "removed from ranking");

        let mut events = vec![SessionEvent::Removed { item, rank }];
        self.advance(&mut events);
        Ok(events)
    }

    /// Unrank everything. Ranked items go to the back of the queue, best first.
    pub fn clear(&mut self) -> Vec<SessionEvent> {
        if self.phase == Phase::Searching {
            // The target is still queued; only the search state goes.
            if let Err(e) = self.search.cancel() {
                tracing::error!(error = %e, "searching phase without an active search");
            }
        }
        if self.phase != Phase::Paused && self.phase != Phase::NotStarted {
            self.phase = Phase::Idle;
        }

        let returned = self.ranked.take_all();
        let count = returned.len();
        for item in returned {
            self.queue.push_back(item);
        }

        let mut events = vec![SessionEvent::Cleared { returned: count }];
        self.advance(&mut events);
        events
    }

    /// Share code for the current ranking.
    pub fn share_code(&self, owner_name: &str) -> Result<String> {
        let owner_name = owner_name.trim();
        if self.config.require_owner_name && owner_name.is_empty() {
            return Err(RankError::OwnerNameRequired);
        }
        Ok(share::encode(owner_name, &self.ranked))
    }

    pub fn scores(&self) -> Vec<ScoredItem<'_>> {
        scored(&self.ranked)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            ranked: self.ranked.len(),
            total: self.ranked.len() + self.queue.len(),
        }
    }

    /// Category counts over the ranked items.
    pub fn ranked_breakdown(&self) -> PoolStats {
        PoolStats::from_items(self.ranked.iter(), self.config.merge_side_projects)
    }

    fn require_searching(&self) -> Result<()> {
        if self.phase != Phase::Searching {
            return Err(RankError::invalid_state("no insertion search is active"));
        }
        Ok(())
    }

    fn record(&mut self, outcome: SubmitOutcome) -> Vec<SessionEvent> {
        self.total_comparisons += 1;
        let mut events = Vec::new();

        match outcome {
            SubmitOutcome::Advanced { next, comparisons_made } => {
                if let Some(item) = self.search.target() {
                    events.push(SessionEvent::SearchAdvanced {
                        item: item.clone(),
                        comparisons_made,
                        next,
                    });
                }
            }
            SubmitOutcome::Inserted { index, rank, comparisons_made } => {
                // The target was the queue front for the whole search.
                self.queue.pop_front();
                let item = self.ranked.get(index).cloned();
                if let Some(item) = item {
                    tracing::info!(item = %item.name, rank, comparisons_made, "inserted");
                    events.push(SessionEvent::Inserted {
                        item,
                        rank,
                        comparisons_made,
                    });
                }
                self.phase = Phase::Idle;
                self.advance(&mut events);
            }
        }
        events
    }

    /// Start whatever the front of the queue needs next, if nothing is running.
    fn advance(&mut self, events: &mut Vec<SessionEvent>) {
        loop {
            match self.phase {
                Phase::Idle | Phase::Complete => {}
                _ => return,
            }

            match bootstrap::plan(&self.ranked, &self.queue) {
                Opening::AdmitAlone(_) => match bootstrap::admit_alone(&mut self.ranked, &mut self.queue) {
                    Ok(item) => events.push(SessionEvent::Admitted { item }),
                    Err(e) => {
                        tracing::error!(error = %e, "direct admission failed");
                        return;
                    }
                },
                Opening::Matchup(matchup) => {
                    tracing::debug!(a = %matchup.a.name, b = %matchup.b.name, "matchup ready");
                    events.push(SessionEvent::MatchupReady {
                        a: matchup.a.clone(),
                        b: matchup.b.clone(),
                    });
                    self.phase = Phase::Matchup(matchup);
                    return;
                }
                Opening::Nothing => {
                    let Some(front) = self.queue.front().cloned() else {
                        if self.phase != Phase::Complete {
                            tracing::info!(
                                ranked = self.ranked.len(),
                                comparisons = self.total_comparisons,
                                "session complete"
                            );
                            self.phase = Phase::Complete;
                            events.push(SessionEvent::Completed {
                                ranked: self.ranked.len(),
                                comparisons: self.total_comparisons,
                            });
                        }
                        return;
                    };

                    match self.search.start(front.clone(), &self.ranked) {
                        Ok(next) => {
                            self.phase = Phase::Searching;
                            events.push(SessionEvent::SearchStarted { item: front, next });
                        }
                        Err(e) => tracing::error!(error = %e, item = %front.name, "could not start search"),
                    }
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::{item, items, names};
    use crate::types::{Catalog, Category};

    fn session(pool: &[&str]) -> Session {
        let mut s = Session::new(items(pool), SessionConfig::default()).unwrap();
        s.begin();
        s
    }

    fn queue_names(s: &Session) -> Vec<&str> {
        s.queue().iter().map(|i| i.id()).collect()
    }

    /// Session whose ranked list is already `ranked` with `queued` waiting.
    fn seeded(ranked: &[&str], queued: &[&str], config: SessionConfig) -> Session {
        let mut s = Session::with_state(
            RankedList::from_items(items(ranked)).unwrap(),
            UnrankedQueue::from_items(items(queued)).unwrap(),
            config,
        )
        .unwrap();
        s.begin();
        s
    }

    fn compare_target(s: &Session) -> Option<&str> {
        match s.prompt() {
            Prompt::Compare { target, .. } => Some(target.id()),
            _ => None,
        }
    }

    #[test]
    fn test_bootstrap_scenario() {
        let mut s = Session::new(items(&["A", "B"]), SessionConfig::default()).unwrap();
        let events = s.begin();
        assert!(matches!(&events[..], [SessionEvent::MatchupReady { a, b }] if a.id() == "A" && b.id() == "B"));

        let events = s.bootstrap(true).unwrap();
        assert_eq!(names(s.ranked()), vec!["A", "B"]);
        assert!(s.queue().is_empty());
        assert_eq!(s.total_comparisons(), 1);
        assert!(matches!(events.last(), Some(SessionEvent::Completed { ranked: 2, comparisons: 1 })));
        assert!(s.is_complete());

        let scores: Vec<f64> = s.scores().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![10.0, 0.0]);
    }

    #[test]
    fn test_insertion_scenario() {
        let mut s = seeded(&["A", "B", "C", "D"], &["E"], SessionConfig::default());
        match s.prompt() {
            Prompt::Compare { target, opponent, opponent_rank, .. } => {
                assert_eq!((target.id(), opponent.id(), opponent_rank), ("E", "B", 2));
            }
            other => panic!("unexpected prompt {other:?}"),
        }

        s.submit(true).unwrap();
        assert!(matches!(s.prompt(), Prompt::Compare { opponent, .. } if opponent.id() == "A"));

        let events = s.submit(false).unwrap();
        assert!(matches!(&events[0], SessionEvent::Inserted { item, rank: 2, comparisons_made: 2 } if item.id() == "E"));
        assert_eq!(names(s.ranked()), vec!["A", "E", "B", "C", "D"]);
        assert!(s.is_complete());
    }

    #[test]
    fn test_skip_scenario() {
        let mut s = seeded(&["A", "B", "C", "D"], &["E", "F", "G"], SessionConfig::default());
        s.submit(true).unwrap();

        let events = s.skip().unwrap();
        assert!(matches!(&events[0], SessionEvent::Skipped { item } if item.id() == "E"));
        assert!(matches!(&events[1], SessionEvent::SearchStarted { item, .. } if item.id() == "F"));
        assert_eq!(queue_names(&s), vec!["F", "G", "E"]);
        assert_eq!(names(s.ranked()), vec!["A", "B", "C", "D"]);
        assert_eq!(s.search().comparisons_made(), 0);
        assert_eq!(compare_target(&s), Some("F"));
    }

    #[test]
    fn test_skip_disabled() {
        let config = SessionConfig {
            allow_skip: false,
            ..Default::default()
        };
        let mut s = seeded(&["A", "B"], &["C", "D"], config);
        assert!(matches!(s.skip(), Err(RankError::InvalidState(_))));
        assert_eq!(compare_target(&s), Some("C"));
    }

    #[test]
    fn test_skip_during_matchup_rotates_front() {
        let mut s = session(&["A", "B", "C"]);
        s.skip().unwrap();
        assert!(matches!(s.prompt(), Prompt::Matchup { a, b } if a.id() == "B" && b.id() == "C"));
    }

    #[test]
    fn test_full_session_ranks_everything() {
        let pool = ["P0", "P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8"];
        let mut s = session(&pool);
        // Hidden preference: lexicographically smaller is better.
        loop {
            match s.prompt() {
                Prompt::Matchup { a, b } => {
                    let choose_a = a.id() < b.id();
                    s.bootstrap(choose_a).unwrap();
                }
                Prompt::Compare { target, opponent, .. } => {
                    let prefer = target.id() < opponent.id();
                    s.submit(prefer).unwrap();
                }
                Prompt::Complete => break,
                other => panic!("unexpected prompt {other:?}"),
            }
        }
        assert_eq!(names(s.ranked()), pool.to_vec());
        assert_eq!(s.progress(), Progress { ranked: 9, total: 9 });
    }

    #[test]
    fn test_single_item_pool() {
        let mut s = Session::new(items(&["Solo"]), SessionConfig::default()).unwrap();
        let events = s.begin();
        assert!(matches!(&events[0], SessionEvent::Admitted { item } if item.id() == "Solo"));
        assert!(matches!(events[1], SessionEvent::Completed { ranked: 1, comparisons: 0 }));
        assert_eq!(s.total_comparisons(), 0);
    }

    #[test]
    fn test_empty_pool_completes() {
        let mut s = Session::new(Vec::new(), SessionConfig::default()).unwrap();
        let events = s.begin();
        assert_eq!(events, vec![SessionEvent::Completed { ranked: 0, comparisons: 0 }]);
        assert_eq!(s.prompt(), Prompt::Complete);
        assert!(s.bootstrap(true).is_err());
        assert!(s.submit(true).is_err());
    }

    #[test]
    fn test_calls_before_begin_are_rejected() {
        let mut s = Session::new(items(&["A", "B"]), SessionConfig::default()).unwrap();
        assert_eq!(s.prompt(), Prompt::NotStarted);
        assert!(s.bootstrap(true).is_err());
        assert!(s.skip().is_err());
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let mut s = seeded(&["A", "B", "C", "D", "E", "F", "G"], &["X"], SessionConfig::default());
        let Prompt::Compare { ticket, .. } = s.prompt() else { panic!("expected comparison") };
        s.answer(ticket, false).unwrap();
        assert!(matches!(s.answer(ticket, false), Err(RankError::InvalidState(_))));
        assert_eq!(s.total_comparisons(), 1);
    }

    #[test]
    fn test_cancel_pauses_and_resume_restarts() {
        let mut s = seeded(&["A", "B", "C"], &["X", "Y"], SessionConfig::default());
        s.submit(true).unwrap();

        let events = s.cancel().unwrap();
        assert!(matches!(&events[..], [SessionEvent::Cancelled { item }] if item.id() == "X"));
        assert!(s.is_paused());
        assert!(matches!(s.prompt(), Prompt::Paused { next: Some(n) } if n.id() == "X"));
        assert_eq!(names(s.ranked()), vec!["A", "B", "C"]);
        assert!(s.submit(true).is_err());

        let events = s.resume().unwrap();
        assert!(matches!(&events[0], SessionEvent::SearchStarted { item, .. } if item.id() == "X"));
        assert_eq!(s.search().comparisons_made(), 0);
        assert!(s.resume().is_err());
    }

    #[test]
    fn test_prioritize_abandons_current_search() {
        let mut s = seeded(&["A", "B", "C"], &["X", "Y", "Z"], SessionConfig::default());
        s.submit(false).unwrap();

        let events = s.prioritize("Z").unwrap();
        assert!(matches!(&events[0], SessionEvent::Cancelled { item } if item.id() == "X"));
        assert!(matches!(&events[1], SessionEvent::Prioritized { item } if item.id() == "Z"));
        assert!(matches!(&events[2], SessionEvent::SearchStarted { item, .. } if item.id() == "Z"));
        assert_eq!(queue_names(&s), vec!["Z", "X", "Y"]);
        assert_eq!(compare_target(&s), Some("Z"));
    }

    #[test]
    fn test_prioritize_from_pause_and_errors() {
        let mut s = seeded(&["A", "B"], &["X", "Y"], SessionConfig::default());
        s.cancel().unwrap();
        s.prioritize("Y").unwrap();
        assert_eq!(compare_target(&s), Some("Y"));

        assert_eq!(s.prioritize("Nope"), Err(RankError::UnknownItem("Nope".to_string())));
        assert!(matches!(s.prioritize("A"), Err(RankError::InvalidState(_))));
    }

    #[test]
    fn test_prioritize_current_target_keeps_progress() {
        let mut s = seeded(&["A", "B", "C", "D", "E", "F", "G"], &["X", "Y"], SessionConfig::default());
        s.submit(true).unwrap();
        assert!(s.prioritize("X").unwrap().is_empty());
        assert_eq!(s.search().comparisons_made(), 1);
    }

    #[test]
    fn test_remove_keeps_order_and_requeues() {
        let mut s = seeded(&["A", "B", "C", "D"], &[], SessionConfig::default());
        assert!(s.is_complete());

        let events = s.remove(2).unwrap();
        assert!(matches!(&events[0], SessionEvent::Removed { item, rank: 2 } if item.id() == "B"));
        assert_eq!(names(s.ranked()), vec!["A", "C", "D"]);
        // Requeued B is immediately up for re-ranking.
        assert_eq!(compare_target(&s), Some("B"));
        assert!(!s.is_complete());
    }

    #[test]
    fn test_remove_during_search_restarts() {
        let mut s = seeded(&["A", "B", "C", "D"], &["X"], SessionConfig::default());
        s.submit(true).unwrap();
        s.remove(4).unwrap();
        assert_eq!(names(s.ranked()), vec!["A", "B", "C"]);
        assert_eq!(compare_target(&s), Some("X"));
        assert_eq!(s.search().comparisons_made(), 0);
        assert_eq!((s.search().low(), s.search().high()), (0, 2));
        assert_eq!(queue_names(&s), vec!["X", "D"]);
    }

    #[test]
    fn test_remove_down_to_one_replans_bootstrap() {
        let mut s = seeded(&["A", "B"], &["X"], SessionConfig::default());
        s.remove(1).unwrap();
        assert!(matches!(s.prompt(), Prompt::Matchup { a, b } if a.id() == "B" && b.id() == "X"));
        s.bootstrap(false).unwrap();
        assert_eq!(names(s.ranked()), vec!["X", "B"]);
        assert_eq!(compare_target(&s), Some("A"));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut s = seeded(&["A"], &[], SessionConfig::default());
        assert_eq!(s.remove(0), Err(RankError::RankOutOfRange { rank: 0, len: 1 }));
        assert_eq!(s.remove(2), Err(RankError::RankOutOfRange { rank: 2, len: 1 }));
    }

    #[test]
    fn test_clear_requeues_ranked_items() {
        let mut s = seeded(&["A", "B", "C"], &["X"], SessionConfig::default());
        let events = s.clear();
        assert_eq!(events[0], SessionEvent::Cleared { returned: 3 });
        assert!(s.ranked().is_empty());
        assert_eq!(queue_names(&s), vec!["X", "A", "B", "C"]);
        assert!(matches!(s.prompt(), Prompt::Matchup { a, b } if a.id() == "X" && b.id() == "A"));
    }

    #[test]
    fn test_clear_mid_search_drops_search_state() {
        let mut s = seeded(&["A", "B", "C"], &["X"], SessionConfig::default());
        assert_eq!(compare_target(&s), Some("X"));

        s.clear();
        assert!(!s.search().is_active());
        assert_eq!(queue_names(&s), vec!["X", "A", "B", "C"]);

        s.bootstrap(true).unwrap();
        assert_eq!(names(s.ranked()), vec!["X", "A"]);
        assert_eq!(compare_target(&s), Some("B"));
    }

    #[test]
    fn test_share_code_owner_requirement() {
        let config = SessionConfig {
            require_owner_name: true,
            ..Default::default()
        };
        let s = seeded(&["A", "B"], &[], config);
        assert_eq!(s.share_code("   "), Err(RankError::OwnerNameRequired));

        let code = s.share_code(" Alice ").unwrap();
        let catalog = Catalog::new(items(&["A", "B"])).unwrap();
        let shared = share::decode(&code, &catalog).unwrap();
        assert_eq!(shared.owner_name, "Alice");
        assert_eq!(shared.items, s.ranked().as_slice());

        let relaxed = seeded(&["A"], &[], SessionConfig::default());
        assert!(relaxed.share_code("").is_ok());
    }

    #[test]
    fn test_breakdown_honours_merge_flag() {
        let ranked = vec![
            Item::new("A", "Goose", Category::Original, 1),
            Item::new("B", "Vasudo", Category::SideProject, 1),
            Item::new("C", "Grateful Dead", Category::Cover, 1),
        ];
        let build = |merge| {
            let config = SessionConfig {
                merge_side_projects: merge,
                ..Default::default()
            };
            Session::with_state(RankedList::from_items(ranked.clone()).unwrap(), UnrankedQueue::new(), config).unwrap()
        };
        assert_eq!(build(false).ranked_breakdown().side_projects, 1);
        let merged = build(true).ranked_breakdown();
        assert_eq!((merged.originals, merged.side_projects, merged.covers), (2, 0, 1));
    }

    #[test]
    fn test_with_state_rejects_overlap() {
        let err = Session::with_state(
            RankedList::from_items(vec![item("A")]).unwrap(),
            UnrankedQueue::from_items(vec![item("A")]).unwrap(),
            SessionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, RankError::DuplicateItem("A".to_string()));
    }

    #[test]
    fn test_duplicate_pool_rejected() {
        assert!(Session::new(items(&["A", "A"]), SessionConfig::default()).is_err());
    }

    #[test]
    fn test_progress_fraction() {
        let s = seeded(&["A"], &["B", "C", "D"], SessionConfig::default());
        assert_eq!(s.progress().fraction(), 0.25);
        assert_eq!(Progress { ranked: 0, total: 0 }.fraction(), 0.0);
    }
}
