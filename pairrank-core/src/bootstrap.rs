/// Seeding the ranked list before a binary search has anything to search.
///
/// With nothing ranked, the first two queued items face each other and the
/// answer fixes ranks 1 and 2. A single queued item is admitted as rank 1
/// without a question. When a removal leaves exactly one ranked item, the
/// incumbent faces the queue front the same way.
use crate::error::{RankError, Result};
use crate::types::{Item, RankedList, UnrankedQueue};

/// Two items to put in front of the user. `a` is shown first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub a: Item,
    pub b: Item,
    /// `a` is the lone ranked item rather than a queued one.
    incumbent: bool,
}

impl Matchup {
    pub fn involves_incumbent(&self) -> bool {
        self.incumbent
    }
}

/// What the ranked list needs before insertion searches can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opening {
    /// Nothing to seed: either the queue is empty or two or more items are ranked.
    Nothing,
    /// Exactly one item exists in total; it becomes rank 1 unopposed.
    AdmitAlone(Item),
    Matchup(Matchup),
}

/// Winner and loser of a resolved matchup, now ranks 1 and 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub winner: Item,
    pub loser: Item,
}

pub fn plan(ranked: &RankedList, queue: &UnrankedQueue) -> Opening {
    if ranked.len() >= 2 {
        return Opening::Nothing;
    }
    match (ranked.get(0), queue.front(), queue.get(1)) {
        (_, None, _) => Opening::Nothing,
        (Some(incumbent), Some(front), _) => Opening::Matchup(Matchup {
            a: incumbent.clone(),
            b: front.clone(),
            incumbent: true,
        }),
        (None, Some(only), None) => Opening::AdmitAlone(only.clone()),
        (None, Some(first), Some(second)) => Opening::Matchup(Matchup {
            a: first.clone(),
            b: second.clone(),
            incumbent: false,
        }),
    }
}

/// Rank the only item there is.
pub fn admit_alone(ranked: &mut RankedList, queue: &mut UnrankedQueue) -> Result<Item> {
    if !ranked.is_empty() || queue.len() != 1 {
        return Err(RankError::invalid_state(format!(
            "direct admission needs an empty ranked list and one queued item (have {} ranked, {} queued)",
            ranked.len(),
            queue.len()
        )));
    }
    let item = queue
        .pop_front()
        .ok_or_else(|| RankError::invalid_state("queue emptied unexpectedly"))?;
    ranked.insert(0, item.clone());
    tracing::info!(item = %item.name, "admitted as rank 1 without comparison");
    Ok(item)
}

/// Resolve a matchup: the chosen item becomes rank 1, the other rank 2.
///
/// The matchup must still be the one `plan` produces for the current state;
/// otherwise nothing is changed and `InvalidState` is returned.
pub fn bootstrap(
    ranked: &mut RankedList,
    queue: &mut UnrankedQueue,
    matchup: &Matchup,
    choose_a: bool,
) -> Result<BootstrapOutcome> {
    match plan(ranked, queue) {
        Opening::Matchup(current) if current == *matchup => {}
        _ => return Err(RankError::invalid_state("stale matchup: the queue or ranked list has changed")),
    }

    let queued = if matchup.incumbent { 1 } else { 2 };
    for _ in 0..queued {
        queue.pop_front();
    }

    let (winner, loser) = if choose_a {
        (matchup.a.clone(), matchup.b.clone())
    } else {
        (matchup.b.clone(), matchup.a.clone())
    };
    ranked.replace(vec![winner.clone(), loser.clone()]);

    tracing::info!(winner = %winner.name, loser = %loser.name, "bootstrap resolved");
    Ok(BootstrapOutcome { winner, loser })
}
