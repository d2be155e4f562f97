/// Text for the "Which do you prefer?" screen and for session events.
use pairrank_core::{Item, SessionEvent, max_comparisons, score};

fn card(item: &Item, meta: &str) -> String {
    format!("{}\n    {} · {}\n    {meta}", item.name, item.artist, item.category)
}

/// The opening question, before anything is ranked.
pub fn render_matchup(a: &Item, b: &Item) -> String {
    format!(
        "Which do you prefer?\n\n\
         [1] {}\n\n\
         [2] {}\n",
        card(a, &format!("Played {}x", a.times_played)),
        card(b, &format!("Played {}x", b.times_played)),
    )
}

/// One insertion comparison: the new item (left) against a ranked one (right).
pub fn render_comparison(
    target: &Item,
    opponent: &Item,
    opponent_rank: usize,
    ranked_len: usize,
    comparison_number: usize,
) -> String {
    format!(
        "Which do you prefer?  (comparison {comparison_number} of at most {})\n\n\
         [1] {}\n\n\
         [2] {}\n",
        max_comparisons(ranked_len),
        card(target, "New song"),
        card(
            opponent,
            &format!("Currently #{opponent_rank} • Score: {:.1}", score(opponent_rank, ranked_len))
        ),
    )
}

/// One line describing an event, or None for events that need no mention.
pub fn describe_event(event: &SessionEvent) -> Option<String> {
    let line = match event {
        SessionEvent::Admitted { item } => format!("{} is your #1 (nothing to compare against yet)", item.name),
        SessionEvent::BootstrapResolved { winner, loser } => {
            format!("#1 {}, #2 {}", winner.name, loser.name)
        }
        SessionEvent::Inserted { item, rank, comparisons_made } => {
            format!("{} ranked #{rank} after {comparisons_made} comparisons", item.name)
        }
        SessionEvent::Skipped { item } => format!("Skipped {} (moved to the back of the queue)", item.name),
        SessionEvent::Cancelled { item } => format!("Stopped ranking {}", item.name),
        SessionEvent::Prioritized { item } => format!("Ranking {} next", item.name),
        SessionEvent::Removed { item, rank } => format!("Removed {} from #{rank}", item.name),
        SessionEvent::Cleared { returned } => format!("Cleared {returned} ranked items"),
        SessionEvent::Completed { ranked, comparisons } => {
            format!("All done: {ranked} ranked with {comparisons} comparisons")
        }
        SessionEvent::MatchupReady { .. }
        | SessionEvent::SearchStarted { .. }
        | SessionEvent::SearchAdvanced { .. } => return None,
    };
    Some(line)
}
