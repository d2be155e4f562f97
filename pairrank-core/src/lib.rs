/// pairrank-core: Incremental pairwise ranking engine.
///
/// "Which do you prefer?" answers → binary insertion → best-first ranked list.
/// No IO, no terminal, no storage. The caller holds a `Session`, shows the
/// current `Prompt`, and feeds each answer back in.
///
/// Items are identified by their name. Each new item is placed with a binary
/// search over the ranked list, so it needs at most `⌈log2(N + 1)⌉` answers.
///
/// # Quick start
///
/// ```rust
/// use pairrank_core::{Category, Item, Prompt, Session, SessionConfig};
///
/// let pool = vec![
///     Item::new("Arcadia", "Goose", Category::Original, 120),
///     Item::new("Tumble", "Goose", Category::Original, 300),
///     Item::new("Madhuvan", "Goose", Category::Original, 250),
/// ];
///
/// let mut session = Session::new(pool, SessionConfig::default()).unwrap();
/// session.begin();
///
/// loop {
///     match session.prompt() {
///         Prompt::Matchup { a, b } => {
///             let choose_a = a.times_played >= b.times_played;
///             session.bootstrap(choose_a).unwrap();
///         }
///         Prompt::Compare { target, opponent, .. } => {
///             let prefer_target = target.times_played > opponent.times_played;
///             session.submit(prefer_target).unwrap();
///         }
///         _ => break,
///     }
/// }
///
/// for row in session.scores() {
///     println!("#{} {} ({:.1})", row.rank, row.item.name, row.score);
/// }
/// let code = session.share_code("Alice").unwrap();
/// assert!(!code.is_empty());
/// ```

pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod pool;
pub mod scoring;
pub mod search;
pub mod session;
pub mod share;
pub mod types;

// Re-export primary public API at crate root.
pub use bootstrap::{BootstrapOutcome, Matchup, Opening};
pub use error::{RankError, Result};
pub use pool::{PoolOptions, PoolStats, build_pool, preset_size};
pub use scoring::{ScoredItem, score, scored};
pub use search::{Comparison, InsertionSearch, SearchPhase, SubmitOutcome, max_comparisons};
pub use session::{Progress, Prompt, Session, SessionConfig, SessionEvent};
pub use share::{SharedRanking, ShareBundle};
pub use types::{Catalog, CatalogLookup, Category, Item, RankedList, UnrankedQueue};
