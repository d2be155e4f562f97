/// Score given to the best-ranked item (and to a lone item).
pub const MAX_SCORE: f64 = 10.0;

/// Score given to the worst-ranked item of a list with at least two entries.
pub const MIN_SCORE: f64 = 0.0;

/// Pool size presets offered to the user before a session starts.
///
/// `None` means the whole (filtered) catalog. The second entry is the default.
pub const POOL_PRESETS: [(&str, Option<usize>); 5] = [
    ("Top 25 Most Played", Some(25)),
    ("Top 50 Most Played", Some(50)),
    ("Top 100 Most Played", Some(100)),
    ("Top 150 Most Played", Some(150)),
    ("All Songs", None),
];

/// Index into `POOL_PRESETS` used when nothing else is configured.
pub const DEFAULT_POOL_PRESET: usize = 1;

/// Query parameter name the share code travels under in a URL.
pub const SHARE_QUERY_PARAM: &str = "share";
