/// Share codes: a finished ranking as a compact, URL-safe string.
///
/// The code carries the owner's name and the ranked identifiers only, never the
/// full records. Decoding resolves identifiers against whatever catalog the
/// reader has; identifiers it doesn't know are dropped.
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::constants::SHARE_QUERY_PARAM;
use crate::error::{RankError, Result};
use crate::types::{CatalogLookup, Item, RankedList};

/// Wire envelope. Short field names keep codes small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareBundle {
    #[serde(rename = "o")]
    pub owner_name: String,
    #[serde(rename = "r")]
    pub ordered_item_ids: Vec<String>,
}

/// A ranking rebuilt from a share code. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedRanking {
    pub owner_name: String,
    pub items: Vec<Item>,
    /// Identifiers in the code that the catalog didn't know.
    pub dropped: Vec<String>,
}

impl SharedRanking {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn encode(owner_name: &str, ranked: &RankedList) -> String {
    let bundle = ShareBundle {
        owner_name: owner_name.to_string(),
        ordered_item_ids: ranked.ids(),
    };
    encode_bundle(&bundle)
}

pub fn encode_bundle(bundle: &ShareBundle) -> String {
    // A struct of strings always serializes.
    let json = serde_json::to_vec(bundle).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Parse a share code into its envelope without resolving anything.
pub fn decode_bundle(code: &str) -> Result<ShareBundle> {
    let code = strip_query_prefix(code.trim());
    if code.is_empty() {
        return Err(RankError::MalformedShareCode("empty code".to_string()));
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(code)
        .map_err(|e| RankError::MalformedShareCode(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| RankError::MalformedShareCode(format!("invalid envelope: {e}")))
}

/// Decode a share code against `catalog`.
///
/// Structural problems fail outright. Unknown identifiers are tolerated: they
/// are listed in `dropped` and the rebuilt ranking is shorter.
pub fn decode<C: CatalogLookup + ?Sized>(code: &str, catalog: &C) -> Result<SharedRanking> {
    let bundle = decode_bundle(code)?;

    let mut items = Vec::with_capacity(bundle.ordered_item_ids.len());
    let mut dropped = Vec::new();
    for id in bundle.ordered_item_ids {
        match catalog.lookup(&id) {
            Some(item) if !items.iter().any(|i: &Item| i.id() == id) => items.push(item.clone()),
            _ => dropped.push(id),
        }
    }

    if !dropped.is_empty() {
        tracing::warn!(count = dropped.len(), "share code references items missing from the catalog");
    }

    Ok(SharedRanking {
        owner_name: bundle.owner_name,
        items,
        dropped,
    })
}

/// Accept `share=<code>`, `?share=<code>` or a bare code.
fn strip_query_prefix(code: &str) -> &str {
    let code = code.strip_prefix('?').unwrap_or(code);
    code.strip_prefix(SHARE_QUERY_PARAM)
        .and_then(|rest| rest.strip_prefix('='))
        .unwrap_or(code)
}
