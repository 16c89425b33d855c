// src/domain/normalize.rs

use crate::domain::node::{as_list, text};
use crate::domain::property::PropertyRecord;
use serde_json::Value;
use tracing::debug;

pub struct Normalized {
    pub records: Vec<PropertyRecord>,
    /// `<property>` nodes seen in the feed, kept or not.
    pub total: usize,
}

impl Normalized {
    pub fn skipped(&self) -> usize {
        self.total - self.records.len()
    }
}

/// Listings with no status, or a status mentioning "available", are kept.
pub fn is_available(node: &Value) -> bool {
    let status = text(node.get("status")).to_lowercase();
    status.is_empty() || status.contains("available")
}

/// `properties/property` → one record per available listing, in feed order.
pub fn normalize_feed(tree: &Value) -> Normalized {
    let nodes = as_list(tree.get("properties").and_then(|p| p.get("property")));
    let total = nodes.len();

    let records = nodes
        .into_iter()
        .enumerate()
        .filter(|(i, node)| {
            let keep = is_available(node);
            if !keep {
                debug!(
                    "Skipping property #{} with status '{}'",
                    i + 1,
                    text(node.get("status"))
                );
            }
            keep
        })
        .map(|(i, node)| PropertyRecord::from_node(node, i + 1))
        .collect();

    Normalized { records, total }
}
