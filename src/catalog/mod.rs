//! Category catalog: response normalization and the single-slot cache
//!
//! The remote catalog endpoint historically answered with either a bare array
//! of slugs or an array of `{slug, name, url}` objects. Both shapes decode
//! through [`RawCategoryList`] and normalize into [`CategoryOption`] pairs.

pub mod client;

pub use client::{CatalogClient, SubmissionReceipt};

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// A selectable category, normalized to a value/label pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// Stable identifier stored into the form
    pub value: String,
    /// Human-readable label shown in the select control
    pub label: String,
}

/// The two response shapes the catalog endpoint is known to produce
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCategoryList {
    /// `["smartphones", "laptops", ...]`
    Slugs(Vec<String>),
    /// `[{"slug": "...", "name": "...", "url": "..."}, ...]`
    Objects(Vec<RawCategory>),
}

/// One object-form category entry; every field may be absent
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawCategoryList {
    /// Normalize either shape into value/label pairs
    ///
    /// Slug arrays use the slug for both value and label. Object entries
    /// prefer slug as value and name as label, each falling back to the
    /// other when missing.
    pub fn normalize(self) -> Vec<CategoryOption> {
        match self {
            RawCategoryList::Slugs(slugs) => slugs
                .into_iter()
                .map(|s| CategoryOption {
                    label: s.clone(),
                    value: s,
                })
                .collect(),
            RawCategoryList::Objects(objects) => objects
                .into_iter()
                .map(|o| {
                    let value = o
                        .slug
                        .clone()
                        .or_else(|| o.name.clone())
                        .unwrap_or_default();
                    let label = o.name.or(o.slug).unwrap_or_else(|| value.clone());
                    CategoryOption { value, label }
                })
                .collect(),
        }
    }
}

/// Process-wide single-slot cache for the category list
///
/// One slot, no per-query key: the catalog has exactly one list. Entries
/// expire after the configured TTL; `invalidate` drops the slot so a retry
/// goes back to the network through the one fetch path.
#[derive(Debug)]
pub struct CategoryCache {
    slot: Option<(Vec<CategoryOption>, Instant)>,
    ttl: Duration,
}

impl CategoryCache {
    /// Create an empty cache with the given time-to-live
    pub fn new(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    /// The cached list, if it is fresher than the TTL at `now`
    pub fn fresh_at(&self, now: Instant) -> Option<&[CategoryOption]> {
        match &self.slot {
            Some((list, fetched_at)) if now.duration_since(*fetched_at) < self.ttl => {
                Some(list.as_slice())
            }
            _ => None,
        }
    }

    /// The cached list, if it is currently fresh
    pub fn fresh(&self) -> Option<&[CategoryOption]> {
        self.fresh_at(Instant::now())
    }

    /// Store a freshly fetched list
    pub fn store(&mut self, list: Vec<CategoryOption>) {
        self.slot = Some((list, Instant::now()));
    }

    /// Drop the slot so the next lookup misses
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
