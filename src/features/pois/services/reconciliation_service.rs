use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::error::{DirectoryError, Result};
use crate::features::pois::models::PointOfInterest;

/// The permission-scoped feeds a directory view is assembled from, in fixed
/// priority order: the moderation queue is the most authoritative for
/// in-flight records, the public feed outranks the owner's own view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    Pending,
    Public,
    Mine,
}

impl FeedSource {
    fn priority(&self) -> u8 {
        match self {
            FeedSource::Pending => 0,
            FeedSource::Public => 1,
            FeedSource::Mine => 2,
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Pending => write!(f, "pending"),
            FeedSource::Public => write!(f, "public"),
            FeedSource::Mine => write!(f, "mine"),
        }
    }
}

/// One fetched feed: either its records or the failure detail reported by
/// the collaborator.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    source: FeedSource,
    outcome: std::result::Result<Vec<PointOfInterest>, String>,
}

impl FeedSnapshot {
    pub fn loaded(source: FeedSource, records: Vec<PointOfInterest>) -> Self {
        Self {
            source,
            outcome: Ok(records),
        }
    }

    pub fn failed(source: FeedSource, detail: impl Into<String>) -> Self {
        Self {
            source,
            outcome: Err(detail.into()),
        }
    }
}

/// The merged, de-duplicated directory view.
#[derive(Debug, Clone, Default)]
pub struct ReconciledDirectory {
    pub pois: Vec<PointOfInterest>,
    pub failed_sources: Vec<FeedSource>,
}

impl ReconciledDirectory {
    /// True when at least one feed failed to load and the view was built
    /// from the remaining feeds.
    pub fn is_partial(&self) -> bool {
        !self.failed_sources.is_empty()
    }
}

/// Merges permission-scoped feed snapshots into one ordered, de-duplicated
/// sequence with deterministic conflict resolution.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Merge feeds in fixed priority order.
    ///
    /// Snapshots are sorted by source priority first, so the output never
    /// depends on fetch-completion order. Within the merge, a record is
    /// appended only if its id has not been appended yet; ties between feeds
    /// resolve to the whole record from the higher-priority feed (fields are
    /// never mixed across feeds). Failed feeds contribute nothing but are
    /// surfaced in `failed_sources`.
    pub fn reconcile(mut feeds: Vec<FeedSnapshot>) -> ReconciledDirectory {
        feeds.sort_by_key(|feed| feed.source.priority());

        let mut seen = HashSet::new();
        let mut pois = Vec::new();
        let mut failed_sources = Vec::new();

        for feed in feeds {
            match feed.outcome {
                Ok(records) => {
                    for record in records {
                        if seen.insert(record.id) {
                            pois.push(record);
                        } else {
                            tracing::debug!(
                                "POI {} from feed '{}' shadowed by a higher-priority feed",
                                record.id,
                                feed.source
                            );
                        }
                    }
                }
                Err(detail) => {
                    tracing::warn!("Feed '{}' failed to load: {}", feed.source, detail);
                    failed_sources.push(feed.source);
                }
            }
        }

        debug_assert!(Self::ensure_unique(&pois).is_ok());
        ReconciledDirectory {
            pois,
            failed_sources,
        }
    }

    /// Fail-fast duplicate check over an already-reconciled sequence. The
    /// merge above cannot emit duplicates; this guards downstream code that
    /// recombines reconciled sets.
    pub fn ensure_unique(pois: &[PointOfInterest]) -> Result<()> {
        let mut seen = HashSet::new();
        for poi in pois {
            if !seen.insert(poi.id) {
                return Err(DirectoryError::DuplicateRecord(poi.id));
            }
        }
        Ok(())
    }
}
