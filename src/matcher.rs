//! Approximate name matching over cached entity collections
//!
//! Each entity type gets a derived [`MatchIndex`] over the display names of
//! its cached records. A query is scored against every indexed name with a
//! Jaro-Winkler distance in `[0, 1]` (0 = exact match) and the best
//! candidate is accepted only when its score is strictly below the
//! configured maximum.

use std::collections::HashMap;
use std::sync::Arc;
use strsim::jaro_winkler;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::error::ApiError;
use crate::models::{EntityRecord, EntityType};

/// Normalize a display name or query for matching
/// - Convert to lowercase
/// - Keep only ASCII alphanumerics and spaces
/// - Normalize whitespace (trim and collapse multiple spaces)
pub(crate) fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// One indexed display name, pointing back at its record's position in the
/// source collection
#[derive(Debug, Clone)]
struct IndexedName {
    normalized: String,
    tokens: Vec<String>,
    position: usize,
}

/// Result of a scored search: the matched record's position in the source
/// collection and its distance from the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Match {
    pub position: usize,
    pub score: f64,
}

/// Distance between a normalized query and one indexed name.
///
/// The whole-name distance handles full queries; the per-token distance lets
/// a surname alone land on "Lionel Messi". The best (lowest) of the two
/// wins.
fn distance(query: &str, candidate: &IndexedName) -> f64 {
    let whole = 1.0 - jaro_winkler(query, &candidate.normalized);
    candidate
        .tokens
        .iter()
        .map(|token| 1.0 - jaro_winkler(query, token))
        .fold(whole, f64::min)
}

/// Searchable structure derived from one entity type's cached records,
/// scoring queries against the `{type}_name` field only.
#[derive(Debug)]
pub(crate) struct MatchIndex {
    entity: EntityType,
    source: Arc<Vec<EntityRecord>>,
    names: Vec<IndexedName>,
}

impl MatchIndex {
    /// Builds the index from a record collection. Records without a string
    /// display-name field cannot be matched and are left out.
    pub fn build(entity: EntityType, source: Arc<Vec<EntityRecord>>) -> Self {
        let name_field = entity.name_field();
        let names: Vec<IndexedName> = source
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let raw = record.get(name_field)?.as_str()?;
                let normalized = normalize(raw);
                if normalized.is_empty() {
                    return None;
                }
                let tokens = normalized.split(' ').map(str::to_string).collect();
                Some(IndexedName {
                    normalized,
                    tokens,
                    position,
                })
            })
            .collect();

        debug!(
            "Built {} index: {} of {} records indexed",
            entity,
            names.len(),
            source.len()
        );

        Self {
            entity,
            source,
            names,
        }
    }

    /// Whether this index was derived from exactly the given record
    /// collection
    pub fn is_built_from(&self, records: &Arc<Vec<EntityRecord>>) -> bool {
        Arc::ptr_eq(&self.source, records)
    }

    /// Scores `query` against every indexed name and returns the single
    /// best match, or `None` when nothing is indexed or the query
    /// normalizes to nothing. Ties keep the earliest record, so identical
    /// inputs always produce identical results.
    pub fn search(&self, query: &str) -> Option<Match> {
        let query_norm = normalize(query);
        if query_norm.is_empty() {
            return None;
        }

        let mut best: Option<Match> = None;
        for candidate in &self.names {
            let score = distance(&query_norm, candidate);
            if best.is_none_or(|b| score < b.score) {
                best = Some(Match {
                    position: candidate.position,
                    score,
                });
            }
        }

        if let Some(found) = best {
            trace!(
                "Best {} match for {:?}: position {} at score {:.3}",
                self.entity, query, found.position, found.score
            );
        }
        best
    }
}

/// Per-client matcher holding one lazily built [`MatchIndex`] per entity
/// type and the acceptance threshold shared by all of them.
#[derive(Debug)]
pub(crate) struct NameMatcher {
    max_score: f64,
    indexes: RwLock<HashMap<EntityType, Arc<MatchIndex>>>,
}

impl NameMatcher {
    /// `max_score` is the acceptance threshold, clamped to the `[0, 1]`
    /// score domain
    pub fn new(max_score: f64) -> Self {
        Self {
            max_score: max_score.clamp(0.0, 1.0),
            indexes: RwLock::new(HashMap::new()),
        }
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// Returns the index for `entity`, building it on first use. The index
    /// is validated against `records` and rebuilt whenever it was derived
    /// from a different collection, so a repopulated cache can never be
    /// served by a stale index.
    pub async fn index_for(
        &self,
        entity: EntityType,
        records: &Arc<Vec<EntityRecord>>,
    ) -> Arc<MatchIndex> {
        {
            let indexes = self.indexes.read().await;
            if let Some(index) = indexes.get(&entity)
                && index.is_built_from(records)
            {
                return Arc::clone(index);
            }
        }

        let mut indexes = self.indexes.write().await;
        // Another task may have rebuilt while we waited for the write lock
        if let Some(index) = indexes.get(&entity)
            && index.is_built_from(records)
        {
            return Arc::clone(index);
        }

        let index = Arc::new(MatchIndex::build(entity, Arc::clone(records)));
        indexes.insert(entity, Arc::clone(&index));
        index
    }

    /// Resolves `query` to the best-matching record position, failing with
    /// [`ApiError::NoMatch`] when the top candidate does not score strictly
    /// below the acceptance threshold.
    pub async fn best_match(
        &self,
        entity: EntityType,
        records: &Arc<Vec<EntityRecord>>,
        query: &str,
    ) -> Result<Match, ApiError> {
        let index = self.index_for(entity, records).await;

        match index.search(query) {
            Some(found) if found.score < self.max_score => {
                debug!(
                    "Accepted {} match for {:?} at score {:.3}",
                    entity, query, found.score
                );
                Ok(found)
            }
            Some(found) => {
                debug!(
                    "Rejected {} match for {:?}: score {:.3} >= {:.3}",
                    entity, query, found.score, self.max_score
                );
                Err(ApiError::no_match(entity, query))
            }
            None => Err(ApiError::no_match(entity, query)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MAX_MATCH_SCORE;

    fn player(name: &str, id: &str) -> EntityRecord {
        let mut record = EntityRecord::new();
        record.insert("player_name".to_string(), serde_json::json!(name));
        record.insert("player_id".to_string(), serde_json::json!(id));
        record
    }

    fn roster() -> Arc<Vec<EntityRecord>> {
        Arc::new(vec![
            player("Lionel Messi", "messi1"),
            player("Sebastian Blanco", "blanco1"),
            player("Carles Gil", "gil1"),
            player("Hany Mukhtar", "mukhtar1"),
        ])
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Lionel Messi"), "lionel messi");
        assert_eq!(normalize("  Carles   Gil  "), "carles gil");
        assert_eq!(normalize("O'Hara, Kelley!"), "ohara kelley");
        assert_eq!(normalize("???"), "");
    }

    #[test]
    fn test_exact_name_scores_zero() {
        let index = MatchIndex::build(EntityType::Player, roster());
        let found = index.search("Lionel Messi").unwrap();
        assert_eq!(found.position, 0);
        assert!(found.score < 1e-9);
    }

    #[test]
    fn test_single_token_matches_full_name() {
        let index = MatchIndex::build(EntityType::Player, roster());
        let found = index.search("Messi").unwrap();
        assert_eq!(found.position, 0);
        assert!(found.score < DEFAULT_MAX_MATCH_SCORE);
    }

    #[test]
    fn test_misspelling_still_ranks_first() {
        let index = MatchIndex::build(EntityType::Player, roster());
        let found = index.search("Hani Muktar").unwrap();
        assert_eq!(found.position, 3);
        assert!(found.score < DEFAULT_MAX_MATCH_SCORE);
    }

    #[test]
    fn test_search_is_deterministic_and_keeps_first_tie() {
        let records = Arc::new(vec![player("Alex Ring", "a"), player("Alex Ring", "b")]);
        let index = MatchIndex::build(EntityType::Player, records);

        for _ in 0..3 {
            let found = index.search("Alex Ring").unwrap();
            assert_eq!(found.position, 0);
        }
    }

    #[test]
    fn test_empty_query_finds_nothing() {
        let index = MatchIndex::build(EntityType::Player, roster());
        assert!(index.search("").is_none());
        assert!(index.search("  !?  ").is_none());
    }

    #[test]
    fn test_records_without_name_field_are_skipped() {
        let mut nameless = EntityRecord::new();
        nameless.insert("player_id".to_string(), serde_json::json!("ghost"));
        let records = Arc::new(vec![nameless, player("Carles Gil", "gil1")]);

        let index = MatchIndex::build(EntityType::Player, records);
        let found = index.search("Carles Gil").unwrap();
        assert_eq!(found.position, 1);
    }

    #[tokio::test]
    async fn test_acceptance_is_strictly_below_threshold() {
        let records = roster();

        // An exact match has score 0.0, which is not strictly below 0.0
        let matcher = NameMatcher::new(0.0);
        let err = matcher
            .best_match(EntityType::Player, &records, "Lionel Messi")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NoMatch { ref name, .. } if name == "Lionel Messi"));

        let matcher = NameMatcher::new(DEFAULT_MAX_MATCH_SCORE);
        let found = matcher
            .best_match(EntityType::Player, &records, "Lionel Messi")
            .await
            .unwrap();
        assert_eq!(found.position, 0);
    }

    #[tokio::test]
    async fn test_unrelated_query_is_rejected() {
        let matcher = NameMatcher::new(DEFAULT_MAX_MATCH_SCORE);
        let err = matcher
            .best_match(EntityType::Player, &roster(), "Zlatan Ibrahimovic")
            .await
            .unwrap_err();
        assert!(err.is_no_match());
        assert_eq!(err.to_string(), "No player matched the name \"Zlatan Ibrahimovic\"");
    }

    #[tokio::test]
    async fn test_index_is_reused_for_same_records() {
        let matcher = NameMatcher::new(DEFAULT_MAX_MATCH_SCORE);
        let records = roster();

        let first = matcher.index_for(EntityType::Player, &records).await;
        let second = matcher.index_for(EntityType::Player, &records).await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_index_rebuilds_when_cache_contents_change() {
        let matcher = NameMatcher::new(DEFAULT_MAX_MATCH_SCORE);

        let old_records = roster();
        let stale = matcher.index_for(EntityType::Player, &old_records).await;

        let new_records = Arc::new(vec![player("Denis Bouanga", "bouanga1")]);
        let fresh = matcher.index_for(EntityType::Player, &new_records).await;

        assert!(!Arc::ptr_eq(&stale, &fresh));
        let found = fresh.search("Bouanga").unwrap();
        assert_eq!(found.position, 0);
    }

    #[test]
    fn test_max_score_is_clamped_to_score_domain() {
        assert_eq!(NameMatcher::new(7.5).max_score(), 1.0);
        assert_eq!(NameMatcher::new(-0.1).max_score(), 0.0);
        assert_eq!(NameMatcher::new(0.35).max_score(), 0.35);
    }
}
