//! Caller-facing query options for entity and statistics operations

use crate::error::ApiError;
use crate::models::League;

/// Options for entity-list operations like [`crate::Client::get_players`].
///
/// Leagues default to all supported leagues when not set. `names` are
/// fuzzy-resolved to identifiers and merged in front of explicit `ids`.
///
/// # Example
/// ```
/// use asa_client::{EntityQuery, League};
///
/// let query = EntityQuery::new()
///     .leagues([League::Mls])
///     .ids(["782735", "89011"])
///     .name("Carles Gil");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityQuery {
    pub(crate) leagues: Option<Vec<League>>,
    pub(crate) ids: Vec<String>,
    pub(crate) names: Vec<String>,
}

impl EntityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the request to these leagues, in this order
    pub fn leagues(mut self, leagues: impl IntoIterator<Item = League>) -> Self {
        self.leagues = Some(leagues.into_iter().collect());
        self
    }

    /// Add one explicit identifier
    pub fn id(mut self, id: impl ToString) -> Self {
        self.ids.push(id.to_string());
        self
    }

    /// Add explicit identifiers
    pub fn ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.ids.extend(ids.into_iter().map(|id| id.to_string()));
        self
    }

    /// Add one free-text name to resolve
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Add free-text names to resolve
    pub fn names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Options for statistics operations like [`crate::Client::get_teams_xgoals`].
///
/// Extra parameters are sent in the order they were added; keys written in
/// camelCase are converted to the API's snake_case, values pass through
/// verbatim.
///
/// # Example
/// ```
/// use asa_client::{League, StatQuery};
///
/// let query = StatQuery::new()
///     .leagues([League::Mls])
///     .param("minimumPasses", 42)
///     .param("seasonName", "2021");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatQuery {
    pub(crate) leagues: Option<Vec<League>>,
    pub(crate) params: Vec<(String, String)>,
}

impl StatQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the request to these leagues, in this order
    pub fn leagues(mut self, leagues: impl IntoIterator<Item = League>) -> Self {
        self.leagues = Some(leagues.into_iter().collect());
        self
    }

    /// Append one query parameter. The key is snake_cased for the wire; the
    /// value is rendered with `ToString` and sent as-is.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((to_snake_case(key), value.to_string()));
        self
    }
}

/// Resolves the requested league set: `None` means all supported leagues,
/// an explicitly empty list is an invalid argument.
pub(crate) fn leagues_or_default(leagues: Option<Vec<League>>) -> Result<Vec<League>, ApiError> {
    match leagues {
        None => Ok(League::ALL.to_vec()),
        Some(leagues) if leagues.is_empty() => Err(ApiError::EmptyLeagues),
        Some(leagues) => Ok(leagues),
    }
}

/// Converts a camelCase parameter name to the snake_case the API expects.
/// Names already in snake_case pass through unchanged.
pub(crate) fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("minimumPasses"), "minimum_passes");
        assert_eq!(to_snake_case("seasonName"), "season_name");
        assert_eq!(to_snake_case("splitByTeams"), "split_by_teams");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("generalPosition"), "general_position");
        assert_eq!(to_snake_case("Leading"), "leading");
    }

    #[test]
    fn test_stat_query_preserves_caller_order() {
        let query = StatQuery::new()
            .param("minimumPasses", 42)
            .param("seasonName", "2021")
            .param("splitByTeams", true);

        let keys: Vec<&str> = query.params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["minimum_passes", "season_name", "split_by_teams"]);
        assert_eq!(query.params[0].1, "42");
        assert_eq!(query.params[2].1, "true");
    }

    #[test]
    fn test_entity_query_accumulates_ids_and_names() {
        let query = EntityQuery::new()
            .ids([1, 2])
            .id("abc")
            .name("Carles Gil")
            .names(vec!["Hany Mukhtar".to_string()]);

        assert_eq!(query.ids, vec!["1", "2", "abc"]);
        assert_eq!(query.names, vec!["Carles Gil", "Hany Mukhtar"]);
        assert!(query.leagues.is_none());
    }

    #[test]
    fn test_leagues_or_default() {
        assert_eq!(leagues_or_default(None).unwrap(), League::ALL.to_vec());
        assert_eq!(
            leagues_or_default(Some(vec![League::Mls])).unwrap(),
            vec![League::Mls]
        );
        assert!(matches!(
            leagues_or_default(Some(Vec::new())).unwrap_err(),
            ApiError::EmptyLeagues
        ));
    }
}
