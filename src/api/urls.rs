//! URL building utilities for API endpoints

use crate::models::{EntityType, League};

/// Builds an entity-list URL for one league, optionally filtered to a set of
/// identifiers. The filter parameter is named after the entity's identifier
/// field and carries comma-separated values.
///
/// # Arguments
/// * `api_base` - Versioned API root, e.g. `https://app.americansocceranalysis.com/api/v1`
/// * `league` - League path segment
/// * `entity` - Entity type whose pluralized path is requested
/// * `id_filter` - Pre-joined identifier list, or `None` for all records
///
/// # Example
/// ```
/// use asa_client::api::build_entity_url;
/// use asa_client::{EntityType, League};
///
/// let url = build_entity_url("https://api.example.com/v1", League::Mls, EntityType::Player, None);
/// assert_eq!(url, "https://api.example.com/v1/mls/players");
///
/// let url = build_entity_url(
///     "https://api.example.com/v1",
///     League::Nwsl,
///     EntityType::Team,
///     Some("a1,b2"),
/// );
/// assert_eq!(url, "https://api.example.com/v1/nwsl/teams?team_id=a1,b2");
/// ```
pub fn build_entity_url(
    api_base: &str,
    league: League,
    entity: EntityType,
    id_filter: Option<&str>,
) -> String {
    let path = entity.path();
    match id_filter {
        Some(ids) => format!(
            "{api_base}/{league}/{path}?{id_field}={ids}",
            id_field = entity.id_field()
        ),
        None => format!("{api_base}/{league}/{path}"),
    }
}

/// Builds a statistics URL for one league from a fixed path fragment and an
/// ordered list of already snake_cased query parameters.
///
/// # Example
/// ```
/// use asa_client::api::build_stat_url;
/// use asa_client::League;
///
/// let params = vec![
///     ("minimum_passes".to_string(), "42".to_string()),
///     ("season_name".to_string(), "2021".to_string()),
/// ];
/// let url = build_stat_url("https://api.example.com/v1", League::Mls, "players/xpass", &params);
/// assert_eq!(
///     url,
///     "https://api.example.com/v1/mls/players/xpass?minimum_passes=42&season_name=2021"
/// );
///
/// let url = build_stat_url("https://api.example.com/v1", League::Mls, "games/xgoals", &[]);
/// assert_eq!(url, "https://api.example.com/v1/mls/games/xgoals");
/// ```
pub fn build_stat_url(
    api_base: &str,
    league: League,
    stat_path: &str,
    params: &[(String, String)],
) -> String {
    let mut url = format!("{api_base}/{league}/{stat_path}");
    for (i, (key, value)) in params.iter().enumerate() {
        let separator = if i == 0 { '?' } else { '&' };
        url.push(separator);
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_url_without_filter() {
        let url = build_entity_url("http://base/v1", League::Uslc, EntityType::Referee, None);
        assert_eq!(url, "http://base/v1/uslc/referees");
    }

    #[test]
    fn test_entity_url_with_filter() {
        let url = build_entity_url(
            "http://base/v1",
            League::Mls,
            EntityType::Player,
            Some("xyz,1,2"),
        );
        assert_eq!(url, "http://base/v1/mls/players?player_id=xyz,1,2");
    }

    #[test]
    fn test_stat_url_preserves_parameter_order() {
        let params = vec![
            ("zed".to_string(), "1".to_string()),
            ("alpha".to_string(), "2".to_string()),
            ("mid".to_string(), "3".to_string()),
        ];
        let url = build_stat_url("http://base/v1", League::Nasl, "teams/xgoals", &params);
        assert_eq!(url, "http://base/v1/nasl/teams/xgoals?zed=1&alpha=2&mid=3");
    }
}
