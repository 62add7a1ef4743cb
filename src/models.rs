//! Wire-level vocabulary of the API: leagues, entity types and raw records

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A raw API record. The API returns heterogeneous objects per endpoint and
/// the client passes them through untouched; only the `{type}_name` and
/// `{type}_id` fields are ever inspected, for name resolution.
pub type EntityRecord = serde_json::Map<String, serde_json::Value>;

/// One of the competitions covered by the API.
///
/// The variant order here is the order requests fan out in when no leagues
/// are given explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nwsl,
    Mls,
    Uslc,
    Usl1,
    Nasl,
}

impl League {
    /// Every supported league, in default fan-out order
    pub const ALL: [League; 5] = [
        League::Nwsl,
        League::Mls,
        League::Uslc,
        League::Usl1,
        League::Nasl,
    ];

    /// The league code as it appears in the URL path
    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nwsl => "nwsl",
            League::Mls => "mls",
            League::Uslc => "uslc",
            League::Usl1 => "usl1",
            League::Nasl => "nasl",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nwsl" => Ok(League::Nwsl),
            "mls" => Ok(League::Mls),
            "uslc" => Ok(League::Uslc),
            "usl1" => Ok(League::Usl1),
            "nasl" => Ok(League::Nasl),
            _ => Err(ApiError::UnknownLeague {
                value: s.to_string(),
            }),
        }
    }
}

/// Category of primary resource the API serves.
///
/// The variant determines the plural URL path segment, the display-name
/// field used for fuzzy matching and the identifier field used for
/// filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Player,
    Manager,
    Stadium,
    Referee,
    Team,
}

impl EntityType {
    /// Every entity type the API serves
    pub const ALL: [EntityType; 5] = [
        EntityType::Player,
        EntityType::Manager,
        EntityType::Stadium,
        EntityType::Referee,
        EntityType::Team,
    ];

    /// Singular tag, e.g. `player`
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Player => "player",
            EntityType::Manager => "manager",
            EntityType::Stadium => "stadium",
            EntityType::Referee => "referee",
            EntityType::Team => "team",
        }
    }

    /// Pluralized URL path segment, e.g. `players`
    pub fn path(&self) -> &'static str {
        match self {
            EntityType::Player => "players",
            EntityType::Manager => "managers",
            EntityType::Stadium => "stadiums",
            EntityType::Referee => "referees",
            EntityType::Team => "teams",
        }
    }

    /// Field holding the display name used for fuzzy matching
    pub fn name_field(&self) -> &'static str {
        match self {
            EntityType::Player => "player_name",
            EntityType::Manager => "manager_name",
            EntityType::Stadium => "stadium_name",
            EntityType::Referee => "referee_name",
            EntityType::Team => "team_name",
        }
    }

    /// Field holding the identifier, also the filter parameter name
    pub fn id_field(&self) -> &'static str {
        match self {
            EntityType::Player => "player_id",
            EntityType::Manager => "manager_id",
            EntityType::Stadium => "stadium_id",
            EntityType::Referee => "referee_id",
            EntityType::Team => "team_id",
        }
    }

    /// Dense index for per-type storage like the entity cache
    pub(crate) fn index(&self) -> usize {
        match self {
            EntityType::Player => 0,
            EntityType::Manager => 1,
            EntityType::Stadium => 2,
            EntityType::Referee => 3,
            EntityType::Team => 4,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "player" => Ok(EntityType::Player),
            "manager" => Ok(EntityType::Manager),
            "stadium" => Ok(EntityType::Stadium),
            "referee" => Ok(EntityType::Referee),
            "team" => Ok(EntityType::Team),
            _ => Err(ApiError::UnknownEntityType {
                value: s.to_string(),
            }),
        }
    }
}

/// Renders a record's identifier value for the comma-joined filter
/// parameter. Identifiers arrive as JSON strings or numbers; anything else
/// is not an identifier.
pub(crate) fn identifier_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_codes_match_fanout_order() {
        let codes: Vec<&str> = League::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(codes, vec!["nwsl", "mls", "uslc", "usl1", "nasl"]);
    }

    #[test]
    fn test_league_from_str() {
        assert_eq!("mls".parse::<League>().unwrap(), League::Mls);
        assert_eq!("NWSL".parse::<League>().unwrap(), League::Nwsl);

        let err = "epl".parse::<League>().unwrap_err();
        assert!(matches!(err, ApiError::UnknownLeague { ref value } if value == "epl"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_entity_type_from_str() {
        assert_eq!("player".parse::<EntityType>().unwrap(), EntityType::Player);
        assert_eq!("Team".parse::<EntityType>().unwrap(), EntityType::Team);

        let err = "coach".parse::<EntityType>().unwrap_err();
        assert!(matches!(err, ApiError::UnknownEntityType { ref value } if value == "coach"));
    }

    #[test]
    fn test_entity_type_fields() {
        assert_eq!(EntityType::Player.path(), "players");
        assert_eq!(EntityType::Player.name_field(), "player_name");
        assert_eq!(EntityType::Player.id_field(), "player_id");
        assert_eq!(EntityType::Stadium.path(), "stadiums");
        assert_eq!(EntityType::Referee.id_field(), "referee_id");
    }

    #[test]
    fn test_entity_type_indexes_are_dense() {
        let mut seen = [false; 5];
        for entity in EntityType::ALL {
            let idx = entity.index();
            assert!(!seen[idx], "duplicate index for {entity}");
            seen[idx] = true;
        }
    }

    #[test]
    fn test_identifier_string() {
        assert_eq!(
            identifier_string(&serde_json::json!("abc123")),
            Some("abc123".to_string())
        );
        assert_eq!(
            identifier_string(&serde_json::json!(42)),
            Some("42".to_string())
        );
        assert_eq!(identifier_string(&serde_json::json!(null)), None);
        assert_eq!(identifier_string(&serde_json::json!(["x"])), None);
    }

    #[test]
    fn test_league_serde_round_trip() {
        let json = serde_json::to_string(&League::Usl1).unwrap();
        assert_eq!(json, "\"usl1\"");
        let league: League = serde_json::from_str(&json).unwrap();
        assert_eq!(league, League::Usl1);
    }
}
