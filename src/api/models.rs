use crate::error::ApiError;
use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Response codes sent by the pug API in the `response` field.
///
/// Several responses carry the same data under different codes, so the code
/// is what tells a caller which action actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    /// No `response` field was present.
    #[default]
    None,

    PugListing,
    PugStatus,
    InvalidPug,
    PugCreated,
    PugEnded,
    PugFull,
    EmptyPugEnded,

    PlayerList,
    PlayerInPug,
    PlayerNotInPug,
    PlayerAdded,
    PlayerRemoved,

    MapVoteAdded,
    MapForced,
    MapNotForced,
    MapVoteNotInProgress,
    InvalidMap,

    NoAvailableServers,
    ServerConnectionError,
}

impl ResponseCode {
    pub fn code(&self) -> i64 {
        match self {
            ResponseCode::None => 0,
            ResponseCode::PugListing => 1000,
            ResponseCode::PugStatus => 1001,
            ResponseCode::InvalidPug => 1002,
            ResponseCode::PugCreated => 1003,
            ResponseCode::PugEnded => 1004,
            ResponseCode::PugFull => 1005,
            ResponseCode::EmptyPugEnded => 1006,
            ResponseCode::PlayerList => 1100,
            ResponseCode::PlayerInPug => 1101,
            ResponseCode::PlayerNotInPug => 1102,
            ResponseCode::PlayerAdded => 1103,
            ResponseCode::PlayerRemoved => 1104,
            ResponseCode::MapVoteAdded => 1200,
            ResponseCode::MapForced => 1201,
            ResponseCode::MapNotForced => 1202,
            ResponseCode::MapVoteNotInProgress => 1203,
            ResponseCode::InvalidMap => 1204,
            ResponseCode::NoAvailableServers => 1300,
            ResponseCode::ServerConnectionError => 1301,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        let response = match code {
            0 => ResponseCode::None,
            1000 => ResponseCode::PugListing,
            1001 => ResponseCode::PugStatus,
            1002 => ResponseCode::InvalidPug,
            1003 => ResponseCode::PugCreated,
            1004 => ResponseCode::PugEnded,
            1005 => ResponseCode::PugFull,
            1006 => ResponseCode::EmptyPugEnded,
            1100 => ResponseCode::PlayerList,
            1101 => ResponseCode::PlayerInPug,
            1102 => ResponseCode::PlayerNotInPug,
            1103 => ResponseCode::PlayerAdded,
            1104 => ResponseCode::PlayerRemoved,
            1200 => ResponseCode::MapVoteAdded,
            1201 => ResponseCode::MapForced,
            1202 => ResponseCode::MapNotForced,
            1203 => ResponseCode::MapVoteNotInProgress,
            1204 => ResponseCode::InvalidMap,
            1300 => ResponseCode::NoAvailableServers,
            1301 => ResponseCode::ServerConnectionError,
            _ => return None,
        };
        Some(response)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResponseCode::None => "None",
            ResponseCode::PugListing => "PugListing",
            ResponseCode::PugStatus => "PugStatus",
            ResponseCode::InvalidPug => "InvalidPug",
            ResponseCode::PugCreated => "PugCreated",
            ResponseCode::PugEnded => "PugEnded",
            ResponseCode::PugFull => "PugFull",
            ResponseCode::EmptyPugEnded => "EmptyPugEnded",
            ResponseCode::PlayerList => "PlayerList",
            ResponseCode::PlayerInPug => "PlayerInPug",
            ResponseCode::PlayerNotInPug => "PlayerNotInPug",
            ResponseCode::PlayerAdded => "PlayerAdded",
            ResponseCode::PlayerRemoved => "PlayerRemoved",
            ResponseCode::MapVoteAdded => "MapVoteAdded",
            ResponseCode::MapForced => "MapForced",
            ResponseCode::MapNotForced => "MapNotForced",
            ResponseCode::MapVoteNotInProgress => "MapVoteNotInProgress",
            ResponseCode::InvalidMap => "InvalidMap",
            ResponseCode::NoAvailableServers => "NoAvailableServers",
            ResponseCode::ServerConnectionError => "ServerConnectionError",
        }
    }

    /// Codes with which the server refuses the requested action.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ResponseCode::None
                | ResponseCode::InvalidPug
                | ResponseCode::PugFull
                | ResponseCode::PlayerInPug
                | ResponseCode::PlayerNotInPug
                | ResponseCode::MapNotForced
                | ResponseCode::MapVoteNotInProgress
                | ResponseCode::InvalidMap
                | ResponseCode::NoAvailableServers
                | ResponseCode::ServerConnectionError
        )
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Decoded response body paired with its response code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiResult {
    code: ResponseCode,
    data: Map<String, Value>,
}

impl ApiResult {
    /// The envelope used when no usable response was received.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an envelope from a JSON object, deriving the code from `response`.
    pub fn from_map(data: Map<String, Value>, endpoint: &str) -> Result<Self, ApiError> {
        let code = match data.get("response") {
            None => ResponseCode::None,
            Some(value) => {
                let raw = value.as_i64().ok_or_else(|| ApiError::Decode {
                    endpoint: endpoint.to_string(),
                    message: format!("'response' is not an integer: {}", value),
                })?;
                ResponseCode::from_code(raw).ok_or_else(|| ApiError::UnknownResponseCode {
                    code: raw,
                    endpoint: endpoint.to_string(),
                })?
            }
        };

        Ok(Self { code, data })
    }

    /// Parse a raw response body. Anything other than a JSON object is a decode error.
    pub fn from_body(body: &str, endpoint: &str) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_str(body).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        match value {
            Value::Object(map) => Self::from_map(map, endpoint),
            other => Err(ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
        }
    }

    /// Collapse any failure into the empty envelope, logging the cause.
    ///
    /// For callers that only ever branch on the response code and treat a
    /// failed request the same as a `None` response.
    pub fn or_empty(outcome: Result<ApiResult, ApiError>) -> ApiResult {
        match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!("pug API call failed, using empty result: {}", e);
                ApiResult::empty()
            }
        }
    }

    pub fn code(&self) -> ResponseCode {
        self.code
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T, ApiError> {
        let value = self.data.get(key).ok_or_else(|| ApiError::Payload {
            code: self.code.name().to_string(),
            message: format!("missing '{}'", key),
        })?;
        serde_json::from_value(value.clone()).map_err(|e| ApiError::Payload {
            code: self.code.name().to_string(),
            message: format!("invalid '{}': {}", key, e),
        })
    }

    /// Typed view of the payload for this envelope's response code.
    pub fn payload(&self) -> Result<Payload, ApiError> {
        let payload = match self.code {
            ResponseCode::None => Payload::None,
            ResponseCode::PugListing => Payload::PugListing {
                pugs: self.field("pugs")?,
            },
            ResponseCode::PugStatus => Payload::PugStatus(self.field("pug")?),
            ResponseCode::InvalidPug => Payload::InvalidPug,
            ResponseCode::PugCreated => Payload::PugCreated(self.field("pug")?),
            ResponseCode::PugEnded => Payload::PugEnded {
                id: self.field("id")?,
            },
            ResponseCode::PugFull => Payload::PugFull,
            ResponseCode::EmptyPugEnded => Payload::EmptyPugEnded,
            ResponseCode::PlayerList => Payload::PlayerList {
                players: self.field("players")?,
            },
            ResponseCode::PlayerInPug => Payload::PlayerInPug,
            ResponseCode::PlayerNotInPug => Payload::PlayerNotInPug,
            ResponseCode::PlayerAdded => Payload::PlayerAdded(self.field("pug")?),
            ResponseCode::PlayerRemoved => Payload::PlayerRemoved(self.field("pug")?),
            ResponseCode::MapVoteAdded => Payload::MapVoteAdded(self.field("pug")?),
            ResponseCode::MapForced => Payload::MapForced(self.field("pug")?),
            ResponseCode::MapNotForced => Payload::MapNotForced,
            ResponseCode::MapVoteNotInProgress => Payload::MapVoteNotInProgress,
            ResponseCode::InvalidMap => Payload::InvalidMap,
            ResponseCode::NoAvailableServers => Payload::NoAvailableServers,
            ResponseCode::ServerConnectionError => Payload::ServerConnectionError,
        };
        Ok(payload)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Response data keyed by response code.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    PugListing { pugs: Vec<Pug> },
    PugStatus(Pug),
    InvalidPug,
    PugCreated(Pug),
    PugEnded { id: u64 },
    PugFull,
    EmptyPugEnded,
    PlayerList { players: Vec<Player> },
    PlayerInPug,
    PlayerNotInPug,
    PlayerAdded(Pug),
    PlayerRemoved(Pug),
    MapVoteAdded(Pug),
    MapForced(Pug),
    MapNotForced,
    MapVoteNotInProgress,
    InvalidMap,
    NoAvailableServers,
    ServerConnectionError,
}

impl Payload {
    /// The pug carried by this payload, if any.
    pub fn pug(&self) -> Option<&Pug> {
        match self {
            Payload::PugStatus(pug)
            | Payload::PugCreated(pug)
            | Payload::PlayerAdded(pug)
            | Payload::PlayerRemoved(pug)
            | Payload::MapVoteAdded(pug)
            | Payload::MapForced(pug) => Some(pug),
            _ => None,
        }
    }
}

/// The server uses -1 (and sometimes null) for "not set".
fn deserialize_unset<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.filter(|v| *v >= 0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PugState {
    GatheringPlayers,
    MapVoting,
    MapVoteCompleted,
    GameStarted,
    GameOver,
}

impl PugState {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PugState::GatheringPlayers),
            1 => Some(PugState::MapVoting),
            2 => Some(PugState::MapVoteCompleted),
            3 => Some(PugState::GameStarted),
            4 => Some(PugState::GameOver),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pug {
    pub id: u64,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub state: u8,
    #[serde(default)]
    pub named_state: String,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub map_forced: bool,
    #[serde(default)]
    pub admin: Option<u64>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub map_vote_counts: Vec<MapVoteCount>,
    #[serde(default)]
    pub player_votes: Vec<PlayerVote>,
    #[serde(default, deserialize_with = "deserialize_unset")]
    pub map_vote_start: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_unset")]
    pub map_vote_end: Option<i64>,
    #[serde(default)]
    pub maps: Vec<String>,
    #[serde(default)]
    pub server: Option<GameServer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pug {
    pub fn lifecycle(&self) -> Option<PugState> {
        PugState::from_code(self.state)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.size > 0 && self.players.len() >= self.size as usize
    }

    /// When the current map vote closes.
    pub fn map_vote_deadline(&self) -> Option<DateTime<Utc>> {
        self.map_vote_end
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Vote count for a map; maps nobody voted for count zero.
    pub fn votes_for(&self, map: &str) -> u32 {
        self.map_vote_counts
            .iter()
            .find(|c| c.map == map)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub name: String,
    /// Per-player stats the server merges into the entry (rating, games played, ...).
    #[serde(flatten)]
    pub stats: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapVoteCount {
    pub map: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerVote {
    pub id: u64,
    pub map: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameServer {
    pub name: String,
    #[serde(default)]
    pub anticheat: Option<String>,
    pub ip: String,
    pub port: u16,
}
