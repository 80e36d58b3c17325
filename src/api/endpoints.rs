use reqwest::Method;
use std::fmt;

const PUG_INTERFACE: &str = "ITF2Pug";

/// Every operation exposed by the pug API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AddPlayer,
    RemovePlayer,
    CreatePug,
    EndPug,
    ListPugs,
    PugStatus,
    ListPugPlayers,
    AddMapVote,
    ForceMap,
}

impl Endpoint {
    pub const ALL: [Endpoint; 9] = [
        Endpoint::AddPlayer,
        Endpoint::RemovePlayer,
        Endpoint::CreatePug,
        Endpoint::EndPug,
        Endpoint::ListPugs,
        Endpoint::PugStatus,
        Endpoint::ListPugPlayers,
        Endpoint::AddMapVote,
        Endpoint::ForceMap,
    ];

    /// Path relative to the API base, always with a trailing slash.
    pub fn path(&self) -> String {
        let suffix = match self {
            Endpoint::AddPlayer => "Player/Add/",
            Endpoint::RemovePlayer => "Player/Remove/",
            Endpoint::CreatePug => "Create/",
            Endpoint::EndPug => "End/",
            Endpoint::ListPugs => "List/",
            Endpoint::PugStatus => "Status/",
            Endpoint::ListPugPlayers => "Player/List/",
            Endpoint::AddMapVote => "Map/Vote/",
            Endpoint::ForceMap => "Map/Force/",
        };
        format!("{}/{}", PUG_INTERFACE, suffix)
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::ListPugs | Endpoint::PugStatus | Endpoint::ListPugPlayers => Method::GET,
            _ => Method::POST,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
