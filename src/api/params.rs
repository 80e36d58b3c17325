//! Parameter sets for each pug API operation.
//!
//! Every set carries the shared API key under `key`. Optional values are only
//! written when present, so the server never sees an empty `pugid` or `map`.

use super::endpoints::Endpoint;

pub const DEFAULT_PUG_SIZE: u32 = 12;

/// An endpoint together with the form/query parameters to send to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    fn new(endpoint: Endpoint, api_key: &str) -> Self {
        Self {
            endpoint,
            params: vec![("key", api_key.to_string())],
        }
    }

    fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    fn with_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parameter names in insertion order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.params.iter().map(|(k, _)| *k).collect()
    }

    pub fn add_player(
        api_key: &str,
        steam_id: u64,
        name: &str,
        size: u32,
        pug_id: Option<u64>,
    ) -> Self {
        Self::new(Endpoint::AddPlayer, api_key)
            .with("steamid", steam_id)
            .with("name", name)
            .with("size", size)
            .with_opt("pugid", pug_id)
    }

    pub fn remove_player(api_key: &str, steam_id: u64) -> Self {
        Self::new(Endpoint::RemovePlayer, api_key).with("steamid", steam_id)
    }

    /// An empty map name is treated the same as no map.
    pub fn create_pug(
        api_key: &str,
        steam_id: u64,
        name: &str,
        size: u32,
        map: Option<&str>,
    ) -> Self {
        Self::new(Endpoint::CreatePug, api_key)
            .with("steamid", steam_id)
            .with("name", name)
            .with("size", size)
            .with_opt("map", map.filter(|m| !m.is_empty()))
    }

    pub fn end_pug(api_key: &str, pug_id: u64) -> Self {
        Self::new(Endpoint::EndPug, api_key).with("pugid", pug_id)
    }

    pub fn list_pugs(api_key: &str) -> Self {
        Self::new(Endpoint::ListPugs, api_key)
    }

    pub fn pug_status(api_key: &str, pug_id: u64) -> Self {
        Self::new(Endpoint::PugStatus, api_key).with("pugid", pug_id)
    }

    pub fn list_pug_players(api_key: &str, pug_id: u64) -> Self {
        Self::new(Endpoint::ListPugPlayers, api_key).with("pugid", pug_id)
    }

    pub fn add_map_vote(api_key: &str, steam_id: u64, map: &str) -> Self {
        Self::new(Endpoint::AddMapVote, api_key)
            .with("steamid", steam_id)
            .with("map", map)
    }

    pub fn force_map(api_key: &str, pug_id: u64, map: &str) -> Self {
        Self::new(Endpoint::ForceMap, api_key)
            .with("pugid", pug_id)
            .with_opt("map", Some(map).filter(|m| !m.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "123abc";

    fn sorted_keys(request: &ApiRequest) -> Vec<&'static str> {
        let mut keys = request.keys();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_add_player_without_pug_id() {
        let request = ApiRequest::add_player(KEY, 15, "joe", DEFAULT_PUG_SIZE, None);
        assert_eq!(request.endpoint, Endpoint::AddPlayer);
        assert_eq!(sorted_keys(&request), vec!["key", "name", "size", "steamid"]);
        assert!(!request.contains("pugid"));
        assert_eq!(request.get("key"), Some(KEY));
        assert_eq!(request.get("steamid"), Some("15"));
        assert_eq!(request.get("name"), Some("joe"));
        assert_eq!(request.get("size"), Some("12"));
    }

    #[test]
    fn test_add_player_with_pug_id() {
        let request = ApiRequest::add_player(KEY, 15, "joe", 18, Some(0));
        assert_eq!(
            sorted_keys(&request),
            vec!["key", "name", "pugid", "size", "steamid"]
        );
        assert_eq!(request.get("pugid"), Some("0"));
        assert_eq!(request.get("size"), Some("18"));
    }

    #[test]
    fn test_remove_player() {
        let request = ApiRequest::remove_player(KEY, 76561197960265728);
        assert_eq!(sorted_keys(&request), vec!["key", "steamid"]);
        assert_eq!(request.get("steamid"), Some("76561197960265728"));
    }

    #[test]
    fn test_create_pug_map_is_optional() {
        let request = ApiRequest::create_pug(KEY, 1, "starter", 12, None);
        assert_eq!(sorted_keys(&request), vec!["key", "name", "size", "steamid"]);

        let request = ApiRequest::create_pug(KEY, 1, "starter", 12, Some(""));
        assert!(!request.contains("map"));

        let request = ApiRequest::create_pug(KEY, 1, "starter", 12, Some("cp_badlands"));
        assert_eq!(
            sorted_keys(&request),
            vec!["key", "map", "name", "size", "steamid"]
        );
        assert_eq!(request.get("map"), Some("cp_badlands"));
    }

    #[test]
    fn test_pug_id_operations() {
        for request in [
            ApiRequest::end_pug(KEY, 7),
            ApiRequest::pug_status(KEY, 7),
            ApiRequest::list_pug_players(KEY, 7),
        ] {
            assert_eq!(sorted_keys(&request), vec!["key", "pugid"]);
            assert_eq!(request.get("pugid"), Some("7"));
        }
    }

    #[test]
    fn test_list_pugs_only_sends_key() {
        let request = ApiRequest::list_pugs(KEY);
        assert_eq!(request.params(), &[("key", KEY.to_string())]);
    }

    #[test]
    fn test_add_map_vote() {
        let request = ApiRequest::add_map_vote(KEY, 3, "cp_granary");
        assert_eq!(sorted_keys(&request), vec!["key", "map", "steamid"]);
        assert_eq!(request.get("map"), Some("cp_granary"));
    }

    #[test]
    fn test_force_map_empty_map_is_omitted() {
        let request = ApiRequest::force_map(KEY, 2, "");
        assert_eq!(sorted_keys(&request), vec!["key", "pugid"]);

        let request = ApiRequest::force_map(KEY, 2, "cp_granary");
        assert_eq!(sorted_keys(&request), vec!["key", "map", "pugid"]);
    }

    #[test]
    fn test_key_is_always_first() {
        let requests = [
            ApiRequest::add_player(KEY, 1, "a", 12, None),
            ApiRequest::remove_player(KEY, 1),
            ApiRequest::create_pug(KEY, 1, "a", 12, None),
            ApiRequest::end_pug(KEY, 1),
            ApiRequest::list_pugs(KEY),
            ApiRequest::pug_status(KEY, 1),
            ApiRequest::list_pug_players(KEY, 1),
            ApiRequest::add_map_vote(KEY, 1, "m"),
            ApiRequest::force_map(KEY, 1, "m"),
        ];
        let endpoints: Vec<Endpoint> = requests.iter().map(|r| r.endpoint).collect();
        assert_eq!(endpoints, Endpoint::ALL.to_vec());
        for request in &requests {
            assert_eq!(request.keys()[0], "key");
        }
    }
}
