use crate::api::models::{ApiResult, MapVoteCount, Payload, Player, Pug};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use log::warn;
use serde_json::Value;

const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub struct TableDisplay {
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn colored_cell(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn new_table(&self, headers: &[&str], color: Color) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        let cells: Vec<Cell> = headers.iter().map(|h| self.bold_header(h, color)).collect();
        table.set_header(cells);
        table
    }

    pub fn render_pug_list(&self, pugs: &[Pug]) -> String {
        if pugs.is_empty() {
            return "No pugs running.".to_string();
        }

        let mut table = self.new_table(
            &["ID", "State", "Map", "Players", "Admin", "Server"],
            Color::Cyan,
        );

        for pug in pugs {
            let map = match (&pug.map, pug.map_forced) {
                (Some(map), true) => format!("{} (forced)", map),
                (Some(map), false) => map.clone(),
                (None, _) => "-".to_string(),
            };
            let server = pug
                .server
                .as_ref()
                .map(|s| format!("{}:{}", s.ip, s.port))
                .unwrap_or_else(|| "-".to_string());
            let admin = pug
                .admin
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let players = format!("{}/{}", pug.player_count(), pug.size);

            table.add_row(vec![
                self.colored_cell(&pug.id.to_string(), Color::Cyan),
                Cell::new(&pug.named_state),
                Cell::new(map),
                if pug.is_full() {
                    self.colored_cell(&players, Color::Red)
                } else {
                    Cell::new(players)
                },
                Cell::new(admin),
                self.colored_cell(&server, Color::DarkGrey),
            ]);
        }

        table.to_string()
    }

    pub fn render_player_list(&self, players: &[Player]) -> String {
        if players.is_empty() {
            return "No players.".to_string();
        }

        let mut table = self.new_table(&["Steam ID", "Name"], Color::Green);
        for player in players {
            table.add_row(vec![
                self.colored_cell(&player.id.to_string(), Color::Green),
                Cell::new(&player.name),
            ]);
        }
        table.to_string()
    }

    pub fn render_map_votes(&self, counts: &[MapVoteCount]) -> String {
        let mut table = self.new_table(&["Map", "Votes"], Color::Yellow);
        for count in counts {
            table.add_row(vec![Cell::new(&count.map), Cell::new(count.count)]);
        }
        table.to_string()
    }

    /// Full status of one pug: summary, players and, while voting, the map tally.
    pub fn render_pug(&self, pug: &Pug) -> String {
        let mut output = self.render_pug_list(std::slice::from_ref(pug));

        if !pug.players.is_empty() {
            output.push('\n');
            output.push_str(&self.render_player_list(&pug.players));
        }

        if !pug.map_vote_counts.is_empty() {
            output.push('\n');
            output.push_str(&self.render_map_votes(&pug.map_vote_counts));
        }

        if let Some(deadline) = pug.map_vote_deadline() {
            output.push_str(&format!(
                "\nMap vote ends: {}",
                deadline.format(DEADLINE_FORMAT)
            ));
        }

        output
    }

    /// Human readable rendering of any envelope. Payloads that do not match
    /// their response code are shown as raw JSON.
    pub fn render_result(&self, result: &ApiResult) -> String {
        let headline = format!("Response: {}", result.code());
        let payload = match result.payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("{}", e);
                let raw = Value::Object(result.data().clone());
                return format!("{}\n{:#}", headline, raw);
            }
        };

        let body = match &payload {
            Payload::PugListing { pugs } => Some(self.render_pug_list(pugs)),
            Payload::PlayerList { players } => Some(self.render_player_list(players)),
            Payload::PugEnded { id } => Some(format!("Pug {} ended.", id)),
            other => other.pug().map(|pug| self.render_pug(pug)),
        };

        match body {
            Some(body) => format!("{}\n{}", headline, body),
            None => headline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_pug(players: usize, size: u32) -> Pug {
        let players: Vec<_> = (0..players)
            .map(|i| json!({ "id": 100 + i, "name": format!("player{}", i) }))
            .collect();
        serde_json::from_value(json!({
            "id": 3,
            "size": size,
            "state": 0,
            "named_state": "GATHERING_PLAYERS",
            "map": "cp_badlands",
            "map_forced": true,
            "admin": 100,
            "players": players,
            "map_vote_counts": [{ "map": "cp_granary", "count": 1 }],
            "map_vote_end": 0
        }))
        .expect("sample pug")
    }

    fn plain() -> TableDisplay {
        TableDisplay::new().with_colors(false)
    }

    #[test]
    fn test_render_empty_lists() {
        assert_eq!(plain().render_pug_list(&[]), "No pugs running.");
        assert_eq!(plain().render_player_list(&[]), "No players.");
    }

    #[test]
    fn test_render_pug_list() {
        let output = plain().render_pug_list(&[sample_pug(2, 12)]);
        assert!(output.contains("GATHERING_PLAYERS"));
        assert!(output.contains("cp_badlands (forced)"));
        assert!(output.contains("2/12"));
    }

    #[test]
    fn test_render_pug_details() {
        let output = plain().render_pug(&sample_pug(2, 12));
        assert!(output.contains("player1"));
        assert!(output.contains("cp_granary"));
        assert!(output.contains("Map vote ends: 1970-01-01 00:00:00 UTC"));
    }

    #[test]
    fn test_render_result_headline_only() {
        let result = ApiResult::from_body(r#"{"response": 1005}"#, "ITF2Pug/Player/Add/")
            .expect("valid body");
        let output = plain().render_result(&result);
        assert_eq!(output, "Response: PugFull (1005)");
    }

    #[test]
    fn test_render_result_with_pug() {
        let body = json!({ "response": 1003, "pug": sample_pug(1, 12) }).to_string();
        let result = ApiResult::from_body(&body, "ITF2Pug/Create/").expect("valid body");
        let output = plain().render_result(&result);
        assert!(output.starts_with("Response: PugCreated (1003)\n"));
        assert!(output.contains("player0"));
    }

    #[test]
    fn test_render_result_bad_payload_falls_back_to_json() {
        let result = ApiResult::from_body(r#"{"response": 1000, "pugs": "soon"}"#, "ITF2Pug/List/")
            .expect("valid body");
        let output = plain().render_result(&result);
        assert!(output.starts_with("Response: PugListing (1000)\n"));
        assert!(output.contains("\"pugs\": \"soon\""));
    }
}
