use crate::model::{ReportError, Result};
use indexmap::IndexMap;
use serde_json::{from_str, Value};
use std::fs;

const DEFAULT_TERMINAL_STATES: [&str; 3] = ["Done", "Closed", "Canceled"];

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Unit {
    pub name: String,
    pub team_id: String,
    pub board_id: String,
    pub component: Option<String>,
    pub terminal_states: Vec<String>,
}

// Create
impl Unit {
    pub fn from_config(path: &str) -> Result<Vec<Self>> {
        let json_str = fs::read_to_string(path)?;
        Self::parse(&json_str)
    }

    fn new(
        name: impl ToString,
        team_id: impl ToString,
        board_id: impl ToString,
        component: Option<String>,
        terminal_states: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            team_id: team_id.to_string(),
            board_id: board_id.to_string(),
            component,
            terminal_states,
        }
    }
}

// Parser
impl Unit {
    fn parse(json_str: &str) -> Result<Vec<Self>> {
        let elements: IndexMap<String, Value> = from_str(json_str)?;
        let mut result = Vec::new();
        for (name, details) in elements {
            let Some(team_id) = details["teamId"].as_str() else {
                return Err(ReportError::Config(format!(
                    "Not found 'teamId' field for unit `{name}`"
                )));
            };
            let Some(board_id) = details["boardId"].as_str() else {
                return Err(ReportError::Config(format!(
                    "Not found 'boardId' field for unit `{name}`"
                )));
            };
            let component = details["component"].as_str().map(String::from);
            let terminal_states = match details["terminalStates"].as_array() {
                Some(states) => states
                    .iter()
                    .filter_map(|state| state.as_str().map(String::from))
                    .collect(),
                None => DEFAULT_TERMINAL_STATES
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            };
            let new = Self::new(name, team_id, board_id, component, terminal_states);
            result.push(new);
        }
        Ok(result)
    }
}
