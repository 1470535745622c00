//! Normalising API responses into [`Table`]s.
//!
//! The API answers in three shapes:
//!
//! - `resultSets` (or `resultSet`): named `headers` + `rowSet` tables
//! - nested box scores: `boxScore*` → `homeTeam`/`awayTeam` → `players` →
//!   `statistics`, flattened to one row per player
//! - the league schedule: `leagueSchedule.gameDates[].games[]`, flattened
//!   to one row per game with `_`-joined keys

use serde::Deserialize;
use serde_json::{Map, Value};

use courtside_core::Table;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

/// Text form of one JSON cell. Null becomes an empty cell.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// The result set called `name`.
pub fn result_set(body: &Value, name: &str) -> Result<Table, ApiError> {
    let sets = match (body.get("resultSets"), body.get("resultSet")) {
        (Some(Value::Array(sets)), _) | (None, Some(Value::Array(sets))) => sets.clone(),
        (Some(set @ Value::Object(_)), _) | (None, Some(set @ Value::Object(_))) => vec![set.clone()],
        _ => return Err(ApiError::shape("no resultSets in response")),
    };

    for raw in sets {
        let set: ResultSet = serde_json::from_value(raw)?;
        if set.name == name {
            let rows = set
                .row_set
                .iter()
                .map(|row| row.iter().map(cell_text).collect())
                .collect();
            return Ok(Table::from_rows(set.headers, rows)?);
        }
    }
    Err(ApiError::MissingResultSet(name.to_string()))
}

/// Build a table from loosely-shaped records. Columns appear in first-seen
/// order; a record without a column gets an empty cell.
pub fn records_to_table(records: Vec<Vec<(String, String)>>) -> Result<Table, ApiError> {
    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for (key, _) in record {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .into_iter()
        .map(|record| {
            let mut row = vec![String::new(); headers.len()];
            for (key, value) in record {
                if let Some(idx) = headers.iter().position(|h| *h == key) {
                    row[idx] = value;
                }
            }
            row
        })
        .collect();
    Ok(Table::from_rows(headers, rows)?)
}

fn scalars(object: &Map<String, Value>, skip: &[&str], out: &mut Vec<(String, String)>) {
    for (key, value) in object {
        if skip.contains(&key.as_str()) || value.is_object() || value.is_array() {
            continue;
        }
        out.push((key.clone(), cell_text(value)));
    }
}

/// One row per player from a nested `boxScore*` payload.
pub fn nested_boxscore(body: &Value) -> Result<Table, ApiError> {
    let root = body
        .as_object()
        .and_then(|o| {
            o.iter()
                .find(|(k, v)| k.starts_with("boxScore") && v.is_object())
                .map(|(_, v)| v)
        })
        .ok_or_else(|| ApiError::shape("no boxScore object in response"))?;

    let game_id = root.get("gameId").map(cell_text).unwrap_or_default();
    let mut records = Vec::new();

    for side in ["homeTeam", "awayTeam"] {
        let Some(team) = root.get(side).and_then(Value::as_object) else {
            continue;
        };
        let players = team
            .get("players")
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::shape(format!("{side} has no players")))?;

        for player in players {
            let Some(player) = player.as_object() else {
                continue;
            };
            let mut record = vec![("gameId".to_string(), game_id.clone())];
            scalars(team, &["players"], &mut record);
            scalars(player, &["statistics"], &mut record);
            if let Some(stats) = player.get("statistics").and_then(Value::as_object) {
                scalars(stats, &[], &mut record);
            }
            records.push(record);
        }
    }

    records_to_table(records)
}

fn flatten_into(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    let key = |k: &str| {
        if prefix.is_empty() {
            k.to_string()
        } else {
            format!("{prefix}_{k}")
        }
    };
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                flatten_into(&key(k), v, out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_into(&key(&i.to_string()), v, out);
            }
        }
        scalar => out.push((prefix.to_string(), cell_text(scalar))),
    }
}

/// One row per game from a `leagueSchedule` payload.
pub fn schedule(body: &Value) -> Result<Table, ApiError> {
    let league = body
        .get("leagueSchedule")
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::shape("no leagueSchedule in response"))?;
    let dates = league
        .get("gameDates")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::shape("leagueSchedule has no gameDates"))?;

    let mut header = Vec::new();
    scalars(league, &[], &mut header);

    let mut records = Vec::new();
    for date in dates {
        let games = date.get("games").and_then(Value::as_array);
        for game in games.into_iter().flatten() {
            let mut record = header.clone();
            if let Some(day) = date.as_object() {
                scalars(day, &[], &mut record);
            }
            let mut fields = Vec::new();
            flatten_into("", game, &mut fields);
            // Game fields win over same-named date fields.
            record.retain(|(k, _)| !fields.iter().any(|(f, _)| f == k));
            record.extend(fields);
            records.push(record);
        }
    }

    records_to_table(records)
}
