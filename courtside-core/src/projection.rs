//! Column selection, renaming and casting applied to raw tables before they
//! are loaded into the warehouse.

use crate::category::BoxscoreCategory;
use crate::error::TableError;
use crate::minutes::parse_minutes;
use crate::season::Season;
use crate::table::Table;

/// Target type of a projected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    /// Colon-delimited minutes converted to fractional minutes.
    Minutes,
}

/// Floats in `[-2^63, 2^63)` convert to `i64` without saturating.
const I64_LOWER: f64 = i64::MIN as f64;
const I64_UPPER: f64 = -(i64::MIN as f64);

impl ColumnKind {
    /// Cast one cell. Values that do not parse become an empty (null) cell.
    pub fn cast(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self {
            Self::Text => raw.to_string(),
            Self::Integer => {
                if let Ok(v) = trimmed.parse::<i64>() {
                    return v.to_string();
                }
                match trimmed.parse::<f64>() {
                    Ok(v) if v.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&v) => {
                        (v as i64).to_string()
                    }
                    _ => String::new(),
                }
            }
            Self::Float => match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => v.to_string(),
                _ => String::new(),
            },
            Self::Minutes => parse_minutes(Some(trimmed)).to_string(),
        }
    }
}

/// One output column: where it comes from, what it is called, what it holds.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub source: &'static str,
    pub target: &'static str,
    pub kind: ColumnKind,
}

const fn keep(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        source: name,
        target: name,
        kind,
    }
}

const fn rename(source: &'static str, target: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        source,
        target,
        kind,
    }
}

/// Keep only rows whose `column` equals `equals`.
#[derive(Debug, Clone, Copy)]
pub struct RowFilter {
    pub column: &'static str,
    pub equals: &'static str,
}

/// The raw, consolidated table a projection reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTable {
    Players,
    Teams,
    Boxscore(BoxscoreCategory),
    Schedule,
}

impl RawTable {
    /// File name of the consolidated output for `season`.
    pub fn file_name(&self, season: &Season) -> String {
        match self {
            Self::Players => format!("all_players_{season}.csv"),
            Self::Teams => format!("all_teams_{season}.csv"),
            Self::Boxscore(category) => {
                format!("boxscore_{}_final_{season}.csv", category.short_name())
            }
            Self::Schedule => format!("nba_schedule_{season}.csv"),
        }
    }
}

/// Filter + select + rename + cast for one warehouse table.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Warehouse table stem, e.g. `ADVANCED`.
    pub name: &'static str,
    pub raw: RawTable,
    pub filter: Option<RowFilter>,
    pub columns: &'static [ColumnSpec],
}

impl Projection {
    /// Warehouse table name, e.g. `ADVANCED_PROCESSED_2024_25`.
    pub fn processed_name(&self, season: &Season) -> String {
        format!("{}_PROCESSED_{}", self.name, season.table_suffix())
    }

    /// Apply the projection. Every source column must exist in `input`.
    pub fn apply(&self, input: &Table) -> Result<Table, TableError> {
        let filter = match self.filter {
            Some(f) => {
                let idx = input
                    .column_index(f.column)
                    .ok_or_else(|| TableError::missing_column(f.column))?;
                Some((idx, f.equals))
            }
            None => None,
        };

        let indices = self
            .columns
            .iter()
            .map(|c| {
                input
                    .column_index(c.source)
                    .ok_or_else(|| TableError::missing_column(c.source))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = Table::new(self.columns.iter().map(|c| c.target.to_string()).collect());
        for row in input.rows() {
            if let Some((idx, equals)) = filter {
                if row[idx] != equals {
                    continue;
                }
            }
            let projected = self
                .columns
                .iter()
                .zip(&indices)
                .map(|(spec, &idx)| spec.kind.cast(&row[idx]))
                .collect();
            out.push_row(projected)?;
        }
        Ok(out)
    }

    /// Every projection, in load order.
    pub fn all() -> &'static [Projection] {
        ALL_PROJECTIONS
    }

    /// Look up a projection by table stem (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Projection> {
        ALL_PROJECTIONS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

use ColumnKind::{Float, Integer, Minutes, Text};

const PLAYERS: &[ColumnSpec] = &[
    keep("PERSON_ID", Text),
    keep("FIRST_NAME", Text),
    keep("LAST_NAME", Text),
    keep("BIRTHDATE", Text),
    keep("SCHOOL", Text),
    keep("COUNTRY", Text),
    keep("HEIGHT", Text),
    keep("WEIGHT", Integer),
    keep("SEASON_EXP", Integer),
    keep("JERSEY", Text),
    keep("POSITION", Text),
    keep("TEAM_ID", Text),
    keep("DLEAGUE_FLAG", Text),
    keep("DRAFT_YEAR", Text),
    keep("DRAFT_ROUND", Text),
    keep("DRAFT_NUMBER", Text),
    keep("GREATEST_75_FLAG", Text),
];

const TEAMS: &[ColumnSpec] = &[
    keep("TEAM_ID", Text),
    keep("ABBREVIATION", Text),
    keep("CITY", Text),
    keep("NICKNAME", Text),
    keep("YEARFOUNDED", Integer),
    keep("ARENA", Text),
    keep("ARENACAPACITY", Integer),
    keep("OWNER", Text),
    keep("GENERALMANAGER", Text),
    keep("HEADCOACH", Text),
    keep("DLEAGUEAFFILIATION", Text),
];

const ADVANCED: &[ColumnSpec] = &[
    keep("GAME_ID", Text),
    keep("TEAM_ID", Text),
    keep("PLAYER_ID", Text),
    keep("MIN", Minutes),
    keep("E_OFF_RATING", Float),
    keep("OFF_RATING", Float),
    keep("E_DEF_RATING", Float),
    keep("DEF_RATING", Float),
    keep("E_NET_RATING", Float),
    keep("NET_RATING", Float),
    keep("AST_PCT", Float),
    keep("AST_TOV", Float),
    keep("AST_RATIO", Float),
    keep("OREB_PCT", Float),
    keep("DREB_PCT", Float),
    keep("REB_PCT", Float),
    keep("TM_TOV_PCT", Float),
    keep("EFG_PCT", Float),
    keep("TS_PCT", Float),
    keep("USG_PCT", Float),
    keep("E_USG_PCT", Float),
    keep("E_PACE", Float),
    keep("PACE", Float),
    keep("PACE_PER40", Float),
    keep("POSS", Integer),
    keep("PIE", Float),
];

const HUSTLE: &[ColumnSpec] = &[
    rename("gameId", "GAME_ID", Text),
    rename("teamId", "TEAM_ID", Text),
    rename("personId", "PLAYER_ID", Text),
    rename("minutes", "MIN", Minutes),
    rename("points", "PTS", Integer),
    rename("contestedShots", "CONTESTED_SHOTS", Integer),
    rename("contestedShots2pt", "CONTESTED_SHOTS_2PT", Integer),
    rename("contestedShots3pt", "CONTESTED_SHOTS_3PT", Integer),
    rename("deflections", "DEFLECTIONS", Integer),
    rename("chargesDrawn", "CHARGES_DRAWN", Integer),
    rename("screenAssists", "SCREEN_ASSISTS", Integer),
    rename("screenAssistPoints", "SCREEN_ASSIST_POINTS", Integer),
    rename("looseBallsRecoveredOffensive", "LOOSEBALLS_RECOVERED_OFFENSIVE", Integer),
    rename("looseBallsRecoveredDefensive", "LOOSEBALLS_RECOVERED_DEFENSIVE", Integer),
    rename("looseBallsRecoveredTotal", "LOOSEBALLS_RECOVERED_TOTAL", Integer),
    rename("offensiveBoxOuts", "OFFENSIVE_BOXOUTS", Integer),
    rename("defensiveBoxOuts", "DEFENSIVE_BOXOUTS", Integer),
    rename("boxOutPlayerTeamRebounds", "BOXOUT_PLAYER_TEAM_REBOUNDS", Integer),
    rename("boxOutPlayerRebounds", "BOXOUT_PLAYER_REBOUNDS", Integer),
    rename("boxOuts", "BOXOUTS", Integer),
];

const PLAYERTRACK: &[ColumnSpec] = &[
    keep("GAME_ID", Text),
    keep("TEAM_ID", Text),
    keep("PLAYER_ID", Text),
    keep("MIN", Minutes),
    keep("SPD", Float),
    keep("DIST", Float),
    keep("ORBC", Integer),
    keep("DRBC", Integer),
    keep("RBC", Integer),
    keep("TCHS", Integer),
    keep("SAST", Integer),
    keep("FTAST", Integer),
    keep("PASS", Integer),
    keep("AST", Integer),
    keep("CFGM", Integer),
    keep("CFGA", Integer),
    keep("CFG_PCT", Float),
    keep("UFGM", Integer),
    keep("UFGA", Integer),
    keep("UFG_PCT", Float),
    keep("FG_PCT", Float),
    keep("DFGM", Integer),
    keep("DFGA", Integer),
    keep("DFG_PCT", Float),
];

const SCORING: &[ColumnSpec] = &[
    keep("GAME_ID", Text),
    keep("TEAM_ID", Text),
    keep("PLAYER_ID", Text),
    keep("MIN", Minutes),
    keep("PCT_FGA_2PT", Float),
    keep("PCT_FGA_3PT", Float),
    keep("PCT_PTS_2PT", Float),
    keep("PCT_PTS_2PT_MR", Float),
    keep("PCT_PTS_3PT", Float),
    keep("PCT_PTS_FB", Float),
    keep("PCT_PTS_FT", Float),
    keep("PCT_PTS_OFF_TOV", Float),
    keep("PCT_PTS_PAINT", Float),
    keep("PCT_AST_2PM", Float),
    keep("PCT_UAST_2PM", Float),
    keep("PCT_AST_3PM", Float),
    keep("PCT_UAST_3PM", Float),
    keep("PCT_AST_FGM", Float),
    keep("PCT_UAST_FGM", Float),
];

const TRADITIONAL: &[ColumnSpec] = &[
    keep("GAME_ID", Text),
    keep("TEAM_ID", Text),
    keep("PLAYER_ID", Text),
    keep("MIN", Minutes),
    keep("FGM", Integer),
    keep("FGA", Integer),
    keep("FG_PCT", Float),
    keep("FG3M", Integer),
    keep("FG3A", Integer),
    keep("FG3_PCT", Float),
    keep("FTM", Integer),
    keep("FTA", Integer),
    keep("FT_PCT", Float),
    keep("OREB", Integer),
    keep("DREB", Integer),
    keep("REB", Integer),
    keep("AST", Integer),
    keep("STL", Integer),
    keep("BLK", Integer),
    keep("TO", Integer),
    keep("PF", Integer),
    keep("PTS", Integer),
    keep("PLUS_MINUS", Integer),
];

const USAGE: &[ColumnSpec] = &[
    keep("GAME_ID", Text),
    keep("TEAM_ID", Text),
    keep("PLAYER_ID", Text),
    keep("MIN", Minutes),
    keep("USG_PCT", Float),
    keep("PCT_FGM", Float),
    keep("PCT_FGA", Float),
    keep("PCT_FG3M", Float),
    keep("PCT_FG3A", Float),
    keep("PCT_FTM", Float),
    keep("PCT_FTA", Float),
    keep("PCT_OREB", Float),
    keep("PCT_DREB", Float),
    keep("PCT_REB", Float),
    keep("PCT_AST", Float),
    keep("PCT_TOV", Float),
    keep("PCT_STL", Float),
    keep("PCT_BLK", Float),
    keep("PCT_BLKA", Float),
    keep("PCT_PF", Float),
    keep("PCT_PFD", Float),
    keep("PCT_PTS", Float),
];

const SCHEDULE: &[ColumnSpec] = &[
    rename("seasonYear", "SEASON", Text),
    rename("gameDate", "GAME_DATE", Text),
    rename("gameId", "GAME_ID", Text),
    rename("gameCode", "GAME_CODE", Text),
    rename("homeTeam_teamId", "HOME_TEAM_ID", Text),
    rename("homeTeam_score", "HOME_TEAM_SCORE", Integer),
    rename("awayTeam_teamId", "AWAY_TEAM_ID", Text),
    rename("awayTeam_score", "AWAY_TEAM_SCORE", Integer),
    rename("pointsLeaders_0_personId", "POINTS_LEADER_ID", Text),
    rename("pointsLeaders_0_points", "POINTS_LEADER_POINTS", Integer),
];

const ALL_PROJECTIONS: &[Projection] = &[
    Projection {
        name: "PLAYERS",
        raw: RawTable::Players,
        filter: Some(RowFilter {
            column: "ROSTERSTATUS",
            equals: "Active",
        }),
        columns: PLAYERS,
    },
    Projection {
        name: "TEAMS",
        raw: RawTable::Teams,
        filter: None,
        columns: TEAMS,
    },
    Projection {
        name: "ADVANCED",
        raw: RawTable::Boxscore(BoxscoreCategory::Advanced),
        filter: None,
        columns: ADVANCED,
    },
    Projection {
        name: "HUSTLE",
        raw: RawTable::Boxscore(BoxscoreCategory::Hustle),
        filter: None,
        columns: HUSTLE,
    },
    Projection {
        name: "PLAYERTRACK",
        raw: RawTable::Boxscore(BoxscoreCategory::PlayerTrack),
        filter: None,
        columns: PLAYERTRACK,
    },
    Projection {
        name: "SCORING",
        raw: RawTable::Boxscore(BoxscoreCategory::Scoring),
        filter: None,
        columns: SCORING,
    },
    Projection {
        name: "TRADITIONAL",
        raw: RawTable::Boxscore(BoxscoreCategory::Traditional),
        filter: None,
        columns: TRADITIONAL,
    },
    Projection {
        name: "USAGE",
        raw: RawTable::Boxscore(BoxscoreCategory::Usage),
        filter: None,
        columns: USAGE,
    },
    Projection {
        name: "SCHEDULE",
        raw: RawTable::Schedule,
        filter: None,
        columns: SCHEDULE,
    },
];
