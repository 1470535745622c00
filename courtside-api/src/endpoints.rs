use courtside_core::BoxscoreCategory;

/// How an endpoint lays out its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A named `headers` + `rowSet` result set.
    ResultSet(&'static str),
    NestedBoxscore,
    Schedule,
}

/// One statistics endpoint and the table it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub shape: Shape,
}

pub const LEAGUE_GAME_LOG: Endpoint = Endpoint {
    path: "leaguegamelog",
    shape: Shape::ResultSet("LeagueGameLog"),
};

pub const PLAYER_GAME_LOGS: Endpoint = Endpoint {
    path: "playergamelogs",
    shape: Shape::ResultSet("PlayerGameLogs"),
};

pub const TEAM_GAME_LOGS: Endpoint = Endpoint {
    path: "teamgamelogs",
    shape: Shape::ResultSet("TeamGameLogs"),
};

pub const COMMON_PLAYER_INFO: Endpoint = Endpoint {
    path: "commonplayerinfo",
    shape: Shape::ResultSet("CommonPlayerInfo"),
};

pub const TEAM_DETAILS: Endpoint = Endpoint {
    path: "teamdetails",
    shape: Shape::ResultSet("TeamBackground"),
};

pub const SCHEDULE: Endpoint = Endpoint {
    path: "scheduleleaguev2",
    shape: Shape::Schedule,
};

/// Player-level box score endpoint for `category`.
pub fn boxscore(category: BoxscoreCategory) -> Endpoint {
    let player_stats = Shape::ResultSet("PlayerStats");
    match category {
        BoxscoreCategory::Advanced => Endpoint {
            path: "boxscoreadvancedv2",
            shape: player_stats,
        },
        BoxscoreCategory::Hustle => Endpoint {
            path: "boxscorehustlev2",
            shape: Shape::NestedBoxscore,
        },
        BoxscoreCategory::Scoring => Endpoint {
            path: "boxscorescoringv2",
            shape: player_stats,
        },
        BoxscoreCategory::Traditional => Endpoint {
            path: "boxscoretraditionalv2",
            shape: player_stats,
        },
        BoxscoreCategory::PlayerTrack => Endpoint {
            path: "boxscoreplayertrackv2",
            shape: player_stats,
        },
        BoxscoreCategory::Usage => Endpoint {
            path: "boxscoreusagev2",
            shape: player_stats,
        },
    }
}

/// Query parameters for a box score request.
pub fn boxscore_params(game_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("GameID", game_id.to_string()),
        ("StartPeriod", "0".to_string()),
        ("EndPeriod", "0".to_string()),
        ("StartRange", "0".to_string()),
        ("EndRange", "0".to_string()),
        ("RangeType", "0".to_string()),
    ]
}
