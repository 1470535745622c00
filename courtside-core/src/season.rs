/// A league season written as `YYYY-YY`, e.g. `2024-25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Season {
    start_year: u16,
}

impl Season {
    /// Create a season from the calendar year it starts in.
    pub fn starting(start_year: u16) -> Self {
        Self { start_year }
    }

    pub fn start_year(&self) -> u16 {
        self.start_year
    }

    /// Form used in warehouse table names: `2024_25`.
    pub fn table_suffix(&self) -> String {
        format!("{}_{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::starting(2024)
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

/// Error returned when a string is not a valid season or season type.
#[derive(Debug, Clone)]
pub struct SeasonParseError(pub String);

impl std::fmt::Display for SeasonParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid season: '{}'", self.0)
    }
}

impl std::error::Error for SeasonParseError {}

impl std::str::FromStr for Season {
    type Err = SeasonParseError;

    /// Parse `YYYY-YY`. The two-digit suffix must be the year after `YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SeasonParseError(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(err)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(err());
        }
        let start_year: u16 = start.parse().map_err(|_| err())?;
        let end_suffix: u16 = end.parse().map_err(|_| err())?;
        if (start_year + 1) % 100 != end_suffix {
            return Err(err());
        }
        Ok(Self { start_year })
    }
}

/// The portion of a season a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeasonType {
    PreSeason,
    RegularSeason,
    AllStar,
    PlayIn,
    Playoffs,
}

const ALL_SEASON_TYPES: &[SeasonType] = &[
    SeasonType::PreSeason,
    SeasonType::RegularSeason,
    SeasonType::AllStar,
    SeasonType::PlayIn,
    SeasonType::Playoffs,
];

impl SeasonType {
    /// The label the upstream API expects in its `SeasonType` parameter.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PreSeason => "Pre Season",
            Self::RegularSeason => "Regular Season",
            Self::AllStar => "All Star",
            Self::PlayIn => "PlayIn",
            Self::Playoffs => "Playoffs",
        }
    }

    /// Accepted spellings (case-insensitive). The label comes first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::PreSeason => &["pre season", "preseason", "pre-season"],
            Self::RegularSeason => &["regular season", "regular", "regular-season", "rs"],
            Self::AllStar => &["all star", "allstar", "all-star"],
            Self::PlayIn => &["playin", "play-in", "play in"],
            Self::Playoffs => &["playoffs", "po", "postseason"],
        }
    }

    pub fn all() -> &'static [SeasonType] {
        ALL_SEASON_TYPES
    }

    /// Season types queried when nothing else is configured.
    pub fn defaults() -> Vec<SeasonType> {
        vec![Self::RegularSeason, Self::Playoffs]
    }
}

impl std::fmt::Display for SeasonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for SeasonType {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_SEASON_TYPES
            .iter()
            .copied()
            .find(|t| t.aliases().contains(&lower.as_str()))
            .ok_or_else(|| SeasonParseError(s.to_string()))
    }
}
