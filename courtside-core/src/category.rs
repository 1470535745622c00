/// The box score tables pulled for every game.
///
/// All six are fetched together as one logical call per game; the short
/// name is what appears in checkpoint and output file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoxscoreCategory {
    Advanced,
    Hustle,
    Scoring,
    Traditional,
    PlayerTrack,
    Usage,
}

/// All categories in fetch order.
const ALL_CATEGORIES: &[BoxscoreCategory] = &[
    BoxscoreCategory::Advanced,
    BoxscoreCategory::Hustle,
    BoxscoreCategory::Scoring,
    BoxscoreCategory::Traditional,
    BoxscoreCategory::PlayerTrack,
    BoxscoreCategory::Usage,
];

impl BoxscoreCategory {
    /// Canonical short name used in file names and on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Advanced => "advanced",
            Self::Hustle => "hustle",
            Self::Scoring => "scoring",
            Self::Traditional => "traditional",
            Self::PlayerTrack => "playertrack",
            Self::Usage => "usage",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Advanced => "Advanced",
            Self::Hustle => "Hustle",
            Self::Scoring => "Scoring",
            Self::Traditional => "Traditional",
            Self::PlayerTrack => "Player Tracking",
            Self::Usage => "Usage",
        }
    }

    pub fn all() -> &'static [BoxscoreCategory] {
        ALL_CATEGORIES
    }

    /// Short names of every category, in fetch order.
    pub fn short_names() -> Vec<&'static str> {
        ALL_CATEGORIES.iter().map(|c| c.short_name()).collect()
    }

    /// The category whose checkpoints are read to decide which games a
    /// previous run already processed. Every successful game writes a
    /// traditional row, so its presence stands in for all six.
    pub fn representative() -> Self {
        Self::Traditional
    }
}

impl std::fmt::Display for BoxscoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string is not a known box score category.
#[derive(Debug, Clone)]
pub struct CategoryParseError(pub String);

impl std::fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown box score category: '{}'", self.0)
    }
}

impl std::error::Error for CategoryParseError {}

impl std::str::FromStr for BoxscoreCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "tracking" || lower == "player track" {
            return Ok(Self::PlayerTrack);
        }
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.short_name() == lower)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_has_six_categories() {
        assert_eq!(BoxscoreCategory::all().len(), 6);
    }

    #[test]
    fn short_names_round_trip() {
        for &category in BoxscoreCategory::all() {
            let parsed: BoxscoreCategory = category.short_name().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            "PlayerTrack".parse::<BoxscoreCategory>().unwrap(),
            BoxscoreCategory::PlayerTrack
        );
        assert_eq!(
            "tracking".parse::<BoxscoreCategory>().unwrap(),
            BoxscoreCategory::PlayerTrack
        );
        assert!("shots".parse::<BoxscoreCategory>().is_err());
    }

    #[test]
    fn short_names_follow_fetch_order() {
        assert_eq!(
            BoxscoreCategory::short_names(),
            vec!["advanced", "hustle", "scoring", "traditional", "playertrack", "usage"]
        );
    }
}
