use std::collections::BTreeSet;
use std::time::Duration;

use courtside_core::{Season, SeasonType};

use crate::error::PipelineError;
use crate::source::ScopeSource;

/// Union of the identifiers `source` reports for each season type.
///
/// One upstream call per season type, separated by `pause`. There is no
/// retry here: a failed call is logged and returned, since nothing can run
/// without the work set.
pub fn enumerate(
    source: &dyn ScopeSource,
    season: &Season,
    season_types: &[SeasonType],
    pause: Duration,
) -> Result<BTreeSet<String>, PipelineError> {
    let mut ids = BTreeSet::new();

    for (i, &season_type) in season_types.iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            std::thread::sleep(pause);
        }

        let found = source.ids_for(season, season_type).map_err(|e| {
            log::error!(
                "Failed to list {} for {} {}: {}",
                source.describe(),
                season,
                season_type,
                e
            );
            PipelineError::Enumeration {
                scope: source.describe().to_string(),
                season_type,
                message: e.to_string(),
            }
        })?;

        log::info!(
            "Found {} {} for {} {}",
            found.len(),
            source.describe(),
            season,
            season_type
        );
        ids.extend(found);
    }

    log::info!("{} unique {} in scope", ids.len(), source.describe());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    struct Fixed;

    impl ScopeSource for Fixed {
        fn describe(&self) -> &str {
            "games"
        }

        fn ids_for(&self, _season: &Season, season_type: SeasonType) -> Result<Vec<String>, FetchError> {
            match season_type {
                SeasonType::RegularSeason => Ok(vec!["002".into(), "001".into(), "002".into()]),
                SeasonType::Playoffs => Ok(vec!["004".into(), "001".into()]),
                _ => Err(FetchError::transient("timed out")),
            }
        }
    }

    #[test]
    fn unions_and_deduplicates() {
        let ids = enumerate(
            &Fixed,
            &Season::default(),
            &[SeasonType::RegularSeason, SeasonType::Playoffs],
            Duration::ZERO,
        )
        .unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["001", "002", "004"]);
    }

    #[test]
    fn failure_is_fatal() {
        let err = enumerate(
            &Fixed,
            &Season::default(),
            &[SeasonType::RegularSeason, SeasonType::AllStar],
            Duration::ZERO,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Enumeration { season_type: SeasonType::AllStar, .. }
        ));
    }
}
