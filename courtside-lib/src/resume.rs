//! Working out what an interrupted run still has to do.

use std::collections::BTreeSet;
use std::path::PathBuf;

use courtside_core::Table;

/// Identifiers present in the `id_column` of any of `files`.
///
/// Files that cannot be read, or that lack the column, are logged and
/// contribute nothing.
pub fn processed_ids(files: &[PathBuf], id_column: &str) -> BTreeSet<String> {
    let mut processed = BTreeSet::new();
    if files.is_empty() {
        log::info!("No existing checkpoint files found; starting from scratch");
        return processed;
    }

    for file in files {
        let table = match Table::read_csv(file) {
            Ok(table) => table,
            Err(e) => {
                log::error!("Error reading checkpoint {}: {}", file.display(), e);
                continue;
            }
        };
        match table.unique(id_column) {
            Ok(ids) => {
                log::info!("Loaded {} ids from {}", ids.len(), file.display());
                processed.extend(ids);
            }
            Err(_) => log::warn!(
                "Checkpoint {} has no {} column",
                file.display(),
                id_column
            ),
        }
    }

    log::info!("{} ids already processed", processed.len());
    processed
}

/// Scope minus what has already been processed.
pub fn remaining(scope: &BTreeSet<String>, processed: &BTreeSet<String>) -> BTreeSet<String> {
    scope.difference(processed).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn remaining_is_set_difference() {
        let scope = set(&["A", "B", "C", "D"]);
        assert_eq!(remaining(&scope, &set(&["A", "B"])), set(&["C", "D"]));
        assert_eq!(remaining(&scope, &set(&[])), scope);
        assert!(remaining(&scope, &scope).is_empty());
    }

    #[test]
    fn reads_ids_and_keeps_leading_zeros() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("boxscore_traditional_chunk_1.csv");
        let b = dir.path().join("boxscore_traditional_chunk_2.csv");
        let bad = dir.path().join("boxscore_traditional_chunk_3.csv");
        std::fs::write(&a, "PLAYER_ID,GAME_ID\n1,0022400001\n2,0022400001\n").unwrap();
        std::fs::write(&b, "PLAYER_ID,GAME_ID\n3,0022400002\n").unwrap();
        std::fs::write(&bad, "PLAYER_ID\n4\n").unwrap();

        let ids = processed_ids(&[a, b, bad, dir.path().join("missing.csv")], "GAME_ID");
        assert_eq!(ids, set(&["0022400001", "0022400002"]));
    }
}
