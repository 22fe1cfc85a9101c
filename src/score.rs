use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::GameConfig;

const APP_DIR_NAME: &str = "autopilot-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Best scores, one per board layout.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    high_scores: BTreeMap<String, u32>,
}

impl HighScores {
    /// Returns the best score recorded for the layout of `config`.
    #[must_use]
    pub fn get(&self, config: &GameConfig) -> u32 {
        self.high_scores
            .get(&board_key(config))
            .copied()
            .unwrap_or(0)
    }

    /// Records `score` when it beats the stored one. Returns true on a new record.
    pub fn record(&mut self, config: &GameConfig, score: u32) -> bool {
        let best = self.high_scores.entry(board_key(config)).or_insert(0);
        if score > *best {
            *best = score;
            return true;
        }
        false
    }
}

/// Key of one board layout, e.g. `10x10` or `12x8-wrap`.
#[must_use]
pub fn board_key(config: &GameConfig) -> String {
    let wrap = if config.wraparound { "-wrap" } else { "" };
    format!("{}x{}{wrap}", config.size.width, config.size.height)
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Loads the high-score table from disk.
///
/// Returns an empty table when the score file does not yet exist (first run).
/// Returns `Err` when the file exists but cannot be read or parsed.
pub fn load_high_scores() -> io::Result<HighScores> {
    load_high_scores_from_path(&scores_path())
}

/// Saves the high-score table, creating parent directories when needed.
pub fn save_high_scores(scores: &HighScores) -> io::Result<()> {
    save_high_scores_to_path(&scores_path(), scores)
}

fn load_high_scores_from_path(path: &Path) -> io::Result<HighScores> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HighScores::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<HighScores>(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_high_scores_to_path(path: &Path, scores: &HighScores) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(scores)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::config::GridSize;
    use crate::game::GameConfig;

    use super::{board_key, load_high_scores_from_path, save_high_scores_to_path, HighScores};

    fn layout(width: u16, height: u16, wraparound: bool) -> GameConfig {
        GameConfig {
            size: GridSize { width, height },
            wraparound,
            ..GameConfig::default()
        }
    }

    #[test]
    fn records_are_kept_per_layout() {
        let mut scores = HighScores::default();
        let small = layout(5, 5, false);
        let small_wrap = layout(5, 5, true);

        assert!(scores.record(&small, 7));
        assert!(!scores.record(&small, 3));
        assert!(scores.record(&small_wrap, 2));

        assert_eq!(scores.get(&small), 7);
        assert_eq!(scores.get(&small_wrap), 2);
        assert_eq!(scores.get(&layout(6, 5, false)), 0);
        assert_eq!(board_key(&small_wrap), "5x5-wrap");
    }

    #[test]
    fn saved_scores_load_back() {
        let path = unique_test_path("saved");
        let mut scores = HighScores::default();
        scores.record(&layout(10, 10, false), 42);

        save_high_scores_to_path(&path, &scores).expect("score save should succeed");
        let loaded = load_high_scores_from_path(&path).expect("load should succeed");

        assert_eq!(loaded.get(&layout(10, 10, false)), 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_empty_table() {
        let path = unique_test_path("missing");
        let loaded = load_high_scores_from_path(&path).expect("missing file should be Ok");
        assert_eq!(loaded, HighScores::default());
    }

    #[test]
    fn malformed_score_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(
            load_high_scores_from_path(&path).is_err(),
            "malformed file should return Err"
        );

        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("autopilot-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
