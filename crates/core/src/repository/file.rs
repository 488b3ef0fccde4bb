use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::VideojuegoRepository;
use crate::models::Videojuego;

/// Default file name under the user's data directory.
pub const DEFAULT_DATA_FILE: &str = "videojuegos/videojuegos.json";

/// Serialized representation of the catalogue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogPayload {
    updated_at: DateTime<Utc>,
    #[serde(default)]
    games: Vec<Videojuego>,
}

impl Default for CatalogPayload {
    fn default() -> Self {
        Self {
            updated_at: Utc::now(),
            games: Vec::new(),
        }
    }
}

/// Repository storing every game in a single JSON document.
///
/// Each save rewrites the whole file through a temporary sibling that
/// replaces it, so readers never observe a partial document. Records that
/// break the registration rules are skipped on read with a warning and kept
/// on disk untouched.
pub struct JsonFileRepository {
    path: PathBuf,
    // Serialises file access within this process.
    lock: Mutex<()>,
}

impl JsonFileRepository {
    /// Create a repository backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Default location under the user's data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DATA_FILE)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_payload(&self) -> Result<CatalogPayload> {
        if !self.path.exists() {
            return Ok(CatalogPayload::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let payload = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(payload)
    }

    fn write_payload(&self, payload: &CatalogPayload) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let serialised =
            serde_json::to_vec_pretty(payload).context("failed to serialize catalogue")?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to stage {}", self.path.display()))?;
        staged
            .write_all(&serialised)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        staged
            .persist(&self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }

    /// Stored games that satisfy the registration rules, in file order.
    fn valid_games(&self) -> Result<Vec<Videojuego>> {
        let _guard = self.lock.lock();
        let games = self.read_payload()?.games;
        Ok(games
            .into_iter()
            .enumerate()
            .filter_map(|(index, game)| match game.defect() {
                Some(reason) => {
                    warn!(
                        path = %self.path.display(),
                        index,
                        title = game.title(),
                        %reason,
                        "skipping invalid catalogue record"
                    );
                    None
                }
                None => Some(game),
            })
            .collect())
    }
}

impl VideojuegoRepository for JsonFileRepository {
    fn save(&self, game: Videojuego) -> Result<()> {
        let _guard = self.lock.lock();
        let mut payload = self.read_payload()?;
        payload.games.push(game);
        payload.updated_at = Utc::now();
        self.write_payload(&payload)?;
        debug!(path = %self.path.display(), total = payload.games.len(), "catalogue written");
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Videojuego>> {
        self.valid_games()
    }

    fn find_by_title(&self, title: &str) -> Result<Option<Videojuego>> {
        Ok(self
            .valid_games()?
            .into_iter()
            .rev()
            .find(|game| game.title() == title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_empty() -> Result<()> {
        let dir = tempdir()?;
        let repo = JsonFileRepository::new(dir.path().join("none.json"));
        assert!(repo.get_all()?.is_empty());
        assert!(repo.find_by_title("Zelda")?.is_none());
        Ok(())
    }

    #[test]
    fn save_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/catalogue.json");
        let repo = JsonFileRepository::new(&path);

        repo.save(Videojuego::new("Elden Ring", "PC", 120, 95))?;
        repo.save(Videojuego::new("Tetris", "Movil", 5, 70))?;
        assert!(path.exists());

        // A second handle sees what the first one wrote.
        let reopened = JsonFileRepository::new(&path);
        let games = reopened.get_all()?;
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].title(), "Elden Ring");
        assert_eq!(games[1].platform(), "Movil");

        let found = reopened.find_by_title("Elden Ring")?.expect("stored game");
        assert_eq!(found.hours_played(), 120);
        Ok(())
    }

    #[test]
    fn duplicate_title_resolves_to_latest_save() -> Result<()> {
        let dir = tempdir()?;
        let repo = JsonFileRepository::new(dir.path().join("catalogue.json"));
        repo.save(Videojuego::new("Doom", "PC", 10, 80))?;
        repo.save(Videojuego::new("Doom", "PC", 30, 85))?;

        let found = repo.find_by_title("Doom")?.expect("stored game");
        assert_eq!(found.score(), 85);
        Ok(())
    }

    #[test]
    fn invalid_records_are_skipped_but_kept_on_disk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalogue.json");
        fs::write(
            &path,
            r#"{
  "updated_at": "2024-01-01T00:00:00Z",
  "games": [
    { "title": "Good", "platform": "PC", "hours_played": 10, "score": 80 },
    { "title": "Bad", "platform": "PC", "hours_played": 10, "score": 150 },
    { "title": "", "platform": "", "hours_played": 10, "score": 80 }
  ]
}"#,
        )?;
        let repo = JsonFileRepository::new(&path);

        let games = repo.get_all()?;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].title(), "Good");
        assert!(repo.find_by_title("")?.is_none());
        assert!(repo.find_by_title("Bad")?.is_none());

        repo.save(Videojuego::new("Tetris", "Movil", 5, 70))?;
        let titles: Vec<_> = repo
            .get_all()?
            .iter()
            .map(|game| game.title().to_string())
            .collect();
        assert_eq!(titles, ["Good", "Tetris"]);

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(raw["games"].as_array().map(Vec::len), Some(4));
        Ok(())
    }

    #[test]
    fn concurrent_reads_never_see_partial_writes() -> Result<()> {
        let dir = tempdir()?;
        let repo = JsonFileRepository::new(dir.path().join("catalogue.json"));

        std::thread::scope(|scope| -> Result<()> {
            let writer = scope.spawn(|| -> Result<()> {
                for hours in 0..50 {
                    repo.save(Videojuego::new(format!("Game {hours}"), "PC", hours, 60))?;
                }
                Ok(())
            });
            let reader = scope.spawn(|| -> Result<()> {
                for _ in 0..50 {
                    repo.get_all()?;
                    repo.find_by_title("Game 0")?;
                }
                Ok(())
            });
            writer.join().expect("writer thread panicked")?;
            reader.join().expect("reader thread panicked")?;
            Ok(())
        })?;

        assert_eq!(repo.get_all()?.len(), 50);
        Ok(())
    }

    #[test]
    fn corrupt_file_reports_path() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalogue.json");
        fs::write(&path, "not json")?;

        let err = JsonFileRepository::new(&path)
            .get_all()
            .expect_err("corrupt file must fail");
        assert!(err.to_string().contains("failed to parse"));
        Ok(())
    }
}
