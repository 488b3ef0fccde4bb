use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use parking_lot::RwLock;
use tracing::debug;

use super::VideojuegoRepository;
use crate::models::Videojuego;

/// Thread-safe in-memory repository. Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    games: Vec<Videojuego>,
    by_title: HashMap<String, usize>,
}

impl InMemoryRepository {
    /// Build an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves recorded so far.
    pub fn len(&self) -> usize {
        self.inner.read().games.len()
    }

    /// True when nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.inner.read().games.is_empty()
    }

    /// Drop every stored game.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.games.clear();
        inner.by_title.clear();
    }
}

impl VideojuegoRepository for InMemoryRepository {
    fn save(&self, game: Videojuego) -> Result<()> {
        let mut inner = self.inner.write();
        let index = inner.games.len();
        // Latest save wins for lookups; enumeration keeps every entry.
        inner.by_title.insert(game.title().to_string(), index);
        inner.games.push(game);
        debug!(total = inner.games.len(), "game stored in memory");
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Videojuego>> {
        Ok(self.inner.read().games.clone())
    }

    fn find_by_title(&self, title: &str) -> Result<Option<Videojuego>> {
        let inner = self.inner.read();
        Ok(inner
            .by_title
            .get(title)
            .and_then(|&index| inner.games.get(index))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() -> Result<()> {
        let repo = InMemoryRepository::new();
        repo.save(Videojuego::new("Zelda", "Switch", 80, 95))?;
        repo.save(Videojuego::new("Tetris", "Movil", 5, 70))?;

        let titles: Vec<_> = repo
            .get_all()?
            .iter()
            .map(|game| game.title().to_string())
            .collect();
        assert_eq!(titles, ["Zelda", "Tetris"]);
        assert_eq!(repo.len(), 2);
        Ok(())
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() -> Result<()> {
        let repo = InMemoryRepository::new();
        repo.save(Videojuego::new("Elden Ring", "PC", 120, 95))?;

        let found = repo.find_by_title("Elden Ring")?.expect("stored game");
        assert_eq!(found.hours_played(), 120);
        assert!(repo.find_by_title("elden ring")?.is_none());
        assert!(repo.find_by_title("Elden")?.is_none());
        Ok(())
    }

    #[test]
    fn duplicate_title_resolves_to_latest_save() -> Result<()> {
        let repo = InMemoryRepository::new();
        repo.save(Videojuego::new("Doom", "PC", 10, 80))?;
        repo.save(Videojuego::new("Doom", "PC", 30, 85))?;

        assert_eq!(repo.len(), 2);
        let found = repo.find_by_title("Doom")?.expect("stored game");
        assert_eq!(found.hours_played(), 30);
        Ok(())
    }

    #[test]
    fn clones_share_storage() -> Result<()> {
        let repo = InMemoryRepository::new();
        let handle = repo.clone();
        handle.save(Videojuego::new("Celeste", "PC", 12, 92))?;
        assert!(repo.find_by_title("Celeste")?.is_some());

        repo.clear();
        assert!(handle.is_empty());
        Ok(())
    }
}
