//! Persistence boundary consumed by the service, plus its adapters.

/// JSON document backed repository.
pub mod file;
/// Thread-safe in-process repository.
pub mod memory;

pub use file::JsonFileRepository;
pub use memory::InMemoryRepository;

use anyhow::Result;

use crate::models::Videojuego;

/// Storage capability the service delegates to.
///
/// Adapters decide ordering and how duplicate titles resolve; the service
/// relies only on these three operations.
#[cfg_attr(test, mockall::automock)]
pub trait VideojuegoRepository: Send + Sync {
    /// Persist a game.
    fn save(&self, game: Videojuego) -> Result<()>;

    /// Every stored game in adapter-defined order.
    fn get_all(&self) -> Result<Vec<Videojuego>>;

    /// Case-sensitive exact title lookup; `Ok(None)` when absent.
    fn find_by_title(&self, title: &str) -> Result<Option<Videojuego>>;
}
