//! Validation, classification and registration of games.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    error::{Result, VideojuegoError},
    models::{Categoria, Videojuego, PLATFORM_MOVIL},
    repository::VideojuegoRepository,
};

/// Lowest classifiable score.
pub const MIN_SCORE: i32 = 0;
/// Highest classifiable score.
pub const MAX_SCORE: i32 = 100;
/// Hours above which a mobile game counts as long.
pub const MOVIL_LONG_GAME_HOURS: u32 = 20;
/// Hours above which any other game counts as long.
pub const DEFAULT_LONG_GAME_HOURS: u32 = 50;

/// Stateless facade over a [`VideojuegoRepository`].
#[derive(Clone)]
pub struct VideojuegoService {
    repository: Arc<dyn VideojuegoRepository>,
}

impl VideojuegoService {
    /// Wrap the repository the service will delegate persistence to.
    pub fn new(repository: Arc<dyn VideojuegoRepository>) -> Self {
        Self { repository }
    }

    /// Map a score to its quality category.
    ///
    /// 50 is the first `Bueno` score and 90 the first `ObraMaestra` score.
    pub fn classify(&self, score: i32) -> Result<Categoria> {
        let categoria = match score {
            0..=49 => Categoria::Malo,
            50..=89 => Categoria::Bueno,
            90..=100 => Categoria::ObraMaestra,
            _ => return Err(VideojuegoError::OutOfRange { score }),
        };
        debug!(score, %categoria, "score classified");
        Ok(categoria)
    }

    /// Classify a stored game by its score.
    pub fn classify_game(&self, game: &Videojuego) -> Result<Categoria> {
        self.classify(game.score())
    }

    /// Hours a game on `platform` must exceed to count as long.
    pub fn long_game_threshold(&self, platform: &str) -> u32 {
        if platform == PLATFORM_MOVIL {
            MOVIL_LONG_GAME_HOURS
        } else {
            DEFAULT_LONG_GAME_HOURS
        }
    }

    /// True when the game's hours strictly exceed its platform threshold.
    pub fn is_long_game(&self, game: &Videojuego) -> bool {
        game.hours_played() > self.long_game_threshold(game.platform())
    }

    /// Validate the raw fields, build a game and hand it to the repository.
    ///
    /// Checks run in order: title, hours, platform, score. The first failure
    /// is returned and nothing is saved.
    pub fn register(
        &self,
        title: Option<&str>,
        platform: &str,
        hours_played: i32,
        score: i32,
    ) -> Result<()> {
        let game = validate(title, platform, hours_played, score).inspect_err(|err| {
            warn!(title = title.unwrap_or_default(), %err, "registration rejected");
        })?;

        let title = game.title().to_string();
        self.repository
            .save(game)
            .map_err(VideojuegoError::Repository)?;
        info!(title = %title, platform, hours_played, score, "game registered");
        Ok(())
    }

    /// Look a game up by its exact title.
    pub fn find_by_title(&self, title: &str) -> Result<Option<Videojuego>> {
        let found = self
            .repository
            .find_by_title(title)
            .map_err(VideojuegoError::Repository)?;
        debug!(title, found = found.is_some(), "title lookup");
        Ok(found)
    }

    /// Every stored game, in repository order.
    pub fn list(&self) -> Result<Vec<Videojuego>> {
        self.repository
            .get_all()
            .map_err(VideojuegoError::Repository)
    }
}

fn validate(
    title: Option<&str>,
    platform: &str,
    hours_played: i32,
    score: i32,
) -> Result<Videojuego> {
    let title = match title {
        Some(title) if !title.trim().is_empty() => title,
        Some(_) => return Err(VideojuegoError::invalid("title", "must not be blank")),
        None => return Err(VideojuegoError::invalid("title", "is required")),
    };
    let hours = u32::try_from(hours_played).map_err(|_| {
        VideojuegoError::invalid("hours_played", format!("must be >= 0, got {hours_played}"))
    })?;
    if platform.trim().is_empty() {
        return Err(VideojuegoError::invalid("platform", "must not be blank"));
    }
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(VideojuegoError::invalid(
            "score",
            format!("must be within {MIN_SCORE}..={MAX_SCORE}, got {score}"),
        ));
    }
    Ok(Videojuego::new(title, platform, hours, score))
}
