//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::service::{MAX_SCORE, MIN_SCORE};

/// Platform label for PC games.
pub const PLATFORM_PC: &str = "PC";
/// Platform label for mobile games; uses the shorter long-game threshold.
pub const PLATFORM_MOVIL: &str = "Movil";

/// A single video game record.
///
/// The entity performs no validation of its own; the service validates
/// inputs on the registration path before constructing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Videojuego {
    title: String,
    platform: String,
    hours_played: u32,
    score: i32,
}

impl Videojuego {
    /// Build a game from its raw fields.
    pub fn new(
        title: impl Into<String>,
        platform: impl Into<String>,
        hours_played: u32,
        score: i32,
    ) -> Self {
        Self {
            title: title.into(),
            platform: platform.into(),
            hours_played,
            score,
        }
    }

    /// Game title, matched exactly by repository lookups.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Platform label such as `PC` or `Movil`.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Hours played; never negative.
    pub fn hours_played(&self) -> u32 {
        self.hours_played
    }

    /// Raw score; classification rejects values outside 0..=100.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Returns a user-facing label combining title and platform.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.title, self.platform)
    }

    /// Describes the first field breaking the registration rules, if any.
    ///
    /// Used to screen records that did not come through the service,
    /// such as a hand-edited catalogue file.
    pub fn defect(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("title must not be blank".to_string());
        }
        if self.platform.trim().is_empty() {
            return Some("platform must not be blank".to_string());
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.score) {
            return Some(format!(
                "score must be within {MIN_SCORE}..={MAX_SCORE}, got {}",
                self.score
            ));
        }
        None
    }
}

/// Quality bucket derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Categoria {
    /// Scores 0 through 49.
    Malo,
    /// Scores 50 through 89.
    Bueno,
    /// Scores 90 through 100.
    ObraMaestra,
}

impl Categoria {
    /// Exact label for the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Categoria::Malo => "Malo",
            Categoria::Bueno => "Bueno",
            Categoria::ObraMaestra => "Obra Maestra",
        }
    }
}

impl fmt::Display for Categoria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
