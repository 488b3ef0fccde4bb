#![warn(clippy::all, missing_docs)]

//! Core domain logic for the videojuegos catalogue.
//!
//! This crate hosts the game model, the quality classification and
//! long-game rules enforced by the service, the repository boundary
//! with its adapters, and configuration handling used by the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use config::{AppConfig, StorageKind};
pub use error::VideojuegoError;
pub use models::{Categoria, Videojuego, PLATFORM_MOVIL, PLATFORM_PC};
pub use repository::{InMemoryRepository, JsonFileRepository, VideojuegoRepository};
pub use service::VideojuegoService;
