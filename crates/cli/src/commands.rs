use std::{io::Write, sync::Arc};

use anyhow::{bail, Result};
use clap::Subcommand;
use tracing::info;
use videojuegos_core::{
    AppConfig, InMemoryRepository, JsonFileRepository, StorageKind, Videojuego,
    VideojuegoRepository, VideojuegoService,
};

/// Seed catalogue registered by the `demo` command.
const DEMO_CATALOGUE: &[(&str, &str, i32, i32)] = &[
    ("Elden Ring", "PC", 120, 95),
    ("The Legend of Zelda", "Switch", 80, 97),
    ("Candy Crush", "Movil", 25, 45),
    ("Monument Valley", "Movil", 6, 88),
    ("Cyberpunk 2077", "PC", 45, 50),
];

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a game
    ///
    /// With the default `memory` storage the game only lasts for this run;
    /// set `storage = "file"` (or `VIDEOJUEGOS_STORAGE=file`) to keep it.
    Register {
        title: String,
        platform: String,
        /// Hours played (must not be negative)
        #[arg(allow_negative_numbers = true)]
        hours: i32,
        /// Score between 0 and 100
        #[arg(allow_negative_numbers = true)]
        score: i32,
    },
    /// List every stored game with its category
    List,
    /// Show a single game by exact title
    Show { title: String },
    /// Print the category for a score
    Classify {
        #[arg(allow_negative_numbers = true)]
        score: i32,
    },
    /// Register a sample catalogue and print the report
    Demo,
}

/// Build the service over the repository selected by configuration.
pub fn build_service(config: &AppConfig) -> VideojuegoService {
    let repository: Arc<dyn VideojuegoRepository> = match config.storage {
        StorageKind::Memory => Arc::new(InMemoryRepository::new()),
        StorageKind::File => Arc::new(JsonFileRepository::new(&config.data_file)),
    };
    info!(storage = ?config.storage, "repository selected");
    VideojuegoService::new(repository)
}

/// Hint shown when a command's writes cannot outlive the process.
pub fn storage_note(config: &AppConfig, command: &Command) -> Option<&'static str> {
    match (config.storage, command) {
        (StorageKind::Memory, Command::Register { .. }) => Some(
            "memory storage is active; this game is discarded when the command exits \
             (set VIDEOJUEGOS_STORAGE=file to persist it)",
        ),
        _ => None,
    }
}

/// Execute one command, writing its report to `out`.
pub fn execute(service: &VideojuegoService, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Register {
            title,
            platform,
            hours,
            score,
        } => {
            service.register(Some(title.as_str()), &platform, hours, score)?;
            match service.find_by_title(&title)? {
                Some(game) => write_game(service, &game, out)?,
                None => writeln!(out, "{title} registered")?,
            }
        }
        Command::List => {
            let games = service.list()?;
            if games.is_empty() {
                writeln!(out, "no games stored")?;
            }
            for game in &games {
                write_game(service, game, out)?;
            }
        }
        Command::Show { title } => match service.find_by_title(&title)? {
            Some(game) => write_game(service, &game, out)?,
            None => bail!("no game titled {title:?}"),
        },
        Command::Classify { score } => {
            writeln!(out, "{}", service.classify(score)?)?;
        }
        Command::Demo => {
            for &(title, platform, hours, score) in DEMO_CATALOGUE {
                service.register(Some(title), platform, hours, score)?;
            }
            for game in service.list()? {
                write_game(service, &game, out)?;
            }
        }
    }
    Ok(())
}

fn write_game(service: &VideojuegoService, game: &Videojuego, out: &mut impl Write) -> Result<()> {
    let categoria = service.classify_game(game)?;
    let length = if service.is_long_game(game) {
        "long"
    } else {
        "short"
    };
    writeln!(
        out,
        "{:30} {:>4}h {:>3}  {:12} {}",
        game.display_name(),
        game.hours_played(),
        game.score(),
        categoria,
        length
    )?;
    Ok(())
}
