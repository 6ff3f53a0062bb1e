//! CLI mínima:
//! - `mealplan create --file <recipe.json> [--dry-run] [--also-create-meal]`
//! - `mealplan show --id <UUID>`
//!
//! Sin `--dry-run` requiere DATABASE_URL; con `--dry-run` la receta se
//! escribe en el transporte en memoria y sólo se imprime.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use mealplan_core::{InMemoryTransport, Recipe, RecipeCreationError, RecipeCreationInput, RecipeCreator, Transport};
use mealplan_persistence::{PersistenceError, PgRecipeReader, PoolProvider};
use thiserror::Error;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "mealplan", version, about = "Creación transaccional de recetas como grafo de steps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crea una receta a partir de un payload JSON (camelCase)
    Create {
        #[arg(long)]
        file: PathBuf,
        /// Construye y escribe en memoria, sin base de datos
        #[arg(long)]
        dry_run: bool,
        /// Fuerza la creación de la comida acompañante
        #[arg(long)]
        also_create_meal: bool,
    },
    /// Lee una receta persistida y la imprime como JSON
    Show {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("no se pudo leer {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("payload inválido: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("requiere DATABASE_URL (o use --dry-run)")]
    MissingDatabase,
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Creation(#[from] RecipeCreationError),
    #[error("receta no encontrada: {0}")]
    NotFound(Uuid),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Read { .. } | Self::Payload(_) => 2,
            Self::Creation(_) => 3,
            Self::NotFound(_) => 4,
            Self::MissingDatabase | Self::Persistence(_) => 5,
        }
    }
}

fn main() {
    // Cargar .env si existe para obtener DATABASE_URL
    let _ = dotenvy::dotenv();
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("[mealplan] {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Create { file, dry_run, also_create_meal } => {
            let raw = std::fs::read_to_string(&file).map_err(|source| CliError::Read { path: file.clone(), source })?;
            let mut input: RecipeCreationInput = serde_json::from_str(&raw)?;
            input.also_create_meal |= also_create_meal;
            let recipe = if dry_run {
                create_with(InMemoryTransport::new(), input)?
            } else {
                if std::env::var("DATABASE_URL").is_err() {
                    return Err(CliError::MissingDatabase);
                }
                create_with(mealplan_persistence::transport_from_env()?, input)?
            };
            info!("recipe {} created (dry_run={dry_run})", recipe.id);
            print_json(&recipe)
        }
        Command::Show { id } => {
            if std::env::var("DATABASE_URL").is_err() {
                return Err(CliError::MissingDatabase);
            }
            let reader = PgRecipeReader::new(PoolProvider { pool: mealplan_persistence::build_dev_pool_from_env()? });
            let recipe = reader.recipe(id)?.ok_or(CliError::NotFound(id))?;
            print_json(&recipe)
        }
    }
}

fn create_with<T: Transport>(transport: T, input: RecipeCreationInput) -> Result<Recipe, CliError> {
    Ok(RecipeCreator::new(transport).create_recipe(input)?)
}

fn print_json(recipe: &Recipe) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(recipe)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_flags() {
        let cli = Cli::try_parse_from(["mealplan", "create", "--file", "demos/sopa_de_frijol.json", "--dry-run"]).unwrap();
        match cli.command {
            Command::Create { file, dry_run, also_create_meal } => {
                assert_eq!(file, PathBuf::from("demos/sopa_de_frijol.json"));
                assert!(dry_run);
                assert!(!also_create_meal);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_uuid() {
        assert!(Cli::try_parse_from(["mealplan", "show", "--id", "not-a-uuid"]).is_err());
    }

    #[test]
    fn dry_run_creates_in_memory() {
        let input = RecipeCreationInput::new("tortillas", "u1");
        let recipe = create_with(InMemoryTransport::new(), input).unwrap();
        assert!(recipe.created_at.is_some());
    }

    #[test]
    fn exit_codes_by_failure_class() {
        assert_eq!(CliError::MissingDatabase.exit_code(), 5);
        assert_eq!(CliError::NotFound(Uuid::nil()).exit_code(), 4);
        let bad: serde_json::Error = serde_json::from_str::<RecipeCreationInput>("{").unwrap_err();
        assert_eq!(CliError::from(bad).exit_code(), 2);
    }
}
