//! Carga de configuración de conexión desde variables de entorno.
//! Usa convención `DATABASE_URL` y parámetros opcionales de pool.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::error::PersistenceError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_MIN_CONNECTIONS: u32 = 2;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, PersistenceError> {
        Lazy::force(&DOTENV_LOADED);
        let url = env::var("DATABASE_URL").map_err(|_| PersistenceError::Config("DATABASE_URL no definido".into()))?;
        Self::from_parts(url,
                         env::var("DATABASE_MIN_CONNECTIONS").ok().as_deref(),
                         env::var("DATABASE_MAX_CONNECTIONS").ok().as_deref())
    }

    /// Construye la config a partir de valores crudos; los tamaños ausentes
    /// toman el default y los no numéricos son error.
    pub fn from_parts(url: String, min: Option<&str>, max: Option<&str>) -> Result<Self, PersistenceError> {
        if url.trim().is_empty() {
            return Err(PersistenceError::Config("DATABASE_URL vacío".into()));
        }
        Ok(Self { url,
                  min_connections: parse_size("DATABASE_MIN_CONNECTIONS", min, DEFAULT_MIN_CONNECTIONS)?,
                  max_connections: parse_size("DATABASE_MAX_CONNECTIONS", max, DEFAULT_MAX_CONNECTIONS)? })
    }
}

fn parse_size(var: &str, raw: Option<&str>, default: u32) -> Result<u32, PersistenceError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim()
                    .parse()
                    .map_err(|_| PersistenceError::Config(format!("{var} no es un entero: {v}"))),
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_default_when_absent() {
        let cfg = DbConfig::from_parts("postgres://localhost/mealplan".into(), None, None).unwrap();
        assert_eq!(cfg.min_connections, DEFAULT_MIN_CONNECTIONS);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn bad_sizes_and_blank_url_are_config_errors() {
        assert!(matches!(DbConfig::from_parts("postgres://x".into(), Some("many"), None),
                         Err(PersistenceError::Config(_))));
        assert!(matches!(DbConfig::from_parts(" ".into(), None, None), Err(PersistenceError::Config(_))));
        let cfg = DbConfig::from_parts("postgres://x".into(), Some(" 4 "), Some("8")).unwrap();
        assert_eq!((cfg.min_connections, cfg.max_connections), (4, 8));
    }
}
