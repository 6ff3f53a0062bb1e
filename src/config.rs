//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y agrega la configuración
//! de base de datos (opcional: sin DATABASE_URL se trabaja en memoria) con
//! los defaults de creación de recetas.
use std::env;

use mealplan_persistence::DbConfig;
use once_cell::sync::Lazy;

use crate::errors::AppError;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` si no hay DATABASE_URL.
    pub database: Option<DbConfig>,
    /// Default de `also_create_meal` para payloads que no lo fijan
    /// (MEALPLAN_ALSO_CREATE_MEAL).
    pub also_create_meal: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables inyectable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database = match lookup("DATABASE_URL") {
            None => None,
            Some(url) => Some(DbConfig::from_parts(url,
                                                   lookup("DATABASE_MIN_CONNECTIONS").as_deref(),
                                                   lookup("DATABASE_MAX_CONNECTIONS").as_deref())?),
        };
        let also_create_meal = match lookup("MEALPLAN_ALSO_CREATE_MEAL").as_deref().map(str::trim) {
            None | Some("") => false,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => return Err(AppError::Config(format!("MEALPLAN_ALSO_CREATE_MEAL inválido: {other}"))),
        };
        Ok(Self { database, also_create_meal })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn no_database_url_means_in_memory() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.database, None);
        assert!(!cfg.also_create_meal);
    }

    #[test]
    fn reads_database_and_meal_default() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/mealplan"),
                                                       ("DATABASE_MAX_CONNECTIONS", "4"),
                                                       ("MEALPLAN_ALSO_CREATE_MEAL", "true")])).unwrap();
        let db = cfg.database.unwrap();
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, 2);
        assert!(cfg.also_create_meal);
    }

    #[test]
    fn rejects_garbage_flag() {
        let err = AppConfig::from_lookup(lookup_from(&[("MEALPLAN_ALSO_CREATE_MEAL", "quizás")])).unwrap_err();
        assert_eq!(err.to_string(), "Error de configuración: MEALPLAN_ALSO_CREATE_MEAL inválido: quizás");
    }
}
