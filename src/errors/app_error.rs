use mealplan_core::RecipeCreationError;
use mealplan_persistence::PersistenceError;
use thiserror::Error;

/// Errores de la aplicación (facade + demo).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Error creando receta: {0}")]
    Creation(#[from] RecipeCreationError),
}

impl AppError {
    /// Config inválida a nivel de persistencia también es config.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Persistence(PersistenceError::Config(_)))
    }
}
