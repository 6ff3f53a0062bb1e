pub mod builder;
pub mod registry;
pub mod resolver;

pub use builder::{RecipeGraph, RecipeGraphBuilder};
pub use registry::{RegisteredProduct, StepOutputRegistry};
pub use resolver::{resolve_ingredients, resolve_instruments, resolve_step, ResolutionReport};
