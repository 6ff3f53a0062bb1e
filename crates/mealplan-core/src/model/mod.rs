pub mod input;
pub mod meal;
pub mod recipe;
pub mod step;

pub use input::{RecipeCreationInput, RecipeStepCreationInput, RecipeStepIngredientCreationInput,
                RecipeStepInstrumentCreationInput, RecipeStepProductCreationInput};
pub use meal::{Meal, MealRecipe};
pub use recipe::Recipe;
pub use step::{ProductPointer, ProductType, RecipeStep, RecipeStepIngredient, RecipeStepInstrument, RecipeStepProduct};
