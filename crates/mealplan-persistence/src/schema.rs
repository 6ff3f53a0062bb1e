//! Esquema Diesel (escrito a mano, equivalente a `diesel print-schema`).

diesel::table! {
    recipes (id) {
        id -> Uuid,
        name -> Text,
        slug -> Text,
        source -> Text,
        description -> Text,
        inspired_by_recipe_id -> Nullable<Uuid>,
        min_estimated_portions -> Float4,
        max_estimated_portions -> Nullable<Float4>,
        portion_name -> Text,
        plural_portion_name -> Text,
        seal_of_approval -> Bool,
        created_by_user -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_steps (id) {
        id -> Uuid,
        belongs_to_recipe -> Uuid,
        step_index -> Int4,
        preparation_id -> Text,
        min_estimated_time_secs -> Nullable<Int4>,
        max_estimated_time_secs -> Nullable<Int4>,
        min_temperature_c -> Nullable<Float4>,
        max_temperature_c -> Nullable<Float4>,
        notes -> Text,
        explicit_instructions -> Text,
        optional -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_step_products (id) {
        id -> Uuid,
        belongs_to_recipe_step -> Uuid,
        name -> Text,
        product_type -> Text,
        measurement_unit_id -> Nullable<Text>,
        min_quantity -> Nullable<Float4>,
        max_quantity -> Nullable<Float4>,
        quantity_notes -> Text,
        compostable -> Bool,
        max_storage_duration_secs -> Nullable<Int4>,
        min_storage_temperature_c -> Nullable<Float4>,
        max_storage_temperature_c -> Nullable<Float4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_step_ingredients (id) {
        id -> Uuid,
        belongs_to_recipe_step -> Uuid,
        name -> Text,
        ingredient_id -> Nullable<Text>,
        measurement_unit_id -> Text,
        min_quantity -> Float4,
        max_quantity -> Nullable<Float4>,
        quantity_notes -> Text,
        ingredient_notes -> Text,
        optional -> Bool,
        option_index -> Int4,
        requires_defrost -> Bool,
        product_of_recipe_step -> Bool,
        recipe_step_product_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_step_instruments (id) {
        id -> Uuid,
        belongs_to_recipe_step -> Uuid,
        name -> Text,
        instrument_id -> Nullable<Text>,
        product_of_recipe_step -> Bool,
        recipe_step_product_id -> Nullable<Uuid>,
        notes -> Text,
        preference_rank -> Int4,
        optional -> Bool,
        min_quantity -> Int4,
        max_quantity -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    meals (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        created_by_user -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    meal_recipes (id) {
        id -> Uuid,
        meal_id -> Uuid,
        recipe_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipe_steps -> recipes (belongs_to_recipe));
diesel::joinable!(recipe_step_products -> recipe_steps (belongs_to_recipe_step));
diesel::joinable!(recipe_step_ingredients -> recipe_steps (belongs_to_recipe_step));
diesel::joinable!(recipe_step_instruments -> recipe_steps (belongs_to_recipe_step));
diesel::joinable!(meal_recipes -> meals (meal_id));
diesel::joinable!(meal_recipes -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    recipes,
    recipe_steps,
    recipe_step_products,
    recipe_step_ingredients,
    recipe_step_instruments,
    meals,
    meal_recipes,
);
