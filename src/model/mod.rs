pub mod defaults;
pub mod loader;
pub mod types;
pub mod validation;

pub use defaults::default_model;
pub use loader::{load_model, model_to_yaml, parse_model, DocumentFormat, ModelError};
pub use types::{indicator_key, Indicator, IndicatorEntry, Model, ModelDocument, Subcategories};
pub use validation::validate_model;
