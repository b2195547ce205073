//! Building link records and validating space configurations.

mod mutate;
mod validate;

pub use mutate::build_link;
pub use validate::{
    DraftField, FieldError, ValidationOutcome, check_required, validate_config,
};
