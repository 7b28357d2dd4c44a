use thiserror::Error;

/// Client-side rejection raised before anything is sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field is missing: {0}")]
    MissingField(&'static str),

    #[error("at least one destination country must be selected")]
    NoCountrySelected,

    #[error("field {field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field {field} is not a valid e-mail address")]
    InvalidEmail { field: &'static str },

    #[error("target intake must be a YYYY-MM month: {0:?}")]
    InvalidIntake(String),

    #[error("at least one contact method is required")]
    NoContactMethod,
}
