use thiserror::Error;

use crate::inputs::Field;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: Field, value: String },

    #[error("{field} must be greater than zero")]
    NotPositive { field: Field },

    #[error("interest rate cannot be negative: {rate}")]
    NegativeRate { rate: f64 },

    #[error("result is out of range: {message}")]
    OutOfRange { message: String },
}

impl CalculatorError {
    /// form field the error belongs to, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            CalculatorError::InvalidNumber { field, .. } => Some(*field),
            CalculatorError::NotPositive { field } => Some(*field),
            CalculatorError::NegativeRate { .. } => Some(Field::InterestRate),
            CalculatorError::OutOfRange { .. } => None,
        }
    }

    /// short message shown under the form field
    pub fn hint(&self) -> &'static str {
        match self {
            CalculatorError::InvalidNumber { .. } => "Enter a valid number",
            CalculatorError::NotPositive { .. } => "Must be greater than zero",
            CalculatorError::NegativeRate { .. } => "Cannot be negative",
            CalculatorError::OutOfRange { .. } => "Result is out of range",
        }
    }
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
