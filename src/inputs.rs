use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculator::{self, RepaymentResult};
use crate::error::{CalculatorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RepaymentType {
    #[default]
    Repayment,
    InterestOnly,
}

impl RepaymentType {
    pub fn toggle(self) -> Self {
        match self {
            RepaymentType::Repayment => RepaymentType::InterestOnly,
            RepaymentType::InterestOnly => RepaymentType::Repayment,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepaymentType::Repayment => "Repayment",
            RepaymentType::InterestOnly => "Interest Only",
        }
    }
}

/// form fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Principal,
    TermYears,
    InterestRate,
    RepaymentType,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Principal,
        Field::TermYears,
        Field::InterestRate,
        Field::RepaymentType,
    ];

    pub fn next(self) -> Self {
        match self {
            Field::Principal => Field::TermYears,
            Field::TermYears => Field::InterestRate,
            Field::InterestRate => Field::RepaymentType,
            Field::RepaymentType => Field::Principal,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Field::Principal => Field::RepaymentType,
            Field::TermYears => Field::Principal,
            Field::InterestRate => Field::TermYears,
            Field::RepaymentType => Field::InterestRate,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Principal => "mortgage amount",
            Field::TermYears => "mortgage term",
            Field::InterestRate => "interest rate",
            Field::RepaymentType => "mortgage type",
        };
        f.write_str(name)
    }
}

/// raw form values, exactly as typed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoanInputs {
    pub principal: String,
    pub term_years: String,
    pub interest_rate: String,
    pub repayment_type: Option<RepaymentType>,
}

/// which required fields are missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldErrors {
    pub principal: bool,
    pub term_years: bool,
    pub interest_rate: bool,
    pub repayment_type: bool,
}

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        !(self.principal || self.term_years || self.interest_rate || self.repayment_type)
    }

    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Principal => self.principal,
            Field::TermYears => self.term_years,
            Field::InterestRate => self.interest_rate,
            Field::RepaymentType => self.repayment_type,
        }
    }

    pub fn missing(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| self.get(*f)).collect()
    }
}

/// parsed numeric loan terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    pub term_years: f64,
    pub annual_rate_percent: f64,
    pub repayment_type: RepaymentType,
}

impl LoanTerms {
    pub fn repayment(&self) -> Result<RepaymentResult> {
        calculator::calculate(
            self.principal,
            self.term_years,
            self.annual_rate_percent,
            self.repayment_type,
        )
    }
}

impl LoanInputs {
    /// empty principal, the given term and rate, repayment type reset to Repayment
    pub fn with_defaults(term_years: &str, interest_rate: &str) -> Self {
        Self {
            principal: String::new(),
            term_years: term_years.to_string(),
            interest_rate: interest_rate.to_string(),
            repayment_type: Some(RepaymentType::Repayment),
        }
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Principal => Some(&self.principal),
            Field::TermYears => Some(&self.term_years),
            Field::InterestRate => Some(&self.interest_rate),
            Field::RepaymentType => None,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Principal => Some(&mut self.principal),
            Field::TermYears => Some(&mut self.term_years),
            Field::InterestRate => Some(&mut self.interest_rate),
            Field::RepaymentType => None,
        }
    }

    /// Converts the text fields into numbers.
    ///
    /// Expects `validate` to have passed: a missing field reads as malformed here.
    pub fn parse(&self) -> Result<LoanTerms> {
        let repayment_type = self.repayment_type.ok_or(CalculatorError::InvalidNumber {
            field: Field::RepaymentType,
            value: String::new(),
        })?;

        Ok(LoanTerms {
            principal: parse_number(Field::Principal, &self.principal)?,
            term_years: parse_number(Field::TermYears, &self.term_years)?,
            annual_rate_percent: parse_number(Field::InterestRate, &self.interest_rate)?,
            repayment_type,
        })
    }
}

/// Flags every required field that is empty.
///
/// Only presence is checked; `"abc"` counts as present and is rejected later by
/// [`LoanInputs::parse`].
pub fn validate(inputs: &LoanInputs) -> FieldErrors {
    FieldErrors {
        principal: inputs.principal.is_empty(),
        term_years: inputs.term_years.is_empty(),
        interest_rate: inputs.interest_rate.is_empty(),
        repayment_type: inputs.repayment_type.is_none(),
    }
}

fn parse_number(field: Field, text: &str) -> Result<f64> {
    let invalid = || CalculatorError::InvalidNumber {
        field,
        value: text.to_string(),
    };
    // f64's FromStr accepts "inf" and "NaN"
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> LoanInputs {
        LoanInputs {
            principal: "200000".to_string(),
            term_years: "25".to_string(),
            interest_rate: "5.25".to_string(),
            repayment_type: Some(RepaymentType::Repayment),
        }
    }

    fn clear_field(inputs: &mut LoanInputs, field: Field) {
        match inputs.value_mut(field) {
            Some(value) => value.clear(),
            None => inputs.repayment_type = None,
        }
    }

    #[test]
    fn test_complete_inputs_are_valid() {
        let errors = validate(&filled());
        assert!(errors.is_valid());
        assert!(errors.missing().is_empty());
    }

    #[test]
    fn test_single_missing_field_flags_only_that_field() {
        for field in Field::ALL {
            let mut inputs = filled();
            clear_field(&mut inputs, field);

            let errors = validate(&inputs);
            assert!(!errors.is_valid(), "{field} should block calculation");
            assert_eq!(errors.missing(), vec![field]);
        }
    }

    #[test]
    fn test_empty_form_flags_every_field() {
        let errors = validate(&LoanInputs::default());
        assert_eq!(errors.missing(), Field::ALL.to_vec());
    }

    #[test]
    fn test_malformed_number_counts_as_present() {
        let mut inputs = filled();
        inputs.principal = "abc".to_string();
        assert!(validate(&inputs).is_valid());
    }

    #[test]
    fn test_parse_rejects_malformed_number() {
        let mut inputs = filled();
        inputs.interest_rate = "1.2.3".to_string();

        let err = inputs.parse().unwrap_err();
        assert_eq!(
            err,
            CalculatorError::InvalidNumber {
                field: Field::InterestRate,
                value: "1.2.3".to_string(),
            }
        );
        assert_eq!(err.field(), Some(Field::InterestRate));
    }

    #[test]
    fn test_parse_rejects_non_finite_values() {
        for text in ["inf", "NaN", "-infinity"] {
            let mut inputs = filled();
            inputs.term_years = text.to_string();
            assert!(matches!(
                inputs.parse(),
                Err(CalculatorError::InvalidNumber { field: Field::TermYears, .. })
            ));
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let mut inputs = filled();
        inputs.principal = " 150000 ".to_string();

        let terms = inputs.parse().unwrap();
        assert_eq!(terms.principal, 150_000.0);
        assert_eq!(terms.term_years, 25.0);
        assert_eq!(terms.annual_rate_percent, 5.25);
        assert_eq!(terms.repayment_type, RepaymentType::Repayment);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut field = Field::Principal;
        for _ in 0..Field::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, Field::Principal);
        assert_eq!(Field::Principal.previous(), Field::RepaymentType);
    }

    #[test]
    fn test_repayment_type_toggle() {
        assert_eq!(RepaymentType::Repayment.toggle(), RepaymentType::InterestOnly);
        assert_eq!(RepaymentType::InterestOnly.toggle(), RepaymentType::Repayment);
        assert_eq!(RepaymentType::default(), RepaymentType::Repayment);
    }
}
