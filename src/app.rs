use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::calculator::RepaymentResult;
use crate::config::Settings;
use crate::error::CalculatorError;
use crate::inputs::{self, Field, FieldErrors, LoanInputs};

pub struct App {
    pub inputs: LoanInputs,
    pub focus: Field,
    pub errors: FieldErrors,
    /// last parse or range failure from Calculate
    pub problem: Option<CalculatorError>,
    pub result: Option<RepaymentResult>,
    pub settings: Settings,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            inputs: LoanInputs::with_defaults(
                &settings.default_term_years,
                &settings.default_interest_rate,
            ),
            focus: Field::Principal,
            errors: FieldErrors::default(),
            problem: None,
            result: None,
            settings,
        }
    }

    /// "Calculate Repayment": validates, then replaces the result.
    /// A rejected form keeps the previous result on screen.
    pub fn calculate_repayment(&mut self) {
        self.errors = inputs::validate(&self.inputs);
        self.problem = None;

        if !self.errors.is_valid() {
            log::info!("calculation blocked, missing {:?}", self.errors.missing());
            return;
        }

        match self.inputs.parse().and_then(|terms| terms.repayment()) {
            Ok(result) => {
                log::info!(
                    "monthly {} total {}",
                    result.monthly_payment,
                    result.total_repayment
                );
                self.result = Some(result);
            }
            Err(err) => {
                log::warn!("calculation rejected: {}", err);
                self.problem = Some(err);
            }
        }
    }

    /// "Clear All": back to the configured defaults, results dropped.
    pub fn clear_all(&mut self) {
        self.inputs = LoanInputs::with_defaults(
            &self.settings.default_term_years,
            &self.settings.default_interest_rate,
        );
        self.errors = FieldErrors::default();
        self.problem = None;
        self.result = None;
        self.focus = Field::Principal;
        log::debug!("form cleared");
    }

    /// message shown under a field, if any
    pub fn field_message(&self, field: Field) -> Option<&'static str> {
        if self.errors.get(field) {
            return Some("This field is required");
        }
        self.problem
            .as_ref()
            .filter(|problem| problem.field() == Some(field))
            .map(CalculatorError::hint)
    }

    /// failure that belongs to no single field, shown in the results panel
    pub fn general_problem(&self) -> Option<&CalculatorError> {
        self.problem.as_ref().filter(|problem| problem.field().is_none())
    }

    /// Handles one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Char('c') | KeyCode::Char('C') => self.clear_all(),
            KeyCode::Enter => self.calculate_repayment(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.focus == Field::RepaymentType =>
            {
                let current = self.inputs.repayment_type.unwrap_or_default();
                self.inputs.repayment_type = Some(current.toggle());
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                if let Some(value) = self.inputs.value_mut(self.focus) {
                    value.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(value) = self.inputs.value_mut(self.focus) {
                    value.pop();
                }
            }
            _ => {}
        }
        false
    }
}
