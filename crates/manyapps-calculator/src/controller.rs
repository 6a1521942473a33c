//! Calculator view-controller: keypad events in, state and history out.

use manyapps_core::FeatureContext;

use crate::error::CalculatorError;
use crate::service::CalculatorService;
use crate::state::CalculatorState;
use crate::types::{format_number, parse_float, Calculation, Operation};

#[derive(Debug)]
pub struct CalculatorController {
    state: CalculatorState,
    service: CalculatorService,
    history_limit: usize,
}

impl CalculatorController {
    /// Activate the calculator feature with a fresh working state.
    pub fn activate(ctx: &FeatureContext) -> Self {
        tracing::info!("Calculator activated");
        Self::new(
            CalculatorState::new(),
            CalculatorService::new(ctx.store.clone()),
            ctx.config.calculator.history_limit,
        )
    }

    pub fn new(state: CalculatorState, service: CalculatorService, history_limit: usize) -> Self {
        Self {
            state,
            service,
            history_limit,
        }
    }

    /// Append a digit (or decimal point), replacing a lone "0".
    pub fn on_number_click(&mut self, digit: &str) {
        let current = self.state.display();
        let next = if current == "0" {
            digit.to_string()
        } else {
            format!("{current}{digit}")
        };
        self.state.update_display(next);
    }

    pub fn on_operation_click(&mut self, operation: Operation) {
        self.state.set_operation(operation);
        self.state.update_display("0");
    }

    /// Resolve the pending operation, if any.
    ///
    /// The pending operation and left operand stay in place, so pressing
    /// equals again re-applies them to the new display.
    ///
    /// # Errors
    ///
    /// Returns an error if the completed calculation cannot be persisted.
    /// The display already shows the result in that case.
    pub fn on_equals_click(&mut self) -> Result<(), CalculatorError> {
        let snapshot = self.state.get_state();
        let Some(operation) = snapshot.operation else {
            return Ok(());
        };

        let operand2 = parse_float(&snapshot.display);
        let result = self
            .service
            .calculate(snapshot.previous_value, operand2, operation.symbol());

        self.state.update_display(format_number(result));

        self.service.save_calculation(Calculation::new(
            snapshot.previous_value,
            operand2,
            operation.symbol(),
            result,
        ))
    }

    /// Remove the last character, collapsing to "0".
    pub fn on_delete(&mut self) {
        let current = self.state.display();
        let mut chars = current.chars();
        let next = if chars.clone().count() > 1 {
            chars.next_back();
            chars.as_str().to_string()
        } else {
            "0".to_string()
        };
        self.state.update_display(next);
    }

    pub fn on_clear(&mut self) {
        self.state.reset();
    }

    pub fn display(&self) -> &str {
        self.state.display()
    }

    pub fn current_operation(&self) -> Option<Operation> {
        self.state.current_operation()
    }

    /// Most recent calculations, newest first.
    pub fn history(&self) -> Vec<Calculation> {
        self.service.recent_history(self.history_limit)
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn service(&self) -> &CalculatorService {
        &self.service
    }
}
