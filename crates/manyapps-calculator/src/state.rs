//! Calculator state holder.
//!
//! Owns the single working snapshot; views read it through accessors and
//! every mutation goes through one of the methods below.

use crate::types::{parse_float, CalculatorSnapshot, Operation};

#[derive(Debug, Default)]
pub struct CalculatorState {
    state: CalculatorSnapshot,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the display verbatim.
    pub fn update_display(&mut self, value: impl Into<String>) {
        self.state.display = value.into();
    }

    /// Commit the display as the left operand and remember `operation`.
    ///
    /// A display that is not a numeral becomes NaN.
    pub fn set_operation(&mut self, operation: Operation) {
        self.state.previous_value = parse_float(&self.state.display);
        self.state.current_value = 0.0;
        self.state.operation = Some(operation);
        tracing::debug!(
            "Operation {} pending with left operand {}",
            operation,
            self.state.previous_value
        );
    }

    pub fn reset(&mut self) {
        self.state = CalculatorSnapshot::default();
    }

    pub fn get_state(&self) -> CalculatorSnapshot {
        self.state.clone()
    }

    pub fn display(&self) -> &str {
        &self.state.display
    }

    pub fn current_operation(&self) -> Option<Operation> {
        self.state.operation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = CalculatorState::new();
        assert_eq!(state.get_state(), CalculatorSnapshot::default());
        assert_eq!(state.display(), "0");
        assert_eq!(state.current_operation(), None);
    }

    #[test]
    fn test_update_display_is_verbatim() {
        let mut state = CalculatorState::new();
        state.update_display("007.50");
        assert_eq!(state.display(), "007.50");
    }

    #[test]
    fn test_set_operation_captures_previous_value() {
        let mut state = CalculatorState::new();
        state.update_display("25");
        state.set_operation(Operation::Add);

        let snapshot = state.get_state();
        assert_eq!(snapshot.previous_value, 25.0);
        assert_eq!(snapshot.current_value, 0.0);
        assert_eq!(snapshot.operation, Some(Operation::Add));
        // display is the controller's concern
        assert_eq!(snapshot.display, "25");
    }

    #[test]
    fn test_set_operation_with_malformed_display_is_nan() {
        let mut state = CalculatorState::new();
        state.update_display("abc");
        state.set_operation(Operation::Multiply);
        assert!(state.get_state().previous_value.is_nan());
    }

    #[test]
    fn test_set_operation_replaces_previous_operation() {
        let mut state = CalculatorState::new();
        state.set_operation(Operation::Add);
        state.update_display("4");
        state.set_operation(Operation::Divide);
        assert_eq!(state.current_operation(), Some(Operation::Divide));
        assert_eq!(state.get_state().previous_value, 4.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = CalculatorState::new();
        state.update_display("99");
        state.set_operation(Operation::Subtract);
        state.reset();
        assert_eq!(state.get_state(), CalculatorSnapshot::default());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = CalculatorState::new();
        let before = state.get_state();
        state.update_display("12");
        assert_eq!(before.display, "0");
    }
}
