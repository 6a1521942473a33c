use std::fmt::Write;

use manyapps_calculator::CalculatorController;

pub fn render(calculator: &CalculatorController) -> String {
    let mut out = String::new();

    let pending = calculator
        .current_operation()
        .map(|op| op.symbol())
        .unwrap_or(" ");
    let _ = writeln!(out, "+----------------------+");
    let _ = writeln!(out, "| {} {:>18} |", pending, calculator.display());
    let _ = writeln!(out, "+----------------------+");
    let _ = writeln!(out, "keys: 0-9 .  + - * /  =  del  c");

    let history = calculator.history();
    let _ = writeln!(out);
    if history.is_empty() {
        let _ = writeln!(out, "History: (empty)");
    } else {
        let _ = writeln!(out, "History:");
        for calculation in &history {
            let _ = writeln!(out, "  {}", calculation);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use manyapps_calculator::Operation;
    use manyapps_core::{Config, FeatureContext, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_render_shows_display_and_history() {
        let ctx = FeatureContext::new(Arc::new(Config::default()), MemoryStore::shared());
        let mut c = CalculatorController::activate(&ctx);
        assert!(render(&c).contains("History: (empty)"));

        c.on_number_click("4");
        c.on_operation_click(Operation::Multiply);
        c.on_number_click("3");
        c.on_equals_click().unwrap();

        let page = render(&c);
        assert!(page.contains("12 |"));
        assert!(page.contains("4 * 3 = 12"));
    }
}
