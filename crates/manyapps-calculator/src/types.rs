use serde::{Deserialize, Serialize};

/// Arithmetic operator selectable on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Parse a keypad symbol (`+`, `-`, `*`, `/`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Apply the operator. Division by zero yields 0.
    pub fn apply(self, operand1: f64, operand2: f64) -> f64 {
        match self {
            Self::Add => operand1 + operand2,
            Self::Subtract => operand1 - operand2,
            Self::Multiply => operand1 * operand2,
            Self::Divide => {
                if operand2 != 0.0 {
                    operand1 / operand2
                } else {
                    0.0
                }
            }
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Returned when a string is not one of the four operator symbols.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation: {0:?}")]
pub struct UnknownOperation(pub String);

/// Immutable view of the calculator's working state.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorSnapshot {
    pub current_value: f64,
    pub previous_value: f64,
    pub operation: Option<Operation>,
    pub display: String,
}

impl Default for CalculatorSnapshot {
    fn default() -> Self {
        Self {
            current_value: 0.0,
            previous_value: 0.0,
            operation: None,
            display: "0".to_string(),
        }
    }
}

/// One completed calculation, as kept in the persisted history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    #[serde(deserialize_with = "nan_if_null")]
    pub operand1: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub operand2: f64,
    pub operation: String,
    /// NaN is written as JSON `null`
    #[serde(deserialize_with = "nan_if_null")]
    pub result: f64,
}

fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl Calculation {
    pub fn new(operand1: f64, operand2: f64, operation: impl Into<String>, result: f64) -> Self {
        Self {
            operand1,
            operand2,
            operation: operation.into(),
            result,
        }
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            format_number(self.operand1),
            self.operation,
            format_number(self.operand2),
            format_number(self.result)
        )
    }
}

/// Lenient numeral parsing: the longest leading decimal numeral wins.
///
/// Leading whitespace is skipped, trailing garbage is ignored
/// (`"12abc"` is 12), and input without a leading numeral is NaN.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Render a number for the display.
///
/// NaN, the infinities and negative zero all render as `"0"`, so the display
/// always holds a numeral.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
