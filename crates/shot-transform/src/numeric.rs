//! Numeric coercion utilities.

/// Outcome of reading a source cell as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Value(f64),
    /// Blank cell.
    Missing,
    /// Non-blank cell that is not a finite number.
    Invalid,
}

impl Coerced {
    pub fn value(self) -> Option<f64> {
        match self {
            Coerced::Value(value) => Some(value),
            Coerced::Missing | Coerced::Invalid => None,
        }
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Reads a cell as a finite number. `NaN` and infinities count as invalid.
pub fn coerce_numeric(value: &str) -> Coerced {
    if value.trim().is_empty() {
        return Coerced::Missing;
    }
    match parse_f64(value) {
        Some(number) if number.is_finite() => Coerced::Value(number),
        _ => Coerced::Invalid,
    }
}
