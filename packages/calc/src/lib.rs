//! Arithmetic with a calculation history.
//!
//! Contract violations (zero divisor, negative input to [`factorial`] or
//! [`fibonacci`]) are returned to the immediate caller as [`CalcError`]s,
//! never absorbed. A failed operation leaves the history untouched.

/// Contract violations raised by calculator operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CalcError {
    #[error("Cannot divide by zero")]
    DivideByZero,

    #[error("Not defined for negative input: {input}")]
    NegativeInput { input: i64 },

    #[error("Result overflows at term {term}")]
    Overflow { term: u32 },
}

/// A calculator that records each successful operation as a history line of
/// the form `"{a} {op} {b} = {result}"`.
#[derive(Debug, Default)]
pub struct Calculator {
    history: Vec<String>,
}

impl Calculator {
    pub fn new() -> Calculator {
        Calculator::default()
    }

    pub fn add(&mut self, a: f64, b: f64) -> f64 {
        let result = a + b;
        self.record(a, "+", b, result);
        result
    }

    pub fn subtract(&mut self, a: f64, b: f64) -> f64 {
        let result = a - b;
        self.record(a, "-", b, result);
        result
    }

    pub fn multiply(&mut self, a: f64, b: f64) -> f64 {
        let result = a * b;
        self.record(a, "*", b, result);
        result
    }

    /// Divide `a` by `b`. A zero divisor is a contract violation: the error
    /// is returned and no history entry is recorded.
    pub fn divide(&mut self, a: f64, b: f64) -> Result<f64, CalcError> {
        if b == 0.0 {
            log::error!("Division by zero: {} / {}", a, b);
            return Err(CalcError::DivideByZero);
        }

        let result = a / b;
        self.record(a, "/", b, result);
        Ok(result)
    }

    pub fn power(&mut self, base: f64, exponent: f64) -> f64 {
        let result = base.powf(exponent);
        self.record(base, "**", exponent, result);
        result
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        log::info!("History cleared");
    }

    fn record(&mut self, a: f64, op: &str, b: f64, result: f64) {
        let entry = format!("{} {} {} = {}", a, op, b, result);
        log::info!("{}", entry);
        self.history.push(entry);
    }
}

/// Factorial of `n`.
///
/// Negative input is a contract violation. Returns `u128`, which holds up to
/// 34!; larger inputs fail with [`CalcError::Overflow`] rather than wrapping.
pub fn factorial(n: i64) -> Result<u128, CalcError> {
    if n < 0 {
        return Err(CalcError::NegativeInput { input: n });
    }

    let mut result: u128 = 1;
    for i in 2..=n as u128 {
        result = result
            .checked_mul(i)
            .ok_or(CalcError::Overflow { term: i as u32 })?;
    }

    log::info!("Factorial: {}! = {}", n, result);
    Ok(result)
}

/// The first `n` Fibonacci numbers, starting from 0.
///
/// A negative term count is a contract violation.
pub fn fibonacci(n: i64) -> Result<Vec<u128>, CalcError> {
    if n < 0 {
        return Err(CalcError::NegativeInput { input: n });
    }

    let n = n as usize;
    let mut sequence = Vec::with_capacity(n);
    for i in 0..n {
        let next = match i {
            0 => 0,
            1 => 1,
            _ => {
                let (a, b): (u128, u128) = (sequence[i - 2], sequence[i - 1]);
                a.checked_add(b)
                    .ok_or(CalcError::Overflow { term: i as u32 })?
            }
        };
        sequence.push(next);
    }

    log::info!("Generated Fibonacci sequence with {} terms", n);
    Ok(sequence)
}
