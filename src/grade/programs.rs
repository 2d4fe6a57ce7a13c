#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Canned "programs" the mock evaluator runs over a test case's input.

use itertools::Itertools;

/// Failures raised while running a canned program over a test input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// The expression had no tokens at all.
    #[error("Empty postfix expression")]
    EmptyExpression,
    /// An operator was reached with fewer than two operands on the stack.
    #[error("Invalid postfix expression: operator `{0}` needs two operands")]
    InsufficientOperands(String),
    /// A token was neither an integer nor a supported operator.
    #[error("Invalid token in postfix expression: `{0}`")]
    InvalidToken(String),
    /// Division with a zero right-hand operand.
    #[error("Division by zero in postfix expression")]
    DivisionByZero,
    /// An intermediate value did not fit in 64 bits.
    #[error("Arithmetic overflow in postfix expression")]
    Overflow,
}

/// Returns whether every bracket in `input` is closed in the right order.
/// Characters other than `()[]{}` are ignored.
pub fn is_balanced(input: &str) -> bool {
    let mut stack = Vec::new();
    for c in input.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}

/// Evaluates a whitespace separated postfix expression over `i64`.
///
/// Division floors the quotient, so `-7 2 /` yields `-4`.
pub fn eval_postfix(expr: &str) -> Result<i64, ProgramError> {
    let mut stack: Vec<i64> = Vec::new();

    for token in expr.split_whitespace() {
        match token {
            "+" | "-" | "*" | "/" => {
                let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                    return Err(ProgramError::InsufficientOperands(token.to_string()));
                };
                let value = match token {
                    "+" => a.checked_add(b),
                    "-" => a.checked_sub(b),
                    "*" => a.checked_mul(b),
                    _ => floor_div(a, b)?,
                }
                .ok_or(ProgramError::Overflow)?;
                stack.push(value);
            }
            _ => {
                let value = token
                    .parse::<i64>()
                    .map_err(|_| ProgramError::InvalidToken(token.to_string()))?;
                stack.push(value);
            }
        }
    }

    stack.pop().ok_or(ProgramError::EmptyExpression)
}

/// Floored integer division; `None` on overflow.
fn floor_div(a: i64, b: i64) -> Result<Option<i64>, ProgramError> {
    if b == 0 {
        return Err(ProgramError::DivisionByZero);
    }
    Ok(a.checked_div(b).map(|q| {
        if (a % b != 0) && ((a < 0) != (b < 0)) {
            q - 1
        } else {
            q
        }
    }))
}

/// Input tokens in reverse order, joined by a single space.
pub fn reverse_tokens(input: &str) -> String {
    input.split_whitespace().rev().join(" ")
}

/// Input tokens rendered as a linked list, e.g. `1 -> 2 -> 3`.
pub fn insert_tokens(input: &str) -> String {
    input.split_whitespace().join(" -> ")
}

/// Input tokens without the head node, rendered as a linked list.
pub fn delete_head(input: &str) -> String {
    input.split_whitespace().skip(1).join(" -> ")
}
