use thiserror::Error;

use crate::token::Token;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Operand must be a number.")]
    OperandMustBeNumber(Token),

    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers(Token),

    #[error("Operands must be number or string.")]
    OperandsMustBeNumberOrString(Token),

    #[error("Division by zero.")]
    DivisionByZero(Token),

    #[error("Undefined variable '{}'.", .0.lexeme)]
    UndefinedVariable(Token),

    #[error("Unknown operator `{}`", .0.lexeme)]
    UnknownOperator(Token),

    #[error("Failed to write output: {1}")]
    WriteFailed(Token, std::io::Error),
}

impl Error {
    pub fn line(&self) -> usize {
        use Error::*;
        match self {
            OperandMustBeNumber(t)
            | OperandsMustBeNumbers(t)
            | OperandsMustBeNumberOrString(t)
            | DivisionByZero(t)
            | UndefinedVariable(t)
            | UnknownOperator(t)
            | WriteFailed(t, _) => t.line,
        }
    }
}
