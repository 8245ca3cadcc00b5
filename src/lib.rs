pub mod ast;
pub mod diagnostics;
pub mod interpret;
pub mod parse;
pub mod token;

use log::trace;
use thiserror::Error;

use crate::diagnostics::Reporter;
use crate::interpret::{Environment, Interpreter};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{count} lexical or syntax error(s)")]
    Static { count: usize },

    #[error("Runtime error: {0}")]
    Runtime(#[from] interpret::Error),
}

/// Scans, parses and interprets one unit of source. Every lexical and syntax
/// error is reported before giving up; nothing is executed if there was any.
pub fn run(
    input: &str,
    itp: &mut Interpreter,
    env: &mut Environment,
    reporter: &mut dyn Reporter,
) -> Result<(), RunError> {
    let lexed = parse::lex(input);
    for err in &lexed.errors {
        reporter.report(err.line(), &err.to_string());
    }

    let parsed = parse::parse(&lexed.tokens);
    for err in &parsed.errors {
        reporter.report(err.line(), &err.to_string());
    }

    let count = lexed.errors.len() + parsed.errors.len();
    if count > 0 {
        return Err(RunError::Static { count });
    }
    trace!("{:?}", &parsed.statements);

    itp.interpret(&parsed.statements, env).map_err(|err| {
        reporter.report(err.line(), &err.to_string());
        RunError::from(err)
    })
}
