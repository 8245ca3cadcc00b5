use derive_more::Display;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("[line: {line}]: {message}")]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

/// Sink for lexical, syntax and runtime errors.
pub trait Reporter {
    fn report(&mut self, line: usize, message: &str);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, line: usize, message: &str) {
        self.push(Diagnostic {
            line,
            message: message.to_string(),
        });
    }
}

/// Writes every diagnostic to standard error.
#[derive(Debug, Default)]
pub struct StderrReporter {
    pub count: usize,
}

impl Reporter for StderrReporter {
    fn report(&mut self, line: usize, message: &str) {
        self.count += 1;
        debug!("diagnostic #{} on line {}", self.count, line);
        eprintln!(
            "{}",
            Diagnostic {
                line,
                message: message.to_string()
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let mut sink: Vec<Diagnostic> = vec![];
        sink.report(4, "Unterminated string");
        assert_eq!(sink[0].to_string(), "[line: 4]: Unterminated string");
    }
}
