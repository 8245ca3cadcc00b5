use std::{cell::RefCell, process::ExitCode, rc::Rc};

use log::{debug, error, info};
use lox_tree::{
    diagnostics::StderrReporter,
    interpret::{Environment, Interpreter},
    run, RunError,
};
use rustyline::{error::ReadlineError, DefaultEditor};

type DynResult = Result<ExitCode, Box<dyn std::error::Error>>;

fn main() -> DynResult {
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Err(e) = dotenv {
        debug!("dotenvy load with error {}", e);
    }

    let args = std::env::args().collect::<Vec<String>>();
    debug!("{:?}", args);

    match args.as_slice() {
        [_] => repl(),
        [_, file_path] => read_from_file(file_path),
        _ => {
            let program = args.first().map(String::as_str).unwrap_or("lox-tree");
            println!("Usage: {} [script]", program);
            Ok(ExitCode::from(64))
        }
    }
}

fn repl() -> DynResult {
    info!("Running in REPL mode");

    let mut rl = DefaultEditor::new()?;

    let rc = Rc::new(RefCell::new(std::io::stdout()));
    let mut itp = Interpreter::new(rc);
    // bindings survive from one line to the next
    let mut env = Environment::new();
    let mut reporter = StderrReporter::default();

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                rl.add_history_entry(&line)?;
                if let Err(e) = run(line.trim_end(), &mut itp, &mut env, &mut reporter) {
                    debug!("{}", e);
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => break,
            Err(err) => {
                return Err(Box::new(err));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_from_file(file_path: &str) -> DynResult {
    info!("Read from file {}", file_path);
    let contents = match std::fs::read_to_string(file_path) {
        Ok(contents) => contents,
        Err(err) => {
            error!("Cannot read `{}`: {}", file_path, err);
            eprintln!("Cannot read `{}`: {}", file_path, err);
            return Ok(ExitCode::from(66));
        }
    };

    let rc = Rc::new(RefCell::new(std::io::stdout()));
    let mut itp = Interpreter::new(rc);
    let mut env = Environment::new();
    let mut reporter = StderrReporter::default();

    match run(&contents, &mut itp, &mut env, &mut reporter) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(RunError::Static { count }) => {
            error!("{} error(s) before execution", count);
            Ok(ExitCode::from(65))
        }
        Err(RunError::Runtime(err)) => {
            error!("Interpreter error: {}", err);
            Ok(ExitCode::from(70))
        }
    }
}
