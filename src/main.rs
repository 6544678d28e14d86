mod cli;
mod error_handling;
mod grammar;
mod parser;
mod reachability;
mod transformer;
mod validator;
mod writer;

use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;

use error_handling::{Error, ErrorType};

// Distinct exit statuses per error kind, so callers can tell an I/O
// problem from a bad grammar
const EXIT_IO: u8 = 1;
const EXIT_FORMAT: u8 = 2;
const EXIT_PRECONDITION: u8 = 3;

fn report<T: ErrorType>(error: Error<T>, code: u8) -> ExitCode {
    eprintln!("{}", error);
    ExitCode::from(code)
}

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    let mut grammar = match parser::parse_file(&args.input) {
        Ok(grammar) => grammar,
        Err(error) => {
            let code = match error.error {
                parser::LoadErrorType::FileError(_) => EXIT_IO,
                _ => EXIT_FORMAT,
            };
            return report(error, code);
        }
    };

    if let Err(error) = validator::validate_format(&grammar, args.input.clone()) {
        return report(error, EXIT_FORMAT);
    }
    if let Err(error) = validator::check_preconditions(&grammar, args.input.clone()) {
        return report(error, EXIT_PRECONDITION);
    }

    if args.reachability {
        let declared = reachability::declared_nonterminals(&grammar);
        let reachable = reachability::reachable_nonterminals(&grammar);
        println!("declared: {}", declared.iter().join(" "));
        println!("reachable: {}", reachable.iter().join(" "));
    }

    transformer::transform(&mut grammar);

    if let Err(error) = writer::write_file(&grammar, &args.output) {
        return report(error, EXIT_IO);
    }

    println!("Conversion complete. Output written to {}", args.output.display());
    ExitCode::SUCCESS
}
