/*
    This module writes grammars back out in the .gra format

    Sections come out in the sets' natural (sorted) order, one line per
    item with no blank padding. Bodies are the tokens concatenated with
    no separator; an empty body is written as `&`.
*/

use std::fmt::Display;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug)]
pub enum WriteErrorType {
    // The output file could not be created or written
    FileError(std::io::Error),
}

impl ErrorType for WriteErrorType {}

impl PartialEq for WriteErrorType {
    fn eq(&self, other: &Self) -> bool {
        let (WriteErrorType::FileError(a), WriteErrorType::FileError(b)) = (self, other);
        a.kind() == b.kind()
    }
}

impl Display for WriteErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type WriteError = Error<WriteErrorType>;

fn render_production(production: &Production) -> String {
    if production.is_epsilon() {
        format!("{} &", production.lhs)
    } else {
        format!("{} {}", production.lhs, production.rhs.iter().join(""))
    }
}

pub fn render(grammar: &Grammar) -> String {
    let mut lines = Vec::new();

    lines.push(grammar.terminals.len().to_string());
    lines.extend(grammar.terminals.iter().map(|t| t.to_string()));

    lines.push(grammar.nonterminals.len().to_string());
    lines.extend(grammar.nonterminals.iter().cloned());

    lines.push(grammar.productions.len().to_string());
    lines.extend(grammar.productions.iter().map(render_production));

    lines.iter().join("\n") + "\n"
}

pub fn write_file(grammar: &Grammar, path: &Path) -> Result<(), WriteError> {
    std::fs::write(path, render(grammar)).map_err(|e| WriteError {
        location: Location::whole_file(PathBuf::from(path)),
        error: WriteErrorType::FileError(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use crate::transformer;

    fn load(text: &str) -> Grammar {
        parser::parse_reader(text.as_bytes(), PathBuf::from("test.gra")).unwrap()
    }

    #[test]
    fn sections_come_out_sorted() {
        let grammar = load("2\nb\na\n2\nS\nA\n2\nS ab\nA ba\n");

        assert_eq!(render(&grammar), "2\na\nb\n2\nA\nS\n2\nS ab\nA ba\n");
    }

    #[test]
    fn epsilon_is_written_as_ampersand() {
        let grammar = load("1\na\n1\nS\n2\nS a\nS &\n");

        assert_eq!(render(&grammar), "1\na\n1\nS\n2\nS a\nS &\n");
    }

    #[test]
    fn transformed_grammar_round_trips_through_the_parser() {
        let mut grammar = load("2\na\nb\n1\nS\n2\nS aSb\nS ab\n");
        transformer::transform(&mut grammar);

        let text = render(&grammar);
        let reparsed = parser::parse_reader(text.as_bytes(), PathBuf::from("out.gra")).unwrap();

        assert_eq!(reparsed.terminals, grammar.terminals);
        assert_eq!(reparsed.nonterminals, grammar.nonterminals);
        assert_eq!(reparsed.productions.len(), grammar.productions.len());
    }

    #[test]
    fn blank_line_padding_is_not_written() {
        let grammar = load("\n1\n\na\n\n1\nS\n\n1\nS a\n");

        assert_eq!(render(&grammar), "1\na\n1\nS\n1\nS a\n");
    }
}
