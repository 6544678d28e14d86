/*
    This module parses .gra grammar files

    The format is three sections in a fixed order, each a count line
    followed by that many data lines: terminals (one character each),
    nonterminals (first one is the start symbol), and productions
    ("LHS RHS"). Blank lines between items are skipped.
*/

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug)]
pub enum LoadErrorType {
    // A line that should hold a section count held something else
    ExpectedCount,
    // The file ended while a section was still owed lines
    MissingLines(&'static str),
    // A terminal line must be exactly one character
    TerminalTooLong(String),
    // A production line without both an LHS and an RHS
    IncompleteProduction(String),
    // The nonterminal section is empty, so there is no start symbol
    NoNonterminals,
    // There was an issue with reading the file
    FileError(std::io::Error),
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let LoadErrorType::FileError(a) = self {
            if let LoadErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for LoadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadErrorType::ExpectedCount => write!(f, "Expected a section count on this line"),
            LoadErrorType::MissingLines(section) => write!(f, "File ended before the {} section was complete", section),
            LoadErrorType::TerminalTooLong(line) => write!(f, "Terminal symbols must be a single character, found `{}`", line),
            LoadErrorType::IncompleteProduction(line) => write!(f, "Production `{}` needs both an LHS and an RHS", line),
            LoadErrorType::NoNonterminals => write!(f, "The grammar declares no nonterminals"),
            LoadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadResult<T> = std::result::Result<T, LoadError>;

// Line-by-line view of the input that skips blanks and remembers the
// current line number for error attribution
struct LineSource<R> {
    reader: R,
    file: PathBuf,
    line: usize,
}

impl<R: BufRead> LineSource<R> {
    fn error(&self, error: LoadErrorType) -> LoadError {
        LoadError {
            location: Location {
                file: self.file.clone(),
                line: self.line,
            },
            error,
        }
    }

    // Next non-blank line, trimmed, or None at end of input
    fn next_item(&mut self) -> LoadResult<Option<String>> {
        loop {
            let mut buffer = String::new();
            let read = self.reader
                .read_line(&mut buffer)
                .map_err(|e| self.error(LoadErrorType::FileError(e)))?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = buffer.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    fn expect_item(&mut self, section: &'static str) -> LoadResult<String> {
        self.next_item()?
            .ok_or_else(|| self.error(LoadErrorType::MissingLines(section)))
    }

    fn count(&mut self, section: &'static str) -> LoadResult<usize> {
        let line = self.expect_item(section)?;
        line.parse().map_err(|_| self.error(LoadErrorType::ExpectedCount))
    }
}

fn parse_production(line: &str) -> Result<Production, LoadErrorType> {
    let mut parts = line.split_whitespace();
    let (Some(lhs), Some(rhs)) = (parts.next(), parts.next()) else {
        return Err(LoadErrorType::IncompleteProduction(line.to_string()));
    };

    Ok(Production {
        lhs: lhs.to_string(),
        rhs: tokenize_rhs(rhs),
    })
}

// One symbol per character: upper-case letters are nonterminal references,
// everything else is a terminal. The whole-body `&` is epsilon.
fn tokenize_rhs(rhs: &str) -> Vec<Symbol> {
    if rhs == "&" {
        return Vec::new();
    }

    rhs.chars()
        .map(|c| if c.is_ascii_uppercase() {
            Symbol::Nonterminal(c.to_string())
        } else {
            Symbol::Terminal(c)
        })
        .collect()
}

pub fn parse_reader(reader: impl BufRead, file: PathBuf) -> LoadResult<Grammar> {
    let mut source = LineSource { reader, file, line: 0 };
    let mut grammar = Grammar::new();

    let n_terminals = source.count("terminal")?;
    for _ in 0..n_terminals {
        let line = source.expect_item("terminal")?;
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                grammar.terminals.insert(c);
            }
            _ => return Err(source.error(LoadErrorType::TerminalTooLong(line))),
        }
    }

    let n_nonterminals = source.count("nonterminal")?;
    if n_nonterminals == 0 {
        return Err(source.error(LoadErrorType::NoNonterminals));
    }
    for i in 0..n_nonterminals {
        let name = source.expect_item("nonterminal")?;
        if i == 0 {
            grammar.start_symbol = name.clone();
        }
        grammar.nonterminals.insert(name);
    }

    let n_productions = source.count("production")?;
    for _ in 0..n_productions {
        let line = source.expect_item("production")?;
        let production = parse_production(&line).map_err(|e| source.error(e))?;
        grammar.productions.push(production);
    }

    Ok(grammar)
}

pub fn parse_file(path: &Path) -> LoadResult<Grammar> {
    let file = File::open(path).map_err(|e| LoadError {
        location: Location::whole_file(path.to_path_buf()),
        error: LoadErrorType::FileError(e),
    })?;

    parse_reader(BufReader::new(file), path.to_path_buf())
}
