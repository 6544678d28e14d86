/*
    This module checks loaded grammars

    Two separate passes: validate_format confirms the grammar is
    self-consistent as declared, check_preconditions confirms it is
    eligible for the normalization algorithm (no epsilon productions,
    no unit productions). Format validation only applies to freshly
    loaded grammars; the transformation introduces multi-character
    nonterminal names on purpose.
*/

use std::fmt::Display;
use std::path::PathBuf;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug, PartialEq)]
pub enum FormatErrorType {
    // A terminal that is a control character
    ControlTerminal(char),
    // An input nonterminal that is not a single upper-case letter
    BadNonterminalName(String),
    // A production whose LHS was never declared
    UndeclaredLhs(String),
    // A production body referencing an undeclared nonterminal
    UndeclaredNonterminal(String),
    // A production body referencing an undeclared terminal
    UndeclaredTerminal(char),
}

impl ErrorType for FormatErrorType {}

impl Display for FormatErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatErrorType::ControlTerminal(c) => write!(f, "Terminal {:?} is a control character", c),
            FormatErrorType::BadNonterminalName(name) => write!(f, "Input nonterminals must be a single upper-case letter, found `{}`", name),
            FormatErrorType::UndeclaredLhs(name) => write!(f, "Production defines undeclared nonterminal `{}`", name),
            FormatErrorType::UndeclaredNonterminal(name) => write!(f, "Production references undeclared nonterminal `{}`", name),
            FormatErrorType::UndeclaredTerminal(c) => write!(f, "Production references undeclared terminal `{}`", c),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum PreconditionErrorType {
    // An epsilon production A -> &
    EpsilonProduction(String),
    // A unit production A -> B
    UnitProduction(String, String),
}

impl ErrorType for PreconditionErrorType {}

impl Display for PreconditionErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreconditionErrorType::EpsilonProduction(lhs) => write!(f, "The grammar contains the epsilon production {} -> &", lhs),
            PreconditionErrorType::UnitProduction(lhs, rhs) => write!(f, "The grammar contains the unit production {} -> {}", lhs, rhs),
        }
    }
}

pub type FormatError = Error<FormatErrorType>;
pub type PreconditionError = Error<PreconditionErrorType>;

fn format_error(error: FormatErrorType, file: &PathBuf) -> FormatError {
    FormatError {
        location: Location::whole_file(file.clone()),
        error,
    }
}

fn is_single_upper(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}

// Confirms the loaded grammar is self-consistent. Stops at the first
// violation found.
pub fn validate_format(grammar: &Grammar, file: PathBuf) -> Result<(), FormatError> {
    for &t in &grammar.terminals {
        if t.is_control() {
            return Err(format_error(FormatErrorType::ControlTerminal(t), &file));
        }
    }

    for name in &grammar.nonterminals {
        if !is_single_upper(name) {
            return Err(format_error(FormatErrorType::BadNonterminalName(name.clone()), &file));
        }
    }

    for production in &grammar.productions {
        if !grammar.nonterminals.contains(&production.lhs) {
            return Err(format_error(FormatErrorType::UndeclaredLhs(production.lhs.clone()), &file));
        }
        for symbol in &production.rhs {
            match symbol {
                Symbol::Nonterminal(name) if !grammar.nonterminals.contains(name) => {
                    return Err(format_error(FormatErrorType::UndeclaredNonterminal(name.clone()), &file));
                }
                Symbol::Terminal(t) if !grammar.terminals.contains(t) => {
                    return Err(format_error(FormatErrorType::UndeclaredTerminal(*t), &file));
                }
                _ => {}
            }
        }
    }

    Ok(())
}

// Confirms the grammar is eligible for the normalization algorithm.
// The epsilon scan runs over all productions before the unit scan, so
// an epsilon production wins when both kinds are present.
pub fn check_preconditions(grammar: &Grammar, file: PathBuf) -> Result<(), PreconditionError> {
    let error = |error| PreconditionError {
        location: Location::whole_file(file.clone()),
        error,
    };

    for production in &grammar.productions {
        if production.is_epsilon() {
            return Err(error(PreconditionErrorType::EpsilonProduction(production.lhs.clone())));
        }
    }

    for production in &grammar.productions {
        if let Some(name) = production.unit_nonterminal() {
            return Err(error(PreconditionErrorType::UnitProduction(
                production.lhs.clone(),
                name.to_string(),
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn load(text: &str) -> Grammar {
        parser::parse_reader(text.as_bytes(), PathBuf::from("test.gra")).unwrap()
    }

    fn file() -> PathBuf {
        PathBuf::from("test.gra")
    }

    #[test]
    fn accepts_well_formed_grammar() {
        let grammar = load("2\na\nb\n2\nS\nA\n2\nS aAb\nA ab\n");

        assert_eq!(validate_format(&grammar, file()), Ok(()));
        assert_eq!(check_preconditions(&grammar, file()), Ok(()));
    }

    #[test]
    fn rejects_control_character_terminal() {
        let mut grammar = load("1\na\n1\nS\n1\nS a\n");
        grammar.terminals.insert('\t');

        let error = validate_format(&grammar, file()).unwrap_err();
        assert_eq!(error.error, FormatErrorType::ControlTerminal('\t'));
    }

    #[test]
    fn rejects_long_nonterminal_name() {
        let mut grammar = load("1\na\n1\nS\n1\nS a\n");
        grammar.nonterminals.insert("D1".to_string());

        let error = validate_format(&grammar, file()).unwrap_err();
        assert_eq!(error.error, FormatErrorType::BadNonterminalName("D1".to_string()));
    }

    #[test]
    fn rejects_lower_case_nonterminal_name() {
        let mut grammar = load("1\na\n1\nS\n1\nS a\n");
        grammar.nonterminals.insert("s".to_string());

        let error = validate_format(&grammar, file()).unwrap_err();
        assert_eq!(error.error, FormatErrorType::BadNonterminalName("s".to_string()));
    }

    #[test]
    fn rejects_undeclared_lhs() {
        let grammar = load("1\na\n1\nS\n1\nX a\n");

        let error = validate_format(&grammar, file()).unwrap_err();
        assert_eq!(error.error, FormatErrorType::UndeclaredLhs("X".to_string()));
    }

    #[test]
    fn rejects_undeclared_body_symbols() {
        let undeclared_nt = load("1\na\n1\nS\n1\nS aB\n");
        let error = validate_format(&undeclared_nt, file()).unwrap_err();
        assert_eq!(error.error, FormatErrorType::UndeclaredNonterminal("B".to_string()));

        let undeclared_t = load("1\na\n1\nS\n1\nS ab\n");
        let error = validate_format(&undeclared_t, file()).unwrap_err();
        assert_eq!(error.error, FormatErrorType::UndeclaredTerminal('b'));
    }

    #[test]
    fn epsilon_body_passes_format_validation() {
        let grammar = load("1\na\n1\nS\n2\nS a\nS &\n");

        assert_eq!(validate_format(&grammar, file()), Ok(()));
    }

    #[test]
    fn rejects_epsilon_production() {
        let grammar = load("1\na\n1\nS\n2\nS a\nS &\n");

        let error = check_preconditions(&grammar, file()).unwrap_err();
        assert_eq!(error.error, PreconditionErrorType::EpsilonProduction("S".to_string()));
    }

    #[test]
    fn rejects_unit_production() {
        let grammar = load("1\na\n2\nS\nA\n2\nS A\nA a\n");

        let error = check_preconditions(&grammar, file()).unwrap_err();
        assert_eq!(
            error.error,
            PreconditionErrorType::UnitProduction("S".to_string(), "A".to_string())
        );
    }

    #[test]
    fn epsilon_is_reported_before_unit() {
        // The unit production comes first in the file, but the epsilon
        // scan runs first over the whole list
        let grammar = load("1\na\n2\nS\nA\n3\nS A\nA a\nA &\n");

        let error = check_preconditions(&grammar, file()).unwrap_err();
        assert_eq!(error.error, PreconditionErrorType::EpsilonProduction("A".to_string()));
    }

    #[test]
    fn single_terminal_body_is_not_a_unit_production() {
        let grammar = load("1\na\n1\nS\n1\nS a\n");

        assert_eq!(check_preconditions(&grammar, file()), Ok(()));
    }
}
