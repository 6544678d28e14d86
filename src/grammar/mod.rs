/*
    This module is for storing and manipulating grammars
*/

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

// The base unit in a production body. The upper-case naming convention of
// the .gra format only exists at the parse/serialize boundary; internally
// the two kinds are kept apart by the variant.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(String),
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
        }
    }
}

// A single rewrite rule. An empty body is an epsilon production, written
// `&` in the .gra format.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Production {
    pub lhs: String,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }

    // The body of a unit production A -> B, if this is one
    pub fn unit_nonterminal(&self) -> Option<&str> {
        match self.rhs.as_slice() {
            [Symbol::Nonterminal(name)] => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Grammar {
    pub terminals: BTreeSet<char>,
    pub nonterminals: BTreeSet<String>,
    // The first nonterminal listed in the input
    pub start_symbol: String,
    pub productions: Vec<Production>,
    // Auxiliary nonterminals standing in for terminals, built lazily
    // during the transformation ('a' -> "Ca" and so on)
    terminal_to_nonterminal: BTreeMap<char, String>,
    // Seed for fresh "D1", "D2", ... names
    d_counter: u32,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            terminals: BTreeSet::new(),
            nonterminals: BTreeSet::new(),
            start_symbol: String::new(),
            productions: Vec::new(),
            terminal_to_nonterminal: BTreeMap::new(),
            d_counter: 0,
        }
    }

    // Mints the next "Dk" name and registers it as a nonterminal. The
    // counter is never reset, so every call yields a fresh name.
    pub fn fresh_d(&mut self) -> String {
        self.d_counter += 1;
        let name = format!("D{}", self.d_counter);
        self.nonterminals.insert(name.clone());
        name
    }

    // Returns the auxiliary nonterminal rewriting to the terminal `t`,
    // allocating it on first use. Allocation appends the production
    // `C<t> -> t` and registers both symbols.
    pub fn nonterminal_for_terminal(&mut self, t: char) -> String {
        if let Some(name) = self.terminal_to_nonterminal.get(&t) {
            return name.clone();
        }

        let base = format!("C{}", t);
        let mut name = base.clone();
        let mut suffix = 1;
        while self.nonterminals.contains(&name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }

        self.nonterminals.insert(name.clone());
        self.terminal_to_nonterminal.insert(t, name.clone());
        self.productions.push(Production {
            lhs: name.clone(),
            rhs: vec![Symbol::Terminal(t)],
        });
        self.terminals.insert(t);

        name
    }
}
