/*
    This module converts grammars to Chomsky Normal Form

    The algorithm assumes the grammar has no epsilon and no unit
    productions (check_preconditions enforces this) and runs two
    passes: first every terminal inside a body of length two or more
    is replaced by an auxiliary nonterminal that rewrites to it, then
    every body of length three or more is broken into a chain of
    binary productions over fresh "Dk" nonterminals.
*/

use crate::grammar::*;

// Applies the full normalization in place. Cannot fail on a grammar
// that passed precondition checking.
pub fn transform(grammar: &mut Grammar) {
    isolate_terminals(grammar);
    binarize(grammar);
}

// Reroutes terminals in long bodies through auxiliary nonterminals.
// Only the productions present at entry are scanned; the `C<t> -> t`
// productions appended along the way are already in CNF shape.
fn isolate_terminals(grammar: &mut Grammar) {
    let original_len = grammar.productions.len();

    for i in 0..original_len {
        if grammar.productions[i].rhs.len() < 2 {
            // A -> a and A -> B bodies are left alone
            continue;
        }
        for j in 0..grammar.productions[i].rhs.len() {
            if let Symbol::Terminal(t) = grammar.productions[i].rhs[j] {
                let name = grammar.nonterminal_for_terminal(t);
                grammar.productions[i].rhs[j] = Symbol::Nonterminal(name);
            }
        }
    }
}

// Replaces each production with body B1 ... Bm (m >= 3) by the chain
// A -> B1 D1, D1 -> B2 D2, ..., D_{m-2} -> B_{m-1} Bm, keeping the
// chain in the replaced production's position in the list.
fn binarize(grammar: &mut Grammar) {
    let originals = std::mem::take(&mut grammar.productions);
    let mut rebuilt = Vec::with_capacity(originals.len());

    for production in originals {
        let m = production.rhs.len();
        if m < 3 {
            rebuilt.push(production);
            continue;
        }

        let Production { mut lhs, rhs } = production;
        for symbol in &rhs[..m - 2] {
            let next = grammar.fresh_d();
            rebuilt.push(Production {
                lhs,
                rhs: vec![symbol.clone(), Symbol::Nonterminal(next.clone())],
            });
            lhs = next;
        }
        rebuilt.push(Production {
            lhs,
            rhs: vec![rhs[m - 2].clone(), rhs[m - 1].clone()],
        });
    }

    grammar.productions = rebuilt;
}
