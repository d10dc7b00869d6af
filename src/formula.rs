// Formula AST, builders, generic traversals and printing.
// Parsing lives in `parse`, semantics in `semantics` and `sat`.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

//### Formula AST ###
#[derive(Debug, PartialEq, Clone, PartialOrd, Eq, Ord, Hash)]
pub enum Formula {
    Atom(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Imp(Box<Formula>, Box<Formula>),
}

// General Builders and utilities.
impl Formula {
    pub fn atom(name: &str) -> Formula {
        Formula::Atom(String::from(name))
    }

    pub fn not(formula: &Formula) -> Formula {
        Formula::Not(Box::new(formula.to_owned()))
    }

    pub fn and(formula1: &Formula, formula2: &Formula) -> Formula {
        Formula::And(Box::new(formula1.to_owned()), Box::new(formula2.to_owned()))
    }

    pub fn or(formula1: &Formula, formula2: &Formula) -> Formula {
        Formula::Or(Box::new(formula1.to_owned()), Box::new(formula2.to_owned()))
    }

    pub fn imp(formula1: &Formula, formula2: &Formula) -> Formula {
        Formula::Imp(Box::new(formula1.to_owned()), Box::new(formula2.to_owned()))
    }

    pub fn over_atoms<Agg>(&self, combine: &dyn Fn(&str, Agg) -> Agg, aggregate: Agg) -> Agg {
        // Fold `combine` over the atom occurrences of `self`, left to right,
        // keeping the result in `aggregate`.
        match self {
            Formula::Atom(name) => combine(name, aggregate),
            Formula::Not(p) => p.over_atoms(combine, aggregate),
            Formula::And(p, q) | Formula::Or(p, q) | Formula::Imp(p, q) => {
                q.over_atoms(combine, p.over_atoms(combine, aggregate))
            }
        }
    }

    pub fn atom_occurrences(&self) -> Vec<&str> {
        // Every atom occurrence in pre-order, repetitions included.
        fn collect<'a>(formula: &'a Formula, acc: &mut Vec<&'a str>) {
            match formula {
                Formula::Atom(name) => acc.push(name),
                Formula::Not(p) => collect(p, acc),
                Formula::And(p, q) | Formula::Or(p, q) | Formula::Imp(p, q) => {
                    collect(p, acc);
                    collect(q, acc);
                }
            }
        }
        let mut acc = Vec::new();
        collect(self, &mut acc);
        acc
    }

    pub fn atoms(&self) -> Vec<String> {
        // The distinct atom names of `self` in order of first occurrence.
        // A fresh list on every call: enumeration order in `sat` depends on it.
        self.atom_occurrences()
            .into_iter()
            .unique()
            .map(String::from)
            .collect()
    }

    pub fn atom_union(&self, other: &Formula) -> Vec<String> {
        // Atoms of `self` followed by those atoms of `other` not already present.
        self.atom_occurrences()
            .into_iter()
            .chain(other.atom_occurrences())
            .unique()
            .map(String::from)
            .collect()
    }

    pub fn list_conj(items: &[Formula]) -> Option<Formula> {
        // The right-nested conjunction of all `items`; `None` for no items
        // since there is no constant `true` to stand in for it.
        items
            .iter()
            .rev()
            .cloned()
            .reduce(|acc, item| Formula::and(&item, &acc))
    }

}

#[cfg(test)]
mod formula_tests_general {
    use super::*;

    #[test]
    fn test_formula_equality() {
        let x = Formula::imp(
            &Formula::atom("hello"),
            &Formula::and(&Formula::atom("apples"), &Formula::atom("oranges")),
        );
        let y = Formula::imp(
            &Formula::atom("hello"),
            &Formula::and(&Formula::atom("apples"), &Formula::atom("oranges")),
        );
        let z = Formula::imp(
            &Formula::atom("hello"),
            &Formula::and(&Formula::atom("apples"), &Formula::atom("bananas")),
        );
        assert_eq!(x, y);
        assert_ne!(x, z);
        // Same children, different connective.
        assert_ne!(
            Formula::and(&Formula::atom("p"), &Formula::atom("q")),
            Formula::or(&Formula::atom("p"), &Formula::atom("q"))
        );
    }

    #[test]
    fn test_over_atoms() {
        let input = Formula::or(
            &Formula::imp(&Formula::atom("A"), &Formula::atom("B")),
            &Formula::not(&Formula::atom("A")),
        );
        let aggregator: &dyn Fn(&str, Vec<String>) -> Vec<String> = &|name, mut agg| {
            agg.push(name.to_string());
            agg
        };
        let result = input.over_atoms(aggregator, vec![String::from("C")]);
        assert_eq!(result, vec!["C", "A", "B", "A"]);
    }

    #[test]
    fn test_atoms_first_occurrence_order() {
        // (p /\ s) ==> (q /\ ~r) with p repeated at the end.
        let formula = Formula::and(
            &Formula::imp(
                &Formula::and(&Formula::atom("p"), &Formula::atom("s")),
                &Formula::and(&Formula::atom("q"), &Formula::not(&Formula::atom("r"))),
            ),
            &Formula::atom("p"),
        );
        assert_eq!(formula.atoms(), vec!["p", "s", "q", "r"]);
        // No accumulation across calls.
        assert_eq!(formula.atoms(), formula.atoms());
        assert_eq!(Formula::atom("z").atoms(), vec!["z"]);
    }

    #[test]
    fn test_atom_union() {
        let f1 = Formula::and(&Formula::atom("p"), &Formula::atom("q"));
        let f2 = Formula::or(&Formula::atom("r"), &Formula::atom("p"));
        assert_eq!(f1.atom_union(&f2), vec!["p", "q", "r"]);
        assert_eq!(f2.atom_union(&f1), vec!["r", "p", "q"]);
    }

    #[test]
    fn test_list_conj() {
        let singleton = vec![Formula::atom("A")];
        let multiple = vec![Formula::atom("A"), Formula::atom("B"), Formula::atom("C")];

        assert_eq!(Formula::list_conj(&[]), None);
        assert_eq!(Formula::list_conj(&singleton), Some(Formula::atom("A")));
        assert_eq!(
            Formula::list_conj(&multiple),
            Some(Formula::and(
                &Formula::atom("A"),
                &Formula::and(&Formula::atom("B"), &Formula::atom("C"))
            ))
        );

    }
}

// ### Formula Prettifying ###

fn maybe_bracketed(add_brackets: bool, middle: &str) -> String {
    let mut result = String::from("");
    if add_brackets {
        result.push('(');
    }
    result.push_str(middle);
    if add_brackets {
        result.push(')');
    }
    result
}

fn get_formula(prec: u32, formula: &Formula) -> String {
    // `prec` is the binding strength of the surrounding context.
    match formula {
        Formula::Atom(name) => name.clone(),
        Formula::Not(p) => maybe_bracketed(prec > 10, &get_prefix(10, "~", p)),
        Formula::And(p, q) => maybe_bracketed(prec > 8, &get_infix(8, "/\\", p, q)),
        Formula::Or(p, q) => maybe_bracketed(prec > 6, &get_infix(6, "\\/", p, q)),
        Formula::Imp(p, q) => maybe_bracketed(prec > 4, &get_infix(4, "==>", p, q)),
    }
}

fn get_prefix(prec: u32, symbol: &str, inner: &Formula) -> String {
    let mut result = String::from(symbol);
    result.push_str(&get_formula(prec, inner));
    result
}

fn get_infix(prec: u32, symbol: &str, left: &Formula, right: &Formula) -> String {
    // Connectives are right associative, so only the left operand needs
    // brackets at equal precedence.
    let mut result = String::new();

    result.push_str(&get_formula(prec + 1, left));
    result.push(' ');
    result.push_str(symbol);
    result.push(' ');
    result.push_str(&get_formula(prec, right));
    result
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&get_formula(0, self))
    }
}

impl Formula {
    pub fn pretty(&self) -> String {
        format!("<<{self}>>")
    }
}

#[cfg(test)]
mod ast_print_tests {
    use super::*;

    #[test]
    fn test_print_atom_and_negation() {
        assert_eq!(Formula::atom("p").pretty(), "<<p>>");
        let formula = Formula::not(&Formula::not(&Formula::atom("p")));
        assert_eq!(formula.to_string(), "~~p");
    }

    #[test]
    fn test_print_precedence() {
        // (p /\ s) ==> (q /\ ~r)
        let formula = Formula::imp(
            &Formula::and(&Formula::atom("p"), &Formula::atom("s")),
            &Formula::and(&Formula::atom("q"), &Formula::not(&Formula::atom("r"))),
        );
        assert_eq!(formula.pretty(), "<<p /\\ s ==> q /\\ ~r>>");

        let formula = Formula::not(&Formula::or(&Formula::atom("p"), &Formula::atom("q")));
        assert_eq!(formula.to_string(), "~(p \\/ q)");

        let formula = Formula::and(
            &Formula::or(&Formula::atom("a"), &Formula::atom("b")),
            &Formula::atom("c"),
        );
        assert_eq!(formula.to_string(), "(a \\/ b) /\\ c");
    }

    #[test]
    fn test_print_associativity() {
        let right = Formula::imp(
            &Formula::atom("a"),
            &Formula::imp(&Formula::atom("b"), &Formula::atom("c")),
        );
        assert_eq!(right.to_string(), "a ==> b ==> c");
        let left = Formula::imp(
            &Formula::imp(&Formula::atom("a"), &Formula::atom("b")),
            &Formula::atom("c"),
        );
        assert_eq!(left.to_string(), "(a ==> b) ==> c");
    }
}
