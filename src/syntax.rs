// ### Syntactic analyses ###
// Plain recursions over the tree; none of these look at truth values.

use std::collections::{BTreeSet, HashSet};

use crate::formula::Formula;

impl Formula {
    pub fn length(&self) -> usize {
        // Atoms count one, every connective adds one.
        match self {
            Formula::Atom(_) => 1,
            Formula::Not(p) => p.length() + 1,
            Formula::And(p, q) | Formula::Or(p, q) | Formula::Imp(p, q) => {
                p.length() + q.length() + 1
            }
        }
    }

    pub fn subformulas(&self) -> BTreeSet<Formula> {
        // Includes `self`; repeated subformulas appear once.
        let mut result = match self {
            Formula::Atom(_) => BTreeSet::new(),
            Formula::Not(p) => p.subformulas(),
            Formula::And(p, q) | Formula::Or(p, q) | Formula::Imp(p, q) => {
                &p.subformulas() | &q.subformulas()
            }
        };
        result.insert(self.clone());
        result
    }

    pub fn number_of_atoms(&self) -> usize {
        // Occurrences, so repetitions count.
        self.over_atoms(&|_, count| count + 1, 0)
    }

    pub fn number_of_connectives(&self) -> usize {
        match self {
            Formula::Atom(_) => 0,
            Formula::Not(p) => p.number_of_connectives() + 1,
            Formula::And(p, q) | Formula::Or(p, q) | Formula::Imp(p, q) => {
                p.number_of_connectives() + q.number_of_connectives() + 1
            }
        }
    }

    pub fn number_of_binary_connectives(&self) -> usize {
        match self {
            Formula::Atom(_) => 0,
            Formula::Not(p) => p.number_of_binary_connectives(),
            Formula::And(p, q) | Formula::Or(p, q) | Formula::Imp(p, q) => {
                p.number_of_binary_connectives() + q.number_of_binary_connectives() + 1
            }
        }
    }

    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(p) => matches!(**p, Formula::Atom(_)),
            _ => false,
        }
    }

    pub fn is_clause(&self) -> bool {
        // A disjunction of literals, nested either way; a lone literal counts.
        match self {
            Formula::Or(p, q) => p.is_clause() && q.is_clause(),
            _ => self.is_literal(),
        }
    }

    pub fn is_term(&self) -> bool {
        // A conjunction of literals.
        match self {
            Formula::And(p, q) => p.is_term() && q.is_term(),
            _ => self.is_literal(),
        }
    }

    pub fn is_nnf(&self) -> bool {
        // Negation only in front of atoms and no implications.
        match self {
            Formula::Atom(_) => true,
            Formula::Not(p) => matches!(**p, Formula::Atom(_)),
            Formula::And(p, q) | Formula::Or(p, q) => p.is_nnf() && q.is_nnf(),
            Formula::Imp(_, _) => false,
        }
    }

    pub fn is_cnf(&self) -> bool {
        match self {
            Formula::And(p, q) => p.is_cnf() && q.is_cnf(),
            _ => self.is_clause(),
        }
    }

    pub fn is_dnf(&self) -> bool {
        match self {
            Formula::Or(p, q) => p.is_dnf() && q.is_dnf(),
            _ => self.is_term(),
        }
    }

    pub fn is_dnnf(&self) -> bool {
        // NNF in which the conjuncts of every conjunction share no atoms.
        fn decomposable(formula: &Formula) -> bool {
            match formula {
                Formula::Atom(_) | Formula::Not(_) => true,
                Formula::And(p, q) => {
                    let left: HashSet<&str> = p.atom_occurrences().into_iter().collect();
                    q.atom_occurrences().iter().all(|atom| !left.contains(atom))
                        && decomposable(p)
                        && decomposable(q)
                }
                Formula::Or(p, q) | Formula::Imp(p, q) => decomposable(p) && decomposable(q),
            }
        }
        self.is_nnf() && decomposable(self)
    }

    pub fn substitute(&self, old: &Formula, new: &Formula) -> Formula {
        // Replace every occurrence of `old` by `new`, building a new tree.
        // Replacements are not searched again for `old`.
        if self == old {
            return new.clone();
        }
        match self {
            Formula::Atom(_) => self.clone(),
            Formula::Not(p) => Formula::not(&p.substitute(old, new)),
            Formula::And(p, q) => Formula::and(&p.substitute(old, new), &q.substitute(old, new)),
            Formula::Or(p, q) => Formula::or(&p.substitute(old, new), &q.substitute(old, new)),
            Formula::Imp(p, q) => Formula::imp(&p.substitute(old, new), &q.substitute(old, new)),
        }
    }
}
