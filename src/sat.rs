// SAT
//
// ### Brute-force satisfiability
//
// Exhaustive case-split over the atoms of a formula.  No propagation, no
// learning: every decision procedure below is built from the search or
// from a plain enumeration of valuations.

use itertools::Itertools;
use log::debug;

use crate::error::LogicError;
use crate::formula::Formula;
use crate::semantics::{Valuation, Valuations};

// One backtracking search for a model of `formula`: atoms are split on from
// the back of the list, `true` first, stopping at the first model.
pub struct Search<'f> {
    formula: &'f Formula,
    atoms: Vec<String>,
    leaves_visited: u64,
}

impl<'f> Search<'f> {
    pub fn new(formula: &'f Formula) -> Search<'f> {
        Search::over_atoms(formula, formula.atoms())
    }

    pub fn over_atoms(formula: &'f Formula, atoms: Vec<String>) -> Search<'f> {
        // Models bind exactly the distinct names of `atoms`, topped up with
        // any atom of `formula` it leaves out so every leaf can be evaluated.
        let atoms = atoms.into_iter().chain(formula.atoms()).unique().collect();
        Search {
            formula,
            atoms,
            leaves_visited: 0,
        }
    }

    pub fn run(&mut self) -> Option<Valuation> {
        debug!(
            "search over {} atoms for a model of {}",
            self.atoms.len(),
            self.formula
        );
        self.leaves_visited = 0;
        let result = search(
            self.formula,
            &self.atoms,
            Valuation::new(),
            &mut self.leaves_visited,
        );
        debug!(
            "search finished after {} leaves: {:?}",
            self.leaves_visited, result
        );
        result
    }

    pub fn atoms(&self) -> &[String] {
        &self.atoms
    }

    pub fn leaves_visited(&self) -> u64 {
        self.leaves_visited
    }
}

fn search(
    formula: &Formula,
    remaining: &[String],
    partial: Valuation,
    leaves_visited: &mut u64,
) -> Option<Valuation> {
    match remaining.split_last() {
        None => {
            *leaves_visited += 1;
            // Every atom of `formula` is bound once `remaining` runs out.
            if formula.eval_core(&|name| partial[name]) {
                Some(partial)
            } else {
                None
            }
        }
        Some((atom, rest)) => {
            let mut positive = partial.clone();
            positive.insert(atom.clone(), true);
            if let Some(model) = search(formula, rest, positive, leaves_visited) {
                return Some(model);
            }
            let mut negative = partial;
            negative.insert(atom.clone(), false);
            search(formula, rest, negative, leaves_visited)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Premises {
    Single(Formula),
    List(Vec<Formula>),
}

impl Premises {
    pub fn formulas(&self) -> &[Formula] {
        match self {
            Premises::Single(formula) => std::slice::from_ref(formula),
            Premises::List(formulas) => formulas,
        }
    }

    pub fn parse(inputs: &[&str]) -> Result<Premises, LogicError> {
        // Parse each premise in turn; the first one that fails names its position.
        let formulas = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                Formula::parse(input).map_err(|e| LogicError::InvalidPremise {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Premises::List(formulas))
    }
}

impl From<Formula> for Premises {
    fn from(formula: Formula) -> Self {
        Premises::Single(formula)
    }
}

impl From<Vec<Formula>> for Premises {
    fn from(formulas: Vec<Formula>) -> Self {
        Premises::List(formulas)
    }
}

impl From<&[Formula]> for Premises {
    fn from(formulas: &[Formula]) -> Self {
        Premises::List(formulas.to_vec())
    }
}

// Outcome of an entailment check, with the number of premise models examined
// before the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entailment {
    pub entailed: bool,
    pub rounds: usize,
}

impl Formula {
    pub fn satisfiable(&self) -> Option<Valuation> {
        // A model of `self` over exactly `self.atoms()`, if there is one.
        Search::new(self).run()
    }

    pub fn is_satisfiable(&self) -> bool {
        self.satisfiable().is_some()
    }

    pub fn is_unsatisfiable(&self) -> bool {
        !self.is_satisfiable()
    }

    pub fn is_valid(&self) -> bool {
        // Valid iff the negation has no model.
        Formula::not(self).satisfiable().is_none()
    }

    pub fn entails(premises: &Premises, conclusion: &Formula) -> bool {
        Formula::entails_with_rounds(premises, conclusion).entailed
    }

    pub fn entails_with_rounds(premises: &Premises, conclusion: &Formula) -> Entailment {
        // Walk through the models of the premises one at a time, blocking each
        // one after checking it, until a model falsifies `conclusion` or none
        // are left.
        let verdict = |entailed, rounds| Entailment { entailed, rounds };
        let mut goal = match Formula::list_conj(premises.formulas()) {
            Some(goal) => goal,
            None => return verdict(conclusion.is_valid(), 0),
        };
        // Conclusion atoms missing from the premises are free, so they are
        // split on as well.
        let atoms = goal.atom_union(conclusion);
        let conclusion_atoms = conclusion.atoms();
        let mut rounds = 0;
        loop {
            let model = match Search::over_atoms(&goal, atoms.clone()).run() {
                Some(model) => model,
                None => return verdict(true, rounds),
            };
            rounds += 1;
            let restricted: Valuation = model
                .iter()
                .filter(|(name, _)| conclusion_atoms.contains(*name))
                .map(|(name, value)| (name.clone(), *value))
                .collect();
            debug!("entailment round {rounds}: premises hold under {model:?}");
            if !conclusion.eval_core(&|name| restricted[name]) {
                debug!("counterexample {model:?}");
                return verdict(false, rounds);
            }
            match Formula::list_conj(&Formula::literals_of(&model)) {
                Some(block) => goal = Formula::and(&goal, &Formula::not(&block)),
                // The empty valuation was the only one there is.
                None => return verdict(true, rounds),
            }
        }
    }

    pub fn equivalent(&self, formula: &Formula) -> bool {
        // Same truth value under every valuation of the atoms of both sides.
        let atoms = self.atom_union(formula);
        Valuations::new(&atoms)
            .all(|val| self.eval_core(&|name| val[name]) == formula.eval_core(&|name| val[name]))
    }

    pub fn models(&self) -> impl Iterator<Item = Valuation> + '_ {
        // Lazily, in `Valuations` order over `self.atoms()`.
        Valuations::new(&self.atoms()).filter(move |val| self.eval_core(&|name| val[name]))
    }

    pub fn all_models(&self) -> Vec<Valuation> {
        self.models().collect()
    }

    pub fn has_two_models(&self) -> bool {
        // Find one model, rule it out, and look again.
        let model = match self.satisfiable() {
            Some(model) => model,
            None => return false,
        };
        match Formula::list_conj(&Formula::literals_of(&model)) {
            Some(block) => Formula::and(self, &Formula::not(&block)).is_satisfiable(),
            None => false,
        }
    }
}
