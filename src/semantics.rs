// ### Eval / Valuations ###

use std::cmp;
use std::collections::BTreeMap;
use std::io::{self, Write};

use itertools::Itertools;

use crate::error::LogicError;
use crate::formula::Formula;

// We use a BTreeMap here so that valuations print and compare in atom-name order.
pub type Valuation = BTreeMap<String, bool>;

impl Formula {
    pub(crate) fn eval_core<AtomEval: Fn(&str) -> bool>(&self, atom_eval: &AtomEval) -> bool {
        match self {
            Formula::Atom(name) => atom_eval(name),
            Formula::Not(p) => !p.eval_core(atom_eval),
            Formula::And(p, q) => p.eval_core(atom_eval) && q.eval_core(atom_eval),
            Formula::Or(p, q) => p.eval_core(atom_eval) || q.eval_core(atom_eval),
            Formula::Imp(p, q) => !p.eval_core(atom_eval) || q.eval_core(atom_eval),
        }
    }

    pub fn eval(&self, val: &Valuation) -> Result<bool, LogicError> {
        // The truth value of `self` under `val`, which must bind every atom of `self`.
        if let Some(unbound) = self
            .atom_occurrences()
            .into_iter()
            .find(|name| !val.contains_key(*name))
        {
            return Err(LogicError::UnboundAtom(unbound.to_string()));
        }
        Ok(self.eval_core(&|name| val.get(name).copied().unwrap_or_default()))
    }

    pub fn partial_eval(&self, val: &Valuation) -> Option<bool> {
        // Three-valued evaluation: `None` when the truth value still depends
        // on atoms `val` leaves unassigned.
        match self {
            Formula::Atom(name) => val.get(name).copied(),
            Formula::Not(p) => p.partial_eval(val).map(|value| !value),
            Formula::And(p, q) => match (p.partial_eval(val), q.partial_eval(val)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Formula::Or(p, q) => match (p.partial_eval(val), q.partial_eval(val)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
            Formula::Imp(p, q) => match (p.partial_eval(val), q.partial_eval(val)) {
                (Some(false), _) | (_, Some(true)) => Some(true),
                (Some(true), Some(false)) => Some(false),
                _ => None,
            },
        }
    }

    pub fn literals_of(val: &Valuation) -> Vec<Formula> {
        // One literal per binding: `p` for true, `~p` for false.
        val.iter()
            .map(|(name, &value)| {
                let atom = Formula::atom(name);
                if value {
                    atom
                } else {
                    Formula::not(&atom)
                }
            })
            .collect()
    }
}

// Every valuation over a fixed, ordered list of atoms, counting down from
// all-`true` with the first atom most significant: `[p, q]` gives TT, TF, FT, FF.
// An empty atom list yields the empty valuation exactly once.
#[derive(Debug, Clone)]
pub struct Valuations {
    atoms: Vec<String>,
    current: Option<Vec<bool>>,
}

impl Valuations {
    pub fn new(atoms: &[String]) -> Valuations {
        Valuations {
            atoms: atoms.to_vec(),
            current: Some(vec![true; atoms.len()]),
        }
    }

    fn advance(values: &mut [bool]) -> bool {
        // Step to the next row in place; false once every row was produced.
        for value in values.iter_mut().rev() {
            if *value {
                *value = false;
                return true;
            }
            *value = true;
        }
        false
    }
}

impl Iterator for Valuations {
    type Item = Valuation;

    fn next(&mut self) -> Option<Valuation> {
        let values = self.current.as_mut()?;
        let row: Valuation = self.atoms.iter().cloned().zip(values.iter().copied()).collect();
        if !Valuations::advance(values) {
            self.current = None;
        }
        Some(row)
    }
}

impl Formula {
    pub fn valuations(&self) -> Valuations {
        Valuations::new(&self.atoms())
    }

    pub fn print_truthtable(&self, dest: &mut impl Write) -> io::Result<()> {
        let atoms = self.atoms();
        let column_width = 1 + cmp::max(5, atoms.iter().map(|x| x.len()).max().unwrap_or(0));
        // Pad `s` with enough spaces to be `column_width`.
        let pad = |s: &str| format!("{s:<column_width$}");

        let header = format!("{}| formula", atoms.iter().map(|atom| pad(atom)).join(""));
        let separator = "-".repeat(header.len());
        writeln!(dest, "{header}")?;
        writeln!(dest, "{separator}")?;
        for val in Valuations::new(&atoms) {
            let inputs = atoms.iter().map(|atom| pad(&val[atom].to_string())).join("");
            let result = self.eval_core(&|name| val[name]);
            writeln!(dest, "{inputs}| {result}")?;
        }
        writeln!(dest, "{separator}")
    }
}
