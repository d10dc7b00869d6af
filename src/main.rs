use std::env;
use std::io::stdout;
use std::process::ExitCode;

use itertools::Itertools;
use log::info;

use propositional_sat::utils::{run_repeatedly_and_average, valuation_string};
use propositional_sat::{Entailment, Formula, LogicError, Premises};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn describe(formula: &Formula) -> std::io::Result<()> {
    let mut stdout = stdout();
    println!("{}", formula.pretty());
    match formula.satisfiable() {
        Some(model) => println!("Satisfiable, e.g. {}", valuation_string(&model)),
        None => println!("Unsatisfiable"),
    }
    println!("Is valid?: {}", formula.is_valid());
    println!("Has two models?: {}", formula.has_two_models());
    println!(
        "Length {}, {} subformulas, atoms {:?}",
        formula.length(),
        formula.subformulas().len(),
        formula.atoms()
    );
    println!(
        "NNF: {}  CNF: {}  DNF: {}",
        formula.is_nnf(),
        formula.is_cnf(),
        formula.is_dnf()
    );
    formula.print_truthtable(&mut stdout)
}

fn check_entailment(input: &str) -> Result<(), LogicError> {
    // `premise; premise; ... |= conclusion`
    let (premises, conclusion) = input.split_once("|=").unwrap_or(("", input));
    let premises: Vec<&str> = premises
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let premises = Premises::parse(&premises)?;
    let conclusion = Formula::parse(conclusion)?;
    let Entailment { entailed, rounds } = Formula::entails_with_rounds(&premises, &conclusion);
    println!(
        "{} |= {}: {entailed} ({rounds} premise models examined)",
        premises.formulas().iter().join("; "),
        conclusion
    );
    Ok(())
}

fn run_demo() -> std::io::Result<()> {
    let formula1 = Formula::atom("p");
    let formula2 = Formula::atom("q");
    let formula3 = Formula::and(&formula1, &formula2);
    let formula4 = Formula::and(&Formula::atom("p"), &Formula::atom("s"));
    let formula5 = Formula::not(&formula4);
    let formula6 = Formula::or(&formula5, &Formula::atom("q"));
    let formula7 = Formula::imp(
        &formula4,
        &Formula::and(&Formula::atom("q"), &Formula::not(&Formula::atom("r"))),
    );
    let formula8 = Formula::imp(
        &Formula::not(&Formula::and(
            &Formula::atom("p"),
            &Formula::not(&Formula::atom("s")),
        )),
        &Formula::and(&Formula::atom("q"), &formula5),
    );

    for (i, formula) in [
        &formula1, &formula2, &formula3, &formula4, &formula5, &formula6, &formula7, &formula8,
    ]
    .into_iter()
    .enumerate()
    {
        println!("\nExample {}:", i + 1);
        describe(formula)?;
    }

    println!("\nEquivalence:");
    let lhs = Formula::imp(&formula1, &formula2);
    let rhs = Formula::or(&Formula::not(&formula1), &formula2);
    println!("{lhs} == {rhs}?: {}", lhs.equivalent(&rhs));
    println!("{formula1} == {formula2}?: {}", formula1.equivalent(&formula2));

    println!("\nConsequence:");
    let premises = Premises::from(formula1.clone());
    for conclusion in [Formula::or(&formula1, &formula2), formula2.clone()] {
        println!(
            "{formula1} |= {conclusion}?: {}",
            Formula::entails(&premises, &conclusion)
        );
    }

    println!("\nAll models of {formula6}:");
    for model in formula6.all_models() {
        println!("  {}", valuation_string(&model));
    }

    let formula = Formula::parse("(a \\/ ~b) /\\ (c \\/ d) \\/ (a \\/ b) /\\ (~c \\/ ~d)")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    println!("\nTiming model enumeration for {formula}");
    run_repeatedly_and_average(
        || {
            formula.all_models();
        },
        100,
    );
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        info!("no formulas given, running the demo");
        if let Err(e) = run_demo() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let mut status = ExitCode::SUCCESS;
    for arg in &args {
        if arg.contains("|=") {
            if let Err(e) = check_entailment(arg) {
                eprintln!("{arg}: {e}");
                status = ExitCode::FAILURE;
            }
            continue;
        }
        match Formula::parse(arg) {
            Ok(formula) => {
                if let Err(e) = describe(&formula) {
                    eprintln!("{e}");
                    return ExitCode::FAILURE;
                }
            }
            Err(e) => {
                eprintln!("{arg}: {e}");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
