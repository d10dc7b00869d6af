use std::time::{Duration, Instant};

use itertools::Itertools;

use crate::semantics::Valuation;

pub fn valuation_string(val: &Valuation) -> String {
    // `{p: true, q: false}`, in atom-name order.
    format!(
        "{{{}}}",
        val.iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .join(", ")
    )
}

pub fn run_repeatedly_and_average<F: FnMut()>(mut f: F, runs: u32) -> Duration {
    // Time `runs` calls of `f` and report the mean.
    let start = Instant::now();
    for _ in 0..runs {
        f();
    }
    let average = start.elapsed() / runs.max(1);
    println!("Average time over {runs} runs: {average:?}");
    average
}

#[cfg(test)]
mod utils_tests {
    use super::*;

    #[test]
    fn test_valuation_string() {
        let val: Valuation = [("q".to_string(), false), ("p".to_string(), true)]
            .into_iter()
            .collect();
        assert_eq!(valuation_string(&val), "{p: true, q: false}");
        assert_eq!(valuation_string(&Valuation::new()), "{}");
    }

    #[test]
    fn test_run_repeatedly_calls_every_time() {
        let mut calls = 0;
        run_repeatedly_and_average(|| calls += 1, 3);
        assert_eq!(calls, 3);
    }
}
