use little_tsp::config::SolverConfig;
use little_tsp::prelude::*;

const NO_EDGE: i64 = 999_999_999;

/// Deterministic pseudo-random instance.
fn lcg_instance(n: usize, mut seed: u64) -> CostMatrix<i64> {
    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::with_capacity(n);
        for j in 0..n {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            row.push(if i == j { NO_EDGE } else { 1 + (seed >> 33) as i64 % 100 });
        }
        rows.push(row);
    }
    CostMatrix::from_rows(rows, NO_EDGE).unwrap()
}

fn solved(matrix: CostMatrix<i64>) -> LittleSolver<i64> {
    let mut solver = LittleSolver::new(matrix).unwrap();
    solver.find_tour().unwrap();
    solver
}

// H0: Two fresh solvers disagree on the same instance
// Falsification: solve 8-city instances twice and compare everything
#[test]
fn h0_1_fresh_solvers_disagree() {
    for seed in [1, 7, 42] {
        let a = solved(lcg_instance(8, seed));
        let b = solved(lcg_instance(8, seed));
        assert_eq!(a.tour(), b.tour(), "seed {seed}");
        assert_eq!(a.cost(), b.cost(), "seed {seed}");
        assert_eq!(a.stats(), b.stats(), "seed {seed}");
    }
}

// H0: The reported cost is not the cost of the reported tour
// Falsification: recompute every tour from the input matrix
#[test]
fn h0_2_cost_differs_from_tour() {
    for seed in 0..10 {
        let solver = solved(lcg_instance(9, seed));
        assert_eq!(solver.tour_cost(solver.tour()).unwrap(), solver.cost());
        assert!(solver.cost() >= solver.root_bound().unwrap());
    }
}

// H0: A node budget can still claim optimality
// Falsification: cap the tree well below what a 10-city search needs
#[test]
fn h0_3_budget_claims_optimality() {
    let config = SolverConfig {
        max_nodes: Some(10),
        ..SolverConfig::default()
    };
    let mut solver = LittleSolver::with_config(lcg_instance(10, 3), config).unwrap();
    solver.find_tour().unwrap();
    assert!(!solver.is_optimal());
    assert!(solver.stats().truncated);

    let unlimited = solved(lcg_instance(10, 3));
    assert!(unlimited.is_optimal());
    if let Some(solution) = solver.solution() {
        assert!(solution.cost >= unlimited.cost());
    }
}

// H0: Solving with cost verification off changes the result
// Falsification: compare both modes on the same instances
#[test]
fn h0_4_verification_changes_result() {
    for seed in [5, 6] {
        let config = SolverConfig {
            verify_cost: false,
            ..SolverConfig::default()
        };
        let mut fast = LittleSolver::with_config(lcg_instance(8, seed), config).unwrap();
        fast.find_tour().unwrap();
        let checked = solved(lcg_instance(8, seed));
        assert_eq!(fast.solution(), checked.solution());
    }
}

// H0: Cost types disagree on the optimum
// Falsification: solve the same instance over u32 and i64
#[test]
fn h0_5_cost_types_disagree() {
    let wide = lcg_instance(7, 11);
    let rows: Vec<Vec<u32>> = (0..7)
        .map(|i| {
            wide.row(i)
                .unwrap()
                .iter()
                .map(|&v| if v == NO_EDGE { u32::MAX } else { v as u32 })
                .collect()
        })
        .collect();
    let mut narrow = LittleSolver::new(CostMatrix::from_rows(rows, u32::MAX).unwrap()).unwrap();
    narrow.find_tour().unwrap();

    let wide = solved(wide);
    assert_eq!(i64::from(narrow.cost()), wide.cost());
}
