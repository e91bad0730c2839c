//! End-to-end solving of the TSPLIB fixtures under `tests/data`.

use std::path::PathBuf;

use little_tsp::cli::{solve, SolveOptions};
use little_tsp::config::DEFAULT_NO_EDGE;
use little_tsp::prelude::*;
use little_tsp::tsplib::EdgeWeightFormat;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn solve_fixture(name: &str) -> LittleSolver<i64> {
    let problem = TsplibProblem::from_file(fixture(name)).unwrap();
    let matrix = problem.to_matrix(DEFAULT_NO_EDGE).unwrap();
    let mut solver = LittleSolver::new(matrix).unwrap();
    solver.find_tour().unwrap();
    solver
}

fn assert_permutation(tour: &[usize], n: usize) {
    let mut cities = tour.to_vec();
    cities.sort_unstable();
    assert_eq!(cities, (0..n).collect::<Vec<_>>());
}

#[test]
fn textbook_asymmetric_instance() {
    let solver = solve_fixture("textbook5.atsp");
    assert_eq!(solver.cost(), 28);
    assert_eq!(solver.root_bound(), Some(25));
    assert!(solver.is_optimal());
    assert_permutation(solver.tour(), 5);
}

#[test]
fn symmetric_five_with_display_data() {
    let solver = solve_fixture("five_upper_diag_row.tsp");
    assert_eq!(solver.cost(), 19);
    assert!(solver.is_optimal());
    assert_permutation(solver.tour(), 5);
}

#[test]
fn triangular_formats_give_the_same_problem() {
    let upper = TsplibProblem::from_file(fixture("six_upper_row.tsp")).unwrap();
    let lower = TsplibProblem::from_file(fixture("six_lower_diag_row.tsp")).unwrap();
    assert_eq!(upper.edge_weight_format, EdgeWeightFormat::UpperRow);
    assert_eq!(lower.edge_weight_format, EdgeWeightFormat::LowerDiagRow);
    assert_eq!(
        upper.to_matrix(DEFAULT_NO_EDGE).unwrap(),
        lower.to_matrix(DEFAULT_NO_EDGE).unwrap()
    );

    let a = solve_fixture("six_upper_row.tsp");
    let b = solve_fixture("six_lower_diag_row.tsp");
    assert_eq!(a.cost(), 88);
    assert_eq!(a.cost(), b.cost());
    assert_eq!(a.tour(), b.tour());
}

#[test]
fn nine_city_asymmetric_instance() {
    let solver = solve_fixture("nine.atsp");
    assert_eq!(solver.cost(), 219);
    assert!(solver.is_optimal());
    assert_permutation(solver.tour(), 9);
    assert_eq!(solver.tour_cost(solver.tour()).unwrap(), 219);
}

#[test]
fn coordinate_problems_are_rejected() {
    let result = TsplibProblem::from_file(fixture("euclidean.tsp"));
    assert!(matches!(result, Err(TspError::Unsupported { .. })));
}

#[test]
fn solved_tour_file_lists_the_tour() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nine.tour");
    let report = solve(&SolveOptions {
        input: fixture("nine.atsp"),
        ..SolveOptions::default()
    })
    .unwrap();
    let solution = report.solution.unwrap();

    TourFile::new(&report.name, &solution.tour, solution.cost)
        .save(&output)
        .unwrap();
    let text = std::fs::read_to_string(&output).unwrap();
    let cities: Vec<usize> = text
        .lines()
        .skip_while(|l| *l != "TOUR_SECTION")
        .skip(1)
        .take_while(|l| *l != "-1")
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(
        cities,
        solution.tour.iter().map(|c| c + 1).collect::<Vec<_>>()
    );
    assert!(text.contains("COMMENT : Length = 219."));
}
