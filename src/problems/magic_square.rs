//! The 3x3 magic square: a permutation of 1..=9 where every row, column, and
//! both diagonals sum to 15.

use crate::constraint::{all_diff, sum_equal};
use crate::csp_graph::ConstraintGraph;

const SIZE: usize = 3;
const TARGET: i32 = 15;

fn cell_name(row: usize, col: usize) -> String {
    format!("c{row}{col}")
}

/// Builds the 3x3 magic square graph: one variable per cell with domain
/// `1..=9`, an `AllDiff` over all nine cells, and a `SumEqual<15>` over each
/// row, column, and the two diagonals.
pub fn build() -> ConstraintGraph<i32> {
    let mut graph = ConstraintGraph::new();

    for row in 0..SIZE {
        for col in 0..SIZE {
            graph
                .insert_variable(cell_name(row, col), 1..=9)
                .expect("cell names are unique");
        }
    }

    let all_cells: Vec<String> = (0..SIZE)
        .flat_map(|row| (0..SIZE).map(move |col| cell_name(row, col)))
        .collect();
    let all_cell_refs: Vec<&str> = all_cells.iter().map(String::as_str).collect();
    graph
        .insert_constraint(all_diff(&all_cell_refs))
        .expect("all names were just inserted");

    for row in 0..SIZE {
        let names: Vec<String> = (0..SIZE).map(|col| cell_name(row, col)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        graph
            .insert_constraint(sum_equal(&refs, TARGET))
            .expect("all names were just inserted");
    }

    for col in 0..SIZE {
        let names: Vec<String> = (0..SIZE).map(|row| cell_name(row, col)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        graph
            .insert_constraint(sum_equal(&refs, TARGET))
            .expect("all names were just inserted");
    }

    let main_diag: Vec<String> = (0..SIZE).map(|i| cell_name(i, i)).collect();
    let anti_diag: Vec<String> = (0..SIZE).map(|i| cell_name(i, SIZE - 1 - i)).collect();
    for diag in [main_diag, anti_diag] {
        let refs: Vec<&str> = diag.iter().map(String::as_str).collect();
        graph
            .insert_constraint(sum_equal(&refs, TARGET))
            .expect("all names were just inserted");
    }

    graph.preprocess();
    graph
}

/// Renders the solved grid.
pub fn render(graph: &ConstraintGraph<i32>) -> String {
    let mut out = String::new();
    for row in 0..SIZE {
        for col in 0..SIZE {
            let id = graph
                .variable_id(&cell_name(row, col))
                .expect("cell variable exists");
            match graph.variable(id).get_value() {
                Ok(v) => out.push_str(&format!("{v:2} ")),
                Err(_) => out.push_str(" . "),
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Csp;

    #[test]
    fn solves_and_sums_to_fifteen() {
        let mut graph = build();
        let mut csp = Csp::new(&mut graph);
        assert!(csp.solve_fc());

        for row in 0..SIZE {
            let sum: i32 = (0..SIZE)
                .map(|col| {
                    let id = graph.variable_id(&cell_name(row, col)).unwrap();
                    graph.variable(id).get_value().unwrap()
                })
                .sum();
            assert_eq!(sum, TARGET);
        }
    }
}
