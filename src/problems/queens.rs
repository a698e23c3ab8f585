//! The N-queens problem: one variable per column, its value the row holding
//! that column's queen.

use crate::constraint::{all_diff2, difference_not_equal};
use crate::csp_graph::ConstraintGraph;

/// Builds an N-queens graph: `size` variables named `Q0..Q{size-1}`, each
/// with domain `0..size`, pairwise constrained by `AllDiff2` (no shared row)
/// and `DifferenceNotEqual<j-i>` (no shared diagonal). Columns are distinct
/// by construction (one variable per column), so no column constraint is
/// needed.
pub fn build(size: usize) -> ConstraintGraph<i32> {
    let mut graph = ConstraintGraph::new();

    for col in 0..size {
        graph
            .insert_variable(format!("Q{col}"), 0..size as i32)
            .expect("column names are unique");
    }

    for i in 0..size {
        for j in (i + 1)..size {
            let qi = format!("Q{i}");
            let qj = format!("Q{j}");
            graph
                .insert_constraint(all_diff2(&qi, &qj))
                .expect("both names were just inserted");
            graph
                .insert_constraint(difference_not_equal(&qi, &qj, (j - i) as i32))
                .expect("both names were just inserted");
        }
    }

    graph.preprocess();
    graph
}

/// Renders the board, one queen per column, after a successful solve.
pub fn render(size: usize, graph: &ConstraintGraph<i32>) -> String {
    let mut rows = vec![vec!['.'; size]; size];
    for col in 0..size {
        let name = format!("Q{col}");
        let id = graph.variable_id(&name).expect("column variable exists");
        if let Ok(row) = graph.variable(id).get_value() {
            rows[row as usize][col] = 'Q';
        }
    }

    let mut out = String::new();
    for row in rows {
        for cell in row {
            out.push(cell);
            out.push(' ');
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
    fn four_queens_is_solvable() {
        let mut graph = build(4);
        let mut csp = Csp::new(&mut graph);
        assert!(csp.solve_dfs());
    }

    #[test]
    fn two_queens_is_not() {
        let mut graph = build(2);
        let mut csp = Csp::new(&mut graph);
        assert!(!csp.solve_dfs());
    }

    #[test]
    fn hundred_queens_solvable_with_forward_checking() {
        let mut graph = build(100);
        let mut csp = Csp::new(&mut graph);
        assert!(csp.solve_fc());
    }
}
