//! Property-based tests exercised through the crate's public API.

use proptest::prelude::*;

use csp_solver::constraint::{all_diff2, difference_not_equal};
use csp_solver::csp_graph::ConstraintGraph;
use csp_solver::solver::Csp;

fn n_queens(size: usize) -> ConstraintGraph<i32> {
    let mut g = ConstraintGraph::new();
    for col in 0..size {
        g.insert_variable(format!("x{col}"), 0..size as i32).unwrap();
    }
    for i in 0..size {
        for j in (i + 1)..size {
            let (xi, xj) = (format!("x{i}"), format!("x{j}"));
            g.insert_constraint(all_diff2(&xi, &xj)).unwrap();
            g.insert_constraint(difference_not_equal(&xi, &xj, (j - i) as i32))
                .unwrap();
        }
    }
    g.preprocess();
    g
}

proptest! {
    #[test]
    fn algorithm_equivalence_on_queens(size in 1usize..8) {
        let mut g_dfs = n_queens(size);
        let dfs = Csp::new(&mut g_dfs).solve_dfs();

        let mut g_fc = n_queens(size);
        let fc = Csp::new(&mut g_fc).solve_fc();

        let mut g_arc = n_queens(size);
        let arc = Csp::new(&mut g_arc).solve_arc();

        prop_assert_eq!(dfs, fc);
        prop_assert_eq!(fc, arc);
    }

    #[test]
    fn preprocess_symmetry_on_random_chains(len in 2usize..8) {
        let mut g = ConstraintGraph::new();
        for i in 0..len {
            g.insert_variable(format!("v{i}"), [0, 1]).unwrap();
        }
        for i in 0..(len - 1) {
            g.insert_constraint(all_diff2(&format!("v{i}"), &format!("v{}", i + 1))).unwrap();
        }
        g.preprocess();

        for i in 0..len {
            for j in 0..len {
                if i == j {
                    continue;
                }
                let x = g.variable_id(&format!("v{i}")).unwrap();
                let y = g.variable_id(&format!("v{j}")).unwrap();
                prop_assert_eq!(
                    g.get_neighbors(x).contains(&y),
                    g.get_neighbors(y).contains(&x)
                );
                prop_assert_eq!(
                    g.get_connecting_constraints(x, y),
                    g.get_connecting_constraints(y, x)
                );
            }
        }
    }

    #[test]
    fn soundness_every_solution_checks_out(size in 3usize..7) {
        let mut g = n_queens(size);
        if Csp::new(&mut g).solve_dfs() {
            for col in 0..size {
                let id = g.variable_id(&format!("x{col}")).unwrap();
                for cid in g.get_constraints(id).iter().copied() {
                    prop_assert!(g.constraint(cid).check(g.get_all_variables()));
                }
            }
        }
    }
}
