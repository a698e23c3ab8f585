use csp_solver::problems::{magic_square, queens};
use csp_solver::solver::Csp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut queens_graph = queens::build(8);
    let mut queens_csp = Csp::new(&mut queens_graph);
    if queens_csp.solve_fc() {
        println!("8-queens solved in {} iterations:", queens_csp.iteration_counter());
        print!("{}", queens::render(8, &queens_graph));
    } else {
        println!("8-queens: no solution found");
    }

    println!();

    let mut square_graph = magic_square::build();
    let mut square_csp = Csp::new(&mut square_graph);
    if square_csp.solve_fc() {
        println!(
            "magic square solved in {} recursive calls:",
            square_csp.recursive_call_counter()
        );
        print!("{}", magic_square::render(&square_graph));
    } else {
        println!("magic square: no solution found");
    }
}
