use shift_drawing::input::{from_file, from_str};
use shift_drawing::{Config, Session, Step};

/// Example of stepping through a drawing session, printing every elimination and placement.
/// Usage: `cargo run --example order -- graph.txt`, without a path a small built-in graph is used.
fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    // outer triangle 0 1 2, vertices 3 and 4 inside
    let builtin = "
        0,0,0
        1,6,0
        2,3,6
        3,2,2
        4,4,2
        0,1
        1,2
        2,0
        0,3
        2,3
        0,4
        1,4
        2,4
        3,4
        ";

    let graph = match std::env::args().nth(1) {
        Some(path) => from_file(&path),
        None => from_str(builtin),
    };
    let graph = match graph {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("cannot read graph: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = match Session::new(&graph, Config::default()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("graph rejected: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        match session.step() {
            Ok(Step::Eliminated(e)) => println!("eliminate {} (outer face {:?})", e.vertex, e.outer_face),
            Ok(Step::Placed(p)) => println!(
                "place {} at {:?} between {:?} and {:?}, {} moves",
                p.vertex,
                p.position,
                p.left,
                p.right,
                p.moves.len()
            ),
            Ok(Step::Finished) => break,
            Err(e) => {
                eprintln!("stopped: {}", e);
                std::process::exit(1);
            }
        }
    }
}
