use shift_drawing::debugging::layout_to_dot;
use shift_drawing::draw;
use shift_drawing::testing::triangulations::random_triangulation;

/// Example of drawing a random triangulation with the shift method.
/// Usage: `cargo run --example draw -- 20 7 > layout.dot`, vertex count and seed are optional.
fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let n = args.next().and_then(|a| a.parse().ok()).unwrap_or(12);
    let seed = args.next().and_then(|a| a.parse().ok()).unwrap_or(0);

    let graph = random_triangulation(n, seed);
    let drawing = match draw(&graph) {
        Ok(drawing) => drawing,
        Err(e) => {
            tracing::error!(error = %e, "drawing failed");
            std::process::exit(1);
        }
    };

    tracing::info!(n, width = drawing.width(), height = drawing.height(), "drawn");
    match layout_to_dot(&graph, &drawing) {
        Ok(dot) => print!("{}", dot),
        Err(e) => tracing::error!(error = %e, "rendering failed"),
    }
}
