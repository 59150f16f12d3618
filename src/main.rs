use gridpath::grid::OccupancyKind;
use gridpath::{Config, Frame, Node};
use serde::Serialize;
use std::env;
use std::process::ExitCode;

/// Line-oriented JSON record of one tick
#[derive(Serialize)]
struct FrameDump<'a> {
    #[serde(flatten)]
    report: &'a gridpath::TickReport,
    edges: Vec<gridpath::grid::EdgeSnapshot>,
}

/// Draw the grid with the path and obstacles, top row first
fn draw(frame: &Frame<'_>) -> String {
    let graph = frame.graph();
    let report = frame.report;
    let on_path = |node: Node| {
        report
            .path
            .as_ref()
            .map_or(false, |p| p.nodes.contains(&node))
    };

    let mut out = String::new();
    for y in (0..graph.height).rev() {
        for x in 0..graph.width {
            let node = Node::cell(x, y);
            let marker = report.markers.iter().find(|m| m.position == node);
            let symbol = match marker {
                Some(m) if m.kind == OccupancyKind::Static => '#',
                Some(_) => 'X',
                None if on_path(node) => '*',
                None => '.',
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

fn main() -> ExitCode {
    env_logger::init();

    let mut config_path = "config.toml".to_string();
    let mut json = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            other => config_path = other.to_string(),
        }
    }

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut simulation = match config.build_simulation() {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut render = |frame: &Frame<'_>| {
        if json {
            let dump = FrameDump {
                report: frame.report,
                edges: frame.snapshot(),
            };
            match serde_json::to_string(&dump) {
                Ok(line) => println!("{}", line),
                Err(e) => eprintln!("Failed to serialize frame: {}", e),
            }
            return;
        }

        let summary = match &frame.report.path {
            Some(path) => format!(
                "cost {}: {}",
                path.cost,
                gridpath::pathfinding::format_path(&path.nodes)
            ),
            None => "no path".to_string(),
        };
        println!("tick {} - {}", frame.report.tick, summary);
        println!("{}", draw(frame));
    };

    match simulation.run(config.simulation.ticks, &mut render) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
