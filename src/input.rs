use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use thiserror::Error;

use crate::types::{PlaneGraph, Vertex};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected 'label,x,y' or 'u,v', got {fields} fields")]
    WrongFieldCount { line: usize, fields: usize },
    #[error("line {line}: '{value}' is not a valid {expected}")]
    BadNumber {
        line: usize,
        value: String,
        expected: &'static str,
    },
    #[error("line {line}: vertex {label} declared twice")]
    DuplicateLabel { line: usize, label: u32 },
    #[error("line {line}: edge refers to undeclared vertex {label}")]
    UnknownLabel { line: usize, label: u32 },
}

/// Reads a plane graph from a file.
///
/// One item per line:
/// - `label,x,y` declares a vertex with a non-negative integer label at position `(x, y)`,
/// - `u,v` declares an edge between two declared labels.
///
/// Empty lines and lines starting with `#` are skipped. Vertices get node indices in declaration order,
/// edges keep their order too.
///
/// Example input, a triangle with one vertex inside:
/// ```text
/// 0,0,0
/// 1,4,0
/// 2,2,4
/// 3,2,1
/// 0,1
/// 1,2
/// 2,0
/// 0,3
/// 1,3
/// 2,3
/// ```
pub fn from_file(path: &str) -> Result<PlaneGraph, ParseError> {
    let file = File::open(path)?;
    parse_plane_graph(BufReader::new(file))
}

/// This is equivalent to [`from_file`], but takes string as an input.
pub fn from_str(input: &str) -> Result<PlaneGraph, ParseError> {
    parse_plane_graph(BufReader::new(Cursor::new(input)))
}

fn parse_field<T: std::str::FromStr>(line: usize, value: &str, expected: &'static str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::BadNumber {
        line,
        value: value.trim().to_string(),
        expected,
    })
}

fn parse_plane_graph<R: BufRead>(reader: R) -> Result<PlaneGraph, ParseError> {
    let mut graph = PlaneGraph::new_undirected();
    let mut by_label: HashMap<u32, NodeIndex> = HashMap::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<_> = line.split(',').collect();
        match parts[..] {
            [label, x, y] => {
                let label: u32 = parse_field(line_no, label, "label")?;
                let x: f64 = parse_field(line_no, x, "coordinate")?;
                let y: f64 = parse_field(line_no, y, "coordinate")?;
                if by_label.contains_key(&label) {
                    return Err(ParseError::DuplicateLabel { line: line_no, label });
                }
                by_label.insert(label, graph.add_node(Vertex::new(label, x, y)));
            }
            [u, v] => {
                let mut ends = [NodeIndex::end(); 2];
                for (end, field) in ends.iter_mut().zip([u, v]) {
                    let label: u32 = parse_field(line_no, field, "label")?;
                    *end = *by_label
                        .get(&label)
                        .ok_or(ParseError::UnknownLabel { line: line_no, label })?;
                }
                graph.add_edge(ends[0], ends[1], ());
            }
            _ => {
                return Err(ParseError::WrongFieldCount {
                    line: line_no,
                    fields: parts.len(),
                });
            }
        }
    }

    Ok(graph)
}
