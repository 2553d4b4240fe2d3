use crate::error::NonSimple;
use crate::graph::{HashMapGraph, MutableGraph};
#[cfg(feature = "log")]
use log::warn;
use std::convert::TryFrom;
use std::io;
use std::io::BufRead;

/// Graph in the PACE `.gr` format: `c` comment lines, a `p tw n m` header and
/// one `u v` line per edge, vertices numbered `1..=n`.
pub struct PaceReader<T: BufRead>(pub T);

/// Graph in the DIMACS format: `c` comment lines, a `p edge n m` header and
/// one `e u v` line per edge, vertices numbered `1..=n`.
pub struct DimacsReader<T: BufRead>(pub T);

#[derive(Clone, Copy)]
enum Format {
    Pace,
    Dimacs,
}

impl Format {
    fn edge_prefix(&self) -> Option<&'static str> {
        match self {
            Format::Pace => None,
            Format::Dimacs => Some("e"),
        }
    }
}

fn invalid_input(line_number: usize, message: impl std::fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("line {}: {}", line_number, message),
    )
}

fn parse_pair<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line_number: usize,
) -> Result<(usize, usize), io::Error> {
    let mut next = || -> Result<usize, io::Error> {
        tokens
            .next()
            .ok_or_else(|| invalid_input(line_number, "missing number"))?
            .parse::<usize>()
            .map_err(|e| invalid_input(line_number, e))
    };
    let a = next()?;
    let b = next()?;
    if tokens.next().is_some() {
        return Err(invalid_input(line_number, "trailing tokens"));
    }
    Ok((a, b))
}

fn read_graph<T: BufRead>(reader: T, format: Format) -> Result<HashMapGraph, io::Error> {
    let mut graph: Option<HashMapGraph> = None;
    let mut order = 0;
    let mut declared_edges = 0;
    let mut edges = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;
        let mut tokens = line.split_whitespace();
        let first = match tokens.next() {
            Some(first) => first,
            None => continue,
        };
        match first {
            "c" => {}
            "p" => {
                if graph.is_some() {
                    return Err(invalid_input(line_number, "repeated header"));
                }
                // problem descriptor: `tw` for PACE, `edge` or `col` for DIMACS
                if tokens.next().is_none() {
                    return Err(invalid_input(line_number, "missing problem descriptor"));
                }
                let (n, m) = parse_pair(tokens, line_number)?;
                let mut new_graph = HashMapGraph::try_with_capacity(n)
                    .map_err(|e| invalid_input(line_number, format!("{} vertices: {}", n, e)))?;
                for v in 0..n {
                    new_graph.add_vertex(v);
                }
                graph = Some(new_graph);
                order = n;
                declared_edges = m;
            }
            _ => {
                let graph = graph
                    .as_mut()
                    .ok_or_else(|| invalid_input(line_number, "edge before header"))?;
                let (u, v) = match format.edge_prefix() {
                    Some(prefix) if first == prefix => parse_pair(tokens, line_number)?,
                    Some(_) => return Err(invalid_input(line_number, "unknown line")),
                    None => parse_pair(std::iter::once(first).chain(tokens), line_number)?,
                };
                if u == 0 || v == 0 || u > order || v > order {
                    return Err(invalid_input(
                        line_number,
                        format!("vertex out of range 1..={}", order),
                    ));
                }
                graph.try_add_edge(u - 1, v - 1).map_err(|e| match e {
                    NonSimple::SelfLoop(_) => invalid_input(line_number, format!("self loop {} {}", u, v)),
                    NonSimple::MultiEdge(_) => {
                        invalid_input(line_number, format!("repeated edge {} {}", u, v))
                    }
                    other => invalid_input(line_number, other),
                })?;
                edges += 1;
            }
        }
    }
    let graph = graph.ok_or_else(|| invalid_input(0, "missing header"))?;
    if edges != declared_edges {
        #[cfg(feature = "log")]
        warn!(
            "header declares {} edges, found {}",
            declared_edges, edges
        );
    }
    Ok(graph)
}

impl<T: BufRead> TryFrom<PaceReader<T>> for HashMapGraph {
    type Error = io::Error;

    fn try_from(reader: PaceReader<T>) -> Result<Self, Self::Error> {
        read_graph(reader.0, Format::Pace)
    }
}

impl<T: BufRead> TryFrom<DimacsReader<T>> for HashMapGraph {
    type Error = io::Error;

    fn try_from(reader: DimacsReader<T>) -> Result<Self, Self::Error> {
        read_graph(reader.0, Format::Dimacs)
    }
}
