//! Horizontal alignment strategies.
//!
//! A strategy picks a column for each node once depths and heights are known. The result is
//! clamped to `[0, columns - 1]` by the caller, so strategies may return out-of-range values.

use crate::graph::SankeyGraph;
use std::str::FromStr;

pub trait NodeAlign: Send + Sync {
    fn align(&self, graph: &SankeyGraph, node: usize, columns: usize) -> isize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Column = depth.
    Left,
    /// Column = `columns - 1 - height`.
    Right,
    /// Like `Left`, but sinks are pushed to the last column.
    #[default]
    Justify,
    /// Like `Left`, but sources sit one column before their nearest target.
    Center,
    /// Halfway (rounded down) between the `Left` and `Right` columns.
    Midpoint,
}

impl NodeAlign for Align {
    fn align(&self, graph: &SankeyGraph, node: usize, columns: usize) -> isize {
        let n = &graph.nodes[node];
        let last = columns as isize - 1;
        match self {
            Align::Left => n.depth as isize,
            Align::Right => last - n.height as isize,
            Align::Justify => {
                if n.source_links.is_empty() {
                    last
                } else {
                    n.depth as isize
                }
            }
            Align::Center => {
                if !n.target_links.is_empty() {
                    n.depth as isize
                } else if !n.source_links.is_empty() {
                    let min_target_depth = n
                        .source_links
                        .iter()
                        .map(|&li| graph.nodes[graph.links[li].target].depth)
                        .min()
                        .unwrap_or(0);
                    min_target_depth as isize - 1
                } else {
                    0
                }
            }
            Align::Midpoint => (n.depth as isize + last - n.height as isize).div_euclid(2),
        }
    }
}

impl FromStr for Align {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "justify" => Ok(Self::Justify),
            "center" => Ok(Self::Center),
            "midpoint" => Ok(Self::Midpoint),
            _ => Err(()),
        }
    }
}

/// Places each node in the column stored under an integer attribute of its record, e.g.
/// `{"name": "a", "column": 2}`. Nodes without the attribute stay at their depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAttribute(pub String);

impl NodeAlign for ColumnAttribute {
    fn align(&self, graph: &SankeyGraph, node: usize, _columns: usize) -> isize {
        let n = &graph.nodes[node];
        n.attributes
            .get(&self.0)
            .and_then(|v| v.as_i64())
            .map(|c| c as isize)
            .unwrap_or(n.depth as isize)
    }
}
