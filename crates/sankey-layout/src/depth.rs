use crate::align::NodeAlign;
use crate::graph::SankeyGraph;
use crate::options::SankeyOptions;

#[derive(Debug, Clone, Copy)]
enum Sweep {
    Forward,
    Backward,
}

/// Layered breadth-first sweep starting from every node. Each round assigns the round number to
/// its frontier, then collects the distinct neighbors (first-seen order) as the next frontier.
///
/// Returns the number of rounds. A cyclic graph never drains its frontier, so the sweep stops
/// after `node_count` rounds.
fn sweep(graph: &mut SankeyGraph, direction: Sweep) -> usize {
    let n = graph.nodes.len();
    let mut current: Vec<usize> = (0..n).collect();
    let mut next: Vec<usize> = Vec::new();
    let mut next_seen = vec![false; n];
    let mut x: usize = 0;
    while !current.is_empty() {
        if x >= n {
            tracing::warn!(?direction, rounds = x, "sankey graph contains a cycle");
            break;
        }
        for &node_idx in &current {
            let links = match direction {
                Sweep::Forward => {
                    graph.nodes[node_idx].depth = x;
                    &graph.nodes[node_idx].source_links
                }
                Sweep::Backward => {
                    graph.nodes[node_idx].height = x;
                    &graph.nodes[node_idx].target_links
                }
            };
            for &li in links {
                let other = match direction {
                    Sweep::Forward => graph.links[li].target,
                    Sweep::Backward => graph.links[li].source,
                };
                if !next_seen[other] {
                    next_seen[other] = true;
                    next.push(other);
                }
            }
        }
        x += 1;
        current = std::mem::take(&mut next);
        next_seen.fill(false);
    }
    x
}

/// Assigns `depth`, `height` and the horizontal extent of every node.
pub(crate) fn compute_node_depths(
    graph: &mut SankeyGraph,
    opts: &SankeyOptions,
    align: &dyn NodeAlign,
) {
    let x = sweep(graph, Sweep::Forward);
    sweep(graph, Sweep::Backward);

    let extent = opts.extent;
    let kx = if x <= 1 {
        0.0
    } else {
        (extent.width() - opts.node_width) / (x as f64 - 1.0)
    };
    let last = x.saturating_sub(1) as isize;
    for i in 0..graph.nodes.len() {
        let column = align.align(graph, i, x).clamp(0, last) as usize;
        let node = &mut graph.nodes[i];
        node.layer = column;
        node.x0 = extent.x0 + column as f64 * kx;
        node.x1 = node.x0 + opts.node_width;
    }

    tracing::debug!(columns = x, kx, "assigned node depths");
}
