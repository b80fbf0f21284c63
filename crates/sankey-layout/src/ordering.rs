//! Deterministic node ordering pass.
//!
//! Runs after relaxation and link routing. It ranks each parent's next-layer children by where
//! their links leave the parent, restacks those children in that order, and carries every
//! resulting move down to the rest of the graph. Columns are then settled so nothing overlaps,
//! and the links are routed again against the final node positions.
//!
//! Only "one-level-ahead" edges take part in ordering and propagation: a link counts when its
//! target's depth is exactly one more than its source's depth.

use crate::breadth::settle_columns;
use crate::graph::SankeyGraph;
use crate::links::route_links;
use crate::options::SankeyOptions;
use crate::util::order_by;
use std::collections::VecDeque;

pub(crate) fn arrange_nodes(graph: &mut SankeyGraph, opts: &SankeyOptions) {
    assign_order_numbers(graph);
    restack_children(graph, opts.node_padding);
    settle_columns(graph, opts);
    if opts.first_level_node_padding != 0.0 {
        apply_first_level_padding(graph, opts.first_level_node_padding);
    }
    route_links(graph);
}

/// Distinct next-layer targets of `node`, in `source_links` order.
fn one_level_targets(graph: &SankeyGraph, node: usize) -> Vec<usize> {
    let depth = graph.nodes[node].depth;
    let mut out: Vec<usize> = Vec::new();
    for &li in &graph.nodes[node].source_links {
        let t = graph.links[li].target;
        if graph.nodes[t].depth == depth + 1 && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

/// Ranks each node's next-layer links by departure position and stamps the 1-based rank on the
/// link's target. A target with several parents keeps the rank from the last parent (by index).
fn assign_order_numbers(graph: &mut SankeyGraph) {
    for i in 0..graph.nodes.len() {
        let depth = graph.nodes[i].depth;
        let mut links: Vec<usize> = graph.nodes[i]
            .source_links
            .iter()
            .copied()
            .filter(|&li| graph.nodes[graph.links[li].target].depth == depth + 1)
            .collect();
        order_by(&mut links, |&li| graph.links[li].y0);
        for (rank, li) in links.into_iter().enumerate() {
            let t = graph.links[li].target;
            graph.nodes[t].order_number = Some(rank + 1);
        }
    }
}

/// Stacks each parent's children from the topmost of them down, in order-number order. A moved
/// child drags its descendants along; over the whole pass every node is shifted by propagation
/// at most once, so a descendant shared by several moved children keeps the first offset only.
fn restack_children(graph: &mut SankeyGraph, py: f64) {
    let mut moved = 0usize;
    let mut visited = vec![false; graph.nodes.len()];
    for i in 0..graph.nodes.len() {
        let mut children = one_level_targets(graph, i);
        let Some(mut y) = children
            .iter()
            .map(|&c| graph.nodes[c].y0)
            .reduce(f64::min)
        else {
            continue;
        };
        children.sort_by_key(|&c| graph.nodes[c].order_number);

        for c in children {
            let height = graph.nodes[c].breadth();
            let dy = y - graph.nodes[c].y0;
            if dy != 0.0 {
                graph.shift_node(c, dy);
                visited[c] = true;
                propagate(graph, c, dy, &mut visited);
                moved += 1;
            }
            y += py + height;
        }
    }
    tracing::debug!(moved, "restacked sibling nodes");
}

/// Shifts everything reachable from `from` through next-layer links by `dy`. A node already in
/// `visited` is neither shifted nor expanded again.
fn propagate(graph: &mut SankeyGraph, from: usize, dy: f64, visited: &mut [bool]) {
    let mut queue: VecDeque<usize> = one_level_targets(graph, from).into();
    while let Some(n) = queue.pop_front() {
        if visited[n] {
            continue;
        }
        visited[n] = true;
        graph.shift_node(n, dy);
        queue.extend(one_level_targets(graph, n));
    }
}

/// Spreads the depth-1 nodes apart: the i-th of them (input order) moves down by
/// `i * padding`, and its descendants move with it. Each descendant moves at most once during
/// the whole step, with the first depth-1 node that reaches it.
fn apply_first_level_padding(graph: &mut SankeyGraph, padding: f64) {
    let first_level: Vec<usize> = graph
        .nodes
        .iter()
        .filter(|n| n.depth == 1)
        .map(|n| n.index)
        .collect();

    let mut visited = vec![false; graph.nodes.len()];
    for (i, &ni) in first_level.iter().enumerate() {
        let dy = i as f64 * padding;
        propagate(graph, ni, dy, &mut visited);
        visited[ni] = true;
        graph.shift_node(ni, dy);
    }
    tracing::debug!(nodes = first_level.len(), padding, "applied first-level padding");
}
