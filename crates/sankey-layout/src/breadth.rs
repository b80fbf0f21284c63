use crate::graph::SankeyGraph;
use crate::options::SankeyOptions;
use crate::util::f64_cmp;

/// Groups nodes into columns by layer (ascending). Empty layers are dropped; within a column,
/// nodes keep input order.
pub(crate) fn columns(graph: &SankeyGraph) -> Vec<Vec<usize>> {
    let count = graph.nodes.iter().map(|n| n.layer + 1).max().unwrap_or(0);
    let mut columns: Vec<Vec<usize>> = vec![Vec::new(); count];
    for n in &graph.nodes {
        columns[n.layer].push(n.index);
    }
    columns.retain(|c| !c.is_empty());
    columns
}

struct BreadthSolver<'a> {
    graph: &'a mut SankeyGraph,
    columns: Vec<Vec<usize>>,
    py: f64,
    y0_extent: f64,
    y1_extent: f64,
}

impl BreadthSolver<'_> {
    /// The global value-to-pixel scale: the tightest column decides, so no column overflows.
    fn scale(&self) -> f64 {
        let height = self.y1_extent - self.y0_extent;
        let mut ky = f64::INFINITY;
        for col in &self.columns {
            let sum_values: f64 = col.iter().map(|&ni| self.graph.nodes[ni].value).sum();
            if !(sum_values > 0.0) {
                continue;
            }
            let denom = height - (col.len() as f64 - 1.0) * self.py;
            ky = ky.min(denom / sum_values);
        }
        if ky.is_finite() { ky.max(0.0) } else { 0.0 }
    }

    fn initialize_node_breadth(&mut self) -> f64 {
        let ky = self.scale();
        for col in &self.columns {
            for (i, &ni) in col.iter().enumerate() {
                let node = &mut self.graph.nodes[ni];
                node.y0 = i as f64;
                node.y1 = node.y0 + node.value * ky;
            }
        }
        for link in &mut self.graph.links {
            link.width = link.value * ky;
            if link.value > 0.0 {
                link.width = link.width.max(1.0);
            }
        }
        ky
    }

    fn relax_left_to_right(&mut self, alpha: f64) {
        let graph = &mut *self.graph;
        for col in &self.columns {
            for &ni in col {
                if graph.nodes[ni].target_links.is_empty() {
                    continue;
                }
                let mut y = 0.0;
                let mut w = 0.0;
                for &li in &graph.nodes[ni].target_links {
                    let link = &graph.links[li];
                    y += graph.nodes[link.source].center() * link.value;
                    w += link.value;
                }
                if !(w > 0.0) {
                    continue;
                }
                let dy = (y / w - graph.nodes[ni].center()) * alpha;
                graph.nodes[ni].translate(dy);
            }
        }
    }

    fn relax_right_to_left(&mut self, alpha: f64) {
        let graph = &mut *self.graph;
        for col in self.columns.iter().rev() {
            for &ni in col {
                if graph.nodes[ni].source_links.is_empty() {
                    continue;
                }
                let mut y = 0.0;
                let mut w = 0.0;
                for &li in &graph.nodes[ni].source_links {
                    let link = &graph.links[li];
                    y += graph.nodes[link.target].center() * link.value;
                    w += link.value;
                }
                if !(w > 0.0) {
                    continue;
                }
                let dy = (y / w - graph.nodes[ni].center()) * alpha;
                graph.nodes[ni].translate(dy);
            }
        }
    }

    fn resolve_collisions(&mut self) {
        let nodes = &mut self.graph.nodes;
        let py = self.py;
        for column in &mut self.columns {
            if column.is_empty() {
                continue;
            }
            column.sort_by(|&a, &b| f64_cmp(nodes[a].y0, nodes[b].y0));

            // Push any overlapping nodes down.
            let mut y = self.y0_extent;
            for &ni in column.iter() {
                let dy = y - nodes[ni].y0;
                if dy > 0.0 {
                    nodes[ni].translate(dy);
                }
                y = nodes[ni].y1 + py;
            }

            // If the bottommost node goes outside the bounds, push it back up, then push any
            // overlapping nodes back up. The top bound is not re-checked.
            let dy = y - py - self.y1_extent;
            if dy > 0.0 {
                let last = column[column.len() - 1];
                nodes[last].translate(-dy);
                let mut y = nodes[last].y0;
                for &ni in column.iter().rev().skip(1) {
                    let dy = nodes[ni].y1 + py - y;
                    if dy > 0.0 {
                        nodes[ni].translate(-dy);
                    }
                    y = nodes[ni].y0;
                }
            }
        }
    }
}

/// Places every node vertically inside its column and sizes every link.
pub(crate) fn compute_node_breadths(graph: &mut SankeyGraph, opts: &SankeyOptions) {
    let columns = columns(graph);
    let mut solver = BreadthSolver {
        graph,
        columns,
        py: opts.node_padding,
        y0_extent: opts.extent.y0,
        y1_extent: opts.extent.y1,
    };

    let ky = solver.initialize_node_breadth();
    tracing::debug!(columns = solver.columns.len(), ky, "initialized node breadths");
    solver.resolve_collisions();

    let mut alpha = 1.0;
    for _ in 0..opts.iterations {
        if opts.relax_right_to_left {
            alpha *= 0.99;
            solver.relax_right_to_left(alpha);
        }
        solver.resolve_collisions();
        solver.relax_left_to_right(alpha);
        solver.resolve_collisions();
    }
}

/// One collision pass over the final positions. Keeps each column's top-to-bottom order and only
/// moves nodes that overlap or fall past the bottom bound.
pub(crate) fn settle_columns(graph: &mut SankeyGraph, opts: &SankeyOptions) {
    let columns = columns(graph);
    let mut solver = BreadthSolver {
        graph,
        columns,
        py: opts.node_padding,
        y0_extent: opts.extent.y0,
        y1_extent: opts.extent.y1,
    };
    solver.resolve_collisions();
}
