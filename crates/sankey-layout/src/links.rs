use crate::graph::SankeyGraph;
use crate::util::f64_cmp;

/// Stacks every node's links and then places their exact proportional endpoints. Running it
/// again without moving any node leaves the graph unchanged.
pub(crate) fn route_links(graph: &mut SankeyGraph) {
    compute_link_breadths(graph);
    place_link_endpoints(graph);
}

/// Orders every node's links by the position of the node at their other end, then stacks them
/// down the node from its top edge.
///
/// Each link also records the running value share that precedes it at both ends, which the
/// ordering pass uses for exact proportional placement.
fn compute_link_breadths(graph: &mut SankeyGraph) {
    let node_y0: Vec<f64> = graph.nodes.iter().map(|n| n.y0).collect();
    let links = &mut graph.links;

    for node in &mut graph.nodes {
        node.source_links.sort_by(|&a, &b| {
            f64_cmp(node_y0[links[a].target], node_y0[links[b].target])
                .then_with(|| links[a].index.cmp(&links[b].index))
        });
        node.target_links.sort_by(|&a, &b| {
            f64_cmp(node_y0[links[a].source], node_y0[links[b].source])
                .then_with(|| links[a].index.cmp(&links[b].index))
        });
    }

    for node in &graph.nodes {
        let mut y0 = node.y0;
        let mut share = 0.0;
        for &li in &node.source_links {
            let link = &mut links[li];
            link.y0 = y0 + link.width / 2.0;
            link.source_share = share;
            y0 += link.width;
            share += link.value;
        }

        let mut y1 = node.y0;
        let mut share = 0.0;
        for &li in &node.target_links {
            let link = &mut links[li];
            link.y1 = y1 + link.width / 2.0;
            link.target_share = share;
            y1 += link.width;
            share += link.value;
        }
    }

    tracing::debug!(links = links.len(), "computed link breadths");
}

/// Replaces the stacked endpoints with proportional ones: a band sits at its value share of the
/// node's breadth, offset by half its (at least 1 unit) thickness. Incoming bands are spread over
/// the target's full breadth even when the target's value exceeds its inflow.
fn place_link_endpoints(graph: &mut SankeyGraph) {
    let mut incoming = vec![0.0; graph.nodes.len()];
    for link in &graph.links {
        incoming[link.target] += link.value;
    }

    let nodes = &graph.nodes;
    for link in &mut graph.links {
        let link_height = link.width.max(1.0);

        let source = &nodes[link.source];
        let offset = if source.value > 0.0 {
            link.source_share / source.value * source.breadth()
        } else {
            0.0
        };
        link.y0 = source.y0 + offset + link_height / 2.0;

        let target = &nodes[link.target];
        let total = incoming[link.target];
        let offset = if total > 0.0 {
            link.target_share / total * target.breadth()
        } else {
            0.0
        };
        link.y1 = target.y0 + offset + link_height / 2.0;
    }
}
