use crate::graph::SankeyGraph;

/// A node is as large as the larger of its inflow and outflow, or its supplied value if that is
/// larger still.
pub(crate) fn compute_node_values(graph: &mut SankeyGraph) {
    for i in 0..graph.nodes.len() {
        let out_sum = graph.outgoing_value(i);
        let in_sum = graph.incoming_value(i);
        let node = &mut graph.nodes[i];
        node.value = out_sum.max(in_sum).max(node.value);
    }
}
