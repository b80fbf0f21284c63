use crate::error::{Error, Result};
use crate::graph::{Link, Node, NodeKey, SankeyData, SankeyGraph};
use crate::identity::NodeIdentity;
use rustc_hash::FxHashMap;

/// Builds the arena graph: resolves link endpoints and fills each node's incoming/outgoing link
/// lists in link input order.
pub(crate) fn assemble(data: SankeyData, id: &dyn NodeIdentity) -> Result<SankeyGraph> {
    let SankeyData {
        nodes: node_records,
        links: link_records,
    } = data;

    let mut node_by_key: FxHashMap<NodeKey, usize> = FxHashMap::default();
    let mut nodes: Vec<Node> = Vec::with_capacity(node_records.len());
    for (i, record) in node_records.into_iter().enumerate() {
        let key = id.node_key(&record, i);
        // Later nodes win on duplicate keys.
        node_by_key.insert(key.clone(), i);
        nodes.push(Node {
            key,
            uid: format!("ID{i}"),
            index: i,
            value: record.value.unwrap_or(0.0),
            depth: 0,
            height: 0,
            layer: 0,
            x0: 0.0,
            x1: 0.0,
            y0: 0.0,
            y1: 0.0,
            source_links: Vec::new(),
            target_links: Vec::new(),
            order_number: None,
            attributes: record.attributes,
        });
    }

    let find = |key: NodeKey| -> Result<usize> {
        node_by_key
            .get(&key)
            .copied()
            .ok_or(Error::MissingNode { key })
    };

    let mut links: Vec<Link> = Vec::with_capacity(link_records.len());
    for (i, record) in link_records.into_iter().enumerate() {
        let source = find(record.source)?;
        let target = find(record.target)?;
        links.push(Link {
            index: i,
            source,
            target,
            value: record.value,
            width: 0.0,
            y0: 0.0,
            y1: 0.0,
            source_share: 0.0,
            target_share: 0.0,
            attributes: record.attributes,
        });
        nodes[source].source_links.push(i);
        nodes[target].target_links.push(i);
    }

    tracing::debug!(nodes = nodes.len(), links = links.len(), "assembled sankey graph");
    Ok(SankeyGraph { nodes, links })
}
