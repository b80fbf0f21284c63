use sankey_layout::{
    Align, ByAttribute, ColumnAttribute, LinkRecord, NodeAlign, NodeKey, NodeRecord, Sankey,
    SankeyData, SankeyGraph, SankeyOptions,
};

// A -> B -> C, D -> C: three columns, D is a source one hop from the sink.
fn data() -> SankeyData {
    SankeyData::new(
        ["A", "B", "C", "D"]
            .iter()
            .map(|n| NodeRecord::named(*n))
            .collect(),
        vec![
            LinkRecord::new("A", "B", 1.0),
            LinkRecord::new("B", "C", 1.0),
            LinkRecord::new("D", "C", 1.0),
        ],
    )
}

fn layout_with(align: impl NodeAlign + 'static, data: SankeyData) -> SankeyGraph {
    Sankey::new(
        SankeyOptions::default()
            .with_size(220.0, 100.0)
            .with_node_width(20.0),
    )
    .with_node_id(ByAttribute::name())
    .with_align(align)
    .layout(data)
    .unwrap()
}

fn layers(g: &SankeyGraph) -> Vec<usize> {
    ["A", "B", "C", "D"]
        .iter()
        .map(|n| g.node_by_key(&NodeKey::from(*n)).unwrap().layer)
        .collect()
}

#[test]
fn align_left_uses_depth() {
    let g = layout_with(Align::Left, data());
    assert_eq!(layers(&g), vec![0, 1, 2, 0]);
}

#[test]
fn align_right_uses_height() {
    let g = layout_with(Align::Right, data());
    assert_eq!(layers(&g), vec![0, 1, 2, 1]);
}

#[test]
fn align_justify_pushes_sinks_to_the_last_column() {
    let mut d = data();
    d.nodes.push(NodeRecord::named("E"));
    d.links.push(LinkRecord::new("A", "E", 1.0));
    let g = layout_with(Align::Justify, d);
    assert_eq!(layers(&g), vec![0, 1, 2, 0]);
    assert_eq!(g.node_by_key(&NodeKey::from("E")).unwrap().layer, 2);
}

#[test]
fn align_center_moves_sources_next_to_their_targets() {
    let g = layout_with(Align::Center, data());
    assert_eq!(layers(&g), vec![0, 1, 2, 1]);
}

#[test]
fn align_midpoint_splits_the_difference() {
    let mut d = data();
    d.nodes.push(NodeRecord::named("E"));
    let g = layout_with(Align::Midpoint, d);
    assert_eq!(layers(&g), vec![0, 1, 2, 0]);
    // An isolated node has depth 0 and height 0, so Left and Right disagree by two columns.
    assert_eq!(g.node_by_key(&NodeKey::from("E")).unwrap().layer, 1);
}

#[test]
fn layer_maps_to_evenly_spaced_columns() {
    let g = layout_with(Align::Left, data());
    let xs: Vec<(f64, f64)> = g.nodes.iter().map(|n| (n.x0, n.x1)).collect();
    assert_eq!(xs, vec![(0.0, 20.0), (100.0, 120.0), (200.0, 220.0), (0.0, 20.0)]);
}

#[test]
fn column_attribute_is_clamped_to_the_available_columns() {
    let mut d = data();
    d.nodes[0] = NodeRecord::named("A").with_attribute("column", 1);
    d.nodes[3] = NodeRecord::named("D").with_attribute("column", 9);
    let g = layout_with(ColumnAttribute("column".to_string()), d);
    assert_eq!(layers(&g), vec![1, 1, 2, 2]);
}

#[test]
fn align_parses_from_strings() {
    assert_eq!("left".parse::<Align>(), Ok(Align::Left));
    assert_eq!(" Center ".parse::<Align>(), Ok(Align::Center));
    assert_eq!("midpoint".parse::<Align>(), Ok(Align::Midpoint));
    assert!("diagonal".parse::<Align>().is_err());
    assert_eq!(Align::default(), Align::Justify);
}
