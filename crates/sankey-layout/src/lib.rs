#![forbid(unsafe_code)]

//! Headless Sankey diagram layout.
//!
//! The pipeline follows d3-sankey (assemble, values, depths, breadths, link breadths) and adds a
//! final ordering pass that restacks each parent's children by the order their links leave the
//! parent, so the result is stable and reads top-to-bottom.
//!
//! ```
//! use sankey_layout::{LinkRecord, NodeRecord, Sankey, SankeyData, SankeyOptions};
//!
//! let data = SankeyData::new(
//!     vec![NodeRecord::default(), NodeRecord::default()],
//!     vec![LinkRecord::new(0usize, 1usize, 10.0)],
//! );
//! let graph = Sankey::new(SankeyOptions::default().with_size(100.0, 100.0))
//!     .layout(data)
//!     .unwrap();
//! assert_eq!(graph.nodes[1].x1, 100.0);
//! ```

pub mod align;
mod assemble;
mod breadth;
mod depth;
pub mod error;
pub mod graph;
pub mod identity;
mod links;
pub mod options;
mod ordering;
mod util;
mod values;

pub use align::{Align, ColumnAttribute, NodeAlign};
pub use error::{Error, Result};
pub use graph::{Link, LinkRecord, Node, NodeKey, NodeRecord, SankeyData, SankeyGraph};
pub use identity::{ByAttribute, ByIndex, NodeIdentity};
pub use options::{Extent, SankeyOptions};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A configured layout. Cheap to reuse: every call works on its own graph.
pub struct Sankey {
    options: SankeyOptions,
    align: Box<dyn NodeAlign>,
    node_id: Box<dyn NodeIdentity>,
}

impl Default for Sankey {
    fn default() -> Self {
        Self::new(SankeyOptions::default())
    }
}

impl std::fmt::Debug for Sankey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sankey")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Sankey {
    pub fn new(options: SankeyOptions) -> Self {
        Self {
            options,
            align: Box::new(Align::Justify),
            node_id: Box::new(ByIndex),
        }
    }

    pub fn with_align(mut self, align: impl NodeAlign + 'static) -> Self {
        self.align = Box::new(align);
        self
    }

    pub fn with_node_id(mut self, node_id: impl NodeIdentity + 'static) -> Self {
        self.node_id = Box::new(node_id);
        self
    }

    pub fn options(&self) -> &SankeyOptions {
        &self.options
    }

    /// Runs the full pipeline. Fails only when a link names a node that does not exist.
    pub fn layout(&self, data: impl Into<SankeyData>) -> Result<SankeyGraph> {
        let mut graph = assemble::assemble(data.into(), self.node_id.as_ref())?;
        values::compute_node_values(&mut graph);
        depth::compute_node_depths(&mut graph, &self.options, self.align.as_ref());
        breadth::compute_node_breadths(&mut graph, &self.options);
        links::route_links(&mut graph);
        ordering::arrange_nodes(&mut graph, &self.options);
        Ok(graph)
    }

    /// Recomputes link endpoints only, for a graph whose node positions were changed after
    /// [`Sankey::layout`] (e.g. a dragged node). On an untouched layout this is a no-op.
    pub fn relayout(&self, graph: &mut SankeyGraph) {
        links::route_links(graph);
    }
}
