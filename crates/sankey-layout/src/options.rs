use serde::{Deserialize, Serialize};

/// Drawing region, `(x0, y0)` top-left and `(x1, y1)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Extent {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::from_size(1.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SankeyOptions {
    pub extent: Extent,
    /// Horizontal thickness of every node.
    pub node_width: f64,
    /// Minimum vertical gap between nodes sharing a column.
    pub node_padding: f64,
    /// Extra gap inserted between consecutive depth-1 nodes by the ordering pass.
    pub first_level_node_padding: f64,
    pub iterations: usize,
    /// Also relax nodes toward their outgoing targets before each left-to-right pass.
    pub relax_right_to_left: bool,
}

impl Default for SankeyOptions {
    fn default() -> Self {
        Self {
            extent: Extent::default(),
            node_width: 24.0,
            node_padding: 8.0,
            first_level_node_padding: 0.0,
            iterations: 32,
            relax_right_to_left: false,
        }
    }
}

impl SankeyOptions {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.extent = Extent::from_size(width, height);
        self
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_node_width(mut self, node_width: f64) -> Self {
        self.node_width = node_width;
        self
    }

    pub fn with_node_padding(mut self, node_padding: f64) -> Self {
        self.node_padding = node_padding;
        self
    }

    pub fn with_first_level_node_padding(mut self, padding: f64) -> Self {
        self.first_level_node_padding = padding;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}
