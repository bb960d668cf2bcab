//! Unicode utilities for grapheme handling, display width and input cleanup.

mod grapheme;
mod sanitize;
mod width;

pub use grapheme::{
    Cluster, boundaries, ceil_boundary, cluster_at, clustered_width, clusters, floor_boundary,
    graphemes, next_boundary, prev_boundary,
};
pub use sanitize::{DEFAULT_TAB_REPLACEMENT, Sanitizer};
pub use width::{
    MAX_CLUSTER_WIDTH, WidthMethod, cluster_width, display_width_with_method, set_width_method,
    width_method,
};
