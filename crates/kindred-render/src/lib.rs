#![forbid(unsafe_code)]

//! Headless layouts for a family snapshot: the node/edge graph handed to an
//! external graph surface, and the row-based scene drawn directly on a 2D
//! surface.

pub mod graph;
pub mod model;
pub mod rows;
pub mod svg;

use kindred_core::{FamilySnapshot, TreeConfig};

use crate::model::FamilyLayout;

pub use graph::{build_family_graph, build_graph_document};
pub use rows::layout_family_rows;
pub use svg::{SvgRenderOptions, render_graph_svg, render_rows_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Snapshot(#[from] kindred_core::Error),
    #[error("graph contains an edge with a missing endpoint: {source_id} -> {target_id}")]
    MissingEndpoint { source_id: String, target_id: String },
    #[error("graph contains a duplicate node id: {node_id}")]
    DuplicateNode { node_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Which layout variant to produce for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    Graph,
    Rows,
}

pub fn layout_snapshot(
    snapshot: &FamilySnapshot,
    config: &TreeConfig,
    variant: LayoutVariant,
) -> Result<FamilyLayout> {
    match variant {
        LayoutVariant::Graph => Ok(FamilyLayout::Graph(graph::build_graph_document(
            snapshot, config,
        )?)),
        LayoutVariant::Rows => Ok(FamilyLayout::Rows(rows::layout_family_rows(
            snapshot, config,
        )?)),
    }
}
