#![forbid(unsafe_code)]

//! `kindred` is a headless family-tree engine.
//!
//! The core crate reads a family snapshot in either historical JSON shape and
//! exposes one normalized model; the `render` feature adds the positioned
//! layouts and standalone SVG output on top of it.
//!
//! # Features
//!
//! - `render`: enable layout + SVG output (`kindred::render`)

pub use kindred_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use kindred_render::model::{FamilyGraph, FamilyLayout, GraphDocument, RowsLayout};
    pub use kindred_render::svg::{SvgRenderOptions, render_graph_svg, render_rows_svg};
    pub use kindred_render::{
        LayoutVariant, build_family_graph, build_graph_document, layout_family_rows,
        layout_snapshot,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Snapshot(#[from] kindred_core::Error),
        #[error(transparent)]
        Render(#[from] kindred_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Lays out a snapshot document straight from JSON text.
    pub fn layout_json(
        text: &str,
        config: &kindred_core::TreeConfig,
        variant: LayoutVariant,
    ) -> Result<FamilyLayout> {
        let snapshot = kindred_core::FamilySnapshot::from_json_str(text)?;
        Ok(layout_snapshot(&snapshot, config, variant)?)
    }

    pub fn render_svg_snapshot(
        snapshot: &kindred_core::FamilySnapshot,
        config: &kindred_core::TreeConfig,
        variant: LayoutVariant,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        match layout_snapshot(snapshot, config, variant)? {
            FamilyLayout::Graph(doc) => Ok(render_graph_svg(&doc, svg_options)),
            FamilyLayout::Rows(rows) => Ok(render_rows_svg(&rows, svg_options)),
        }
    }

    /// Renders a snapshot document straight from JSON text to SVG.
    pub fn render_svg_json(
        text: &str,
        config: &kindred_core::TreeConfig,
        variant: LayoutVariant,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let snapshot = kindred_core::FamilySnapshot::from_json_str(text)?;
        render_svg_snapshot(&snapshot, config, variant, svg_options)
    }

    /// Convenience wrapper that bundles the configuration and options for
    /// embedding. All work is CPU-bound and performs no I/O.
    #[derive(Debug, Clone)]
    pub struct FamilyRenderer {
        pub config: kindred_core::TreeConfig,
        pub variant: LayoutVariant,
        pub svg: SvgRenderOptions,
    }

    impl Default for FamilyRenderer {
        fn default() -> Self {
            Self {
                config: kindred_core::TreeConfig::defaults(),
                variant: LayoutVariant::Graph,
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl FamilyRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: kindred_core::TreeConfig) -> Self {
            self.config = config;
            self
        }

        pub fn with_variant(mut self, variant: LayoutVariant) -> Self {
            self.variant = variant;
            self
        }

        pub fn layout_json(&self, text: &str) -> Result<FamilyLayout> {
            layout_json(text, &self.config, self.variant)
        }

        pub fn layout_snapshot(
            &self,
            snapshot: &kindred_core::FamilySnapshot,
        ) -> Result<FamilyLayout> {
            Ok(layout_snapshot(snapshot, &self.config, self.variant)?)
        }

        pub fn render_svg_json(&self, text: &str) -> Result<String> {
            render_svg_json(text, &self.config, self.variant, &self.svg)
        }

        pub fn render_svg(&self, snapshot: &kindred_core::FamilySnapshot) -> Result<String> {
            render_svg_snapshot(snapshot, &self.config, self.variant, &self.svg)
        }
    }
}
