//! The family-graph builder: focal person, parents, partners and children as
//! a positioned node/edge graph for an external graph surface.

use kindred_core::{FamilySnapshot, PersonId, TreeConfig};
use rustc_hash::FxHashSet;

use crate::Result;
use crate::model::{Edge, FamilyGraph, GraphDocument, NodeId, PositionedNode};

/// One generation step, which is also the horizontal slot spacing between
/// siblings.
const GENERATION_STEP: f64 = 50.0;
/// Child anchors and midpoints sit half a generation above the child row.
const ANCHOR_STEP: f64 = 25.0;
/// Where the minimum coordinate lands after normalization.
const LAYOUT_MARGIN: f64 = 50.0;

const DEFAULT_VIEWPORT: f64 = 500.0;
const DEFAULT_PERSON_URL: &str = "/person/{id}/graph/";

/// Builds the graph and wraps it with the viewport and focal node id the
/// hosting page mounts its surface with.
pub fn build_graph_document(
    snapshot: &FamilySnapshot,
    config: &TreeConfig,
) -> Result<GraphDocument> {
    let graph = build_family_graph(snapshot, config)?;
    Ok(GraphDocument {
        width: config.get_f64("viewport.width").unwrap_or(DEFAULT_VIEWPORT),
        height: config
            .get_f64("viewport.height")
            .unwrap_or(DEFAULT_VIEWPORT),
        focus: NodeId::person(snapshot.focus),
        graph,
    })
}

/// Core contract: the focal person must exist; every other dangling
/// reference is skipped. The graph is built in one pass over the snapshot
/// and never mutated afterwards.
pub fn build_family_graph(snapshot: &FamilySnapshot, config: &TreeConfig) -> Result<FamilyGraph> {
    snapshot.validate()?;
    let person_url = config
        .get_str("navigation.personUrl")
        .unwrap_or(DEFAULT_PERSON_URL)
        .to_string();

    let mut builder = GraphBuilder::new(person_url);
    builder.place_person(snapshot, snapshot.focus, 0.0, 0.0);
    builder.ancestor_pass(snapshot);
    builder.descendant_pass(snapshot);
    builder.normalize();

    Ok(FamilyGraph {
        nodes: builder.nodes,
        edges: builder.edges,
    })
}

/// Mutable state of one build, discarded when the graph is done.
struct GraphBuilder {
    person_url: String,
    nodes: Vec<PositionedNode>,
    edges: Vec<Edge>,
    visited: FxHashSet<PersonId>,
    placed: FxHashSet<NodeId>,
}

impl GraphBuilder {
    fn new(person_url: String) -> Self {
        Self {
            person_url,
            nodes: Vec::new(),
            edges: Vec::new(),
            visited: FxHashSet::default(),
            placed: FxHashSet::default(),
        }
    }

    /// Places a person node unless one with the same id already exists, and
    /// marks the person visited either way. First placement wins; later
    /// encounters drop their extra edges.
    fn place_person(&mut self, snapshot: &FamilySnapshot, id: PersonId, x: f64, y: f64) {
        self.visited.insert(id);
        let node_id = NodeId::person(id);
        if !self.placed.insert(node_id) {
            return;
        }
        let href = if self.person_url.is_empty() {
            None
        } else {
            Some(self.person_url.replace("{id}", &id.to_string()))
        };
        self.nodes.push(PositionedNode {
            id: node_id,
            x,
            y,
            label: snapshot.label_of(id),
            href,
        });
    }

    /// Places a synthetic node; returns whether this placement was the first.
    fn place_synthetic(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        if !self.placed.insert(id) {
            return false;
        }
        self.nodes.push(PositionedNode {
            id,
            x,
            y,
            label: None,
            href: None,
        });
        true
    }

    fn connect(&mut self, source: NodeId, target: NodeId) {
        self.edges.push(Edge { source, target });
    }

    fn node_x(&self, id: NodeId) -> f64 {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map_or(GENERATION_STEP, |n| n.x)
    }

    /// Walks every other person in snapshot order looking for partnerships
    /// whose child list contains the focal person. Matching partners go on
    /// the row above.
    fn ancestor_pass(&mut self, snapshot: &FamilySnapshot) {
        let focus = snapshot.focus;
        let focus_node = NodeId::person(focus);
        for (&person_id, person) in &snapshot.persons {
            if self.visited.contains(&person_id) {
                continue;
            }
            for (partnership_id, partnership) in snapshot.partnerships_of(person) {
                if !partnership.children.contains(&focus) {
                    continue;
                }
                self.place_person(snapshot, person_id, -GENERATION_STEP, -GENERATION_STEP);
                let anchor = NodeId::partnership(partnership_id);
                if self.place_synthetic(anchor, 0.0, -GENERATION_STEP) {
                    self.connect(focus_node, anchor);
                }
                self.connect(NodeId::person(person_id), anchor);

                // Single co-partner per parent row: only the first other
                // member is rendered.
                let co_partner = partnership
                    .other_members(person_id)
                    .find(|&id| snapshot.person(id).is_some());
                if let Some(partner_id) = co_partner {
                    if !self.visited.contains(&partner_id) {
                        self.place_person(
                            snapshot,
                            partner_id,
                            GENERATION_STEP,
                            -GENERATION_STEP,
                        );
                        self.connect(NodeId::person(partner_id), anchor);
                    }
                }
            }
        }
    }

    /// Lays out the focal person's own partnerships: partners to the right,
    /// children centered under the partnership anchor.
    fn descendant_pass(&mut self, snapshot: &FamilySnapshot) {
        let focus = snapshot.focus;
        let focus_node = NodeId::person(focus);
        let Some(focus_person) = snapshot.focus_person() else {
            return;
        };
        for (partnership_id, partnership) in snapshot.partnerships_of(focus_person) {
            let anchor = NodeId::partnership(partnership_id);

            for (member_id, _member) in snapshot.members_of(partnership) {
                if self.visited.contains(&member_id) {
                    continue;
                }
                self.ensure_partnership_anchor(anchor, focus_node);
                self.place_person(snapshot, member_id, 2.0 * GENERATION_STEP, 0.0);
                self.connect(NodeId::person(member_id), anchor);
            }

            // Slot arithmetic uses the raw child list length, so an
            // unresolvable or repeated child leaves a visible gap instead of
            // re-centering its siblings.
            let slots = partnership.children.len();
            let mut prev_anchor: Option<NodeId> = None;
            let mut placed_children = false;
            for (i, &child_id) in partnership.children.iter().enumerate() {
                if snapshot.person(child_id).is_none() {
                    tracing::debug!("skipping unknown child reference: {}", child_id);
                    continue;
                }
                if self.visited.contains(&child_id) {
                    continue;
                }
                self.ensure_partnership_anchor(anchor, focus_node);
                let center = self.node_x(anchor);
                let x = center - (GENERATION_STEP / 2.0) * ((slots - 1) as f64)
                    + GENERATION_STEP * (i as f64);
                self.place_person(snapshot, child_id, x, GENERATION_STEP);
                let child_anchor = NodeId::child(child_id);
                self.place_synthetic(child_anchor, x, ANCHOR_STEP);
                self.connect(child_anchor, NodeId::person(child_id));
                if let Some(prev) = prev_anchor {
                    self.connect(child_anchor, prev);
                }
                prev_anchor = Some(child_anchor);
                placed_children = true;
            }

            if placed_children {
                let midpoint = NodeId::midpoint(partnership_id);
                let x = self.node_x(anchor);
                if self.place_synthetic(midpoint, x, ANCHOR_STEP) {
                    self.connect(anchor, midpoint);
                }
            }
        }
    }

    /// Focal partnerships get their anchor on first need (first placed
    /// partner, or first placed child when no partner lands), together with
    /// the focal edge.
    fn ensure_partnership_anchor(&mut self, anchor: NodeId, focus_node: NodeId) {
        if self.place_synthetic(anchor, GENERATION_STEP, 0.0) {
            self.connect(focus_node, anchor);
        }
    }

    /// Translates everything so the minimum coordinate lands on the margin.
    /// The minimums start at the focal origin, so the shift is never negative.
    fn normalize(&mut self) {
        let mut min_x = 0.0_f64;
        let mut min_y = 0.0_f64;
        for node in &self.nodes {
            min_x = min_x.min(node.x);
            min_y = min_y.min(node.y);
        }
        for node in &mut self.nodes {
            node.x += LAYOUT_MARGIN - min_x;
            node.y += LAYOUT_MARGIN - min_y;
        }
    }
}
