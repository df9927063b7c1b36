//! The row-based canvas variant: parents, partners + focal person, children
//! as three rows of boxes with connecting lines, emitted as explicit draw
//! primitives for a 2D surface. Rows align by centering on a shared vertical
//! axis only.

use kindred_core::{FamilySnapshot, PersonId, TreeConfig};
use rustc_hash::FxHashSet;

use crate::Result;
use crate::model::{RowBox, RowLayout, RowRole, RowsLayout, ScenePrimitive};

/// Scene margin around the outermost boxes.
const ROW_MARGIN: f64 = 50.0;

const DEFAULT_BOX_WIDTH: f64 = 100.0;
const DEFAULT_BOX_HEIGHT: f64 = 40.0;
const DEFAULT_H_PADDING: f64 = 20.0;
const DEFAULT_V_PADDING: f64 = 60.0;

#[derive(Debug, Clone, Copy)]
struct RowMetrics {
    box_width: f64,
    box_height: f64,
    h_padding: f64,
    v_padding: f64,
}

impl RowMetrics {
    fn from_config(config: &TreeConfig) -> Self {
        Self {
            box_width: config.get_f64("rows.boxWidth").unwrap_or(DEFAULT_BOX_WIDTH),
            box_height: config
                .get_f64("rows.boxHeight")
                .unwrap_or(DEFAULT_BOX_HEIGHT),
            h_padding: config
                .get_f64("rows.horizontalPadding")
                .unwrap_or(DEFAULT_H_PADDING),
            v_padding: config
                .get_f64("rows.verticalPadding")
                .unwrap_or(DEFAULT_V_PADDING),
        }
    }
}

/// One slot-occupying entry of a row. A partnership holds its partner boxes
/// together so the pair reads as one unit.
enum RowItem {
    Person {
        id: PersonId,
        label: Option<String>,
    },
    Partnership {
        members: Vec<(PersonId, Option<String>)>,
    },
}

impl RowItem {
    fn width(&self, m: &RowMetrics) -> f64 {
        match self {
            Self::Person { .. } => m.box_width,
            Self::Partnership { members } => {
                members.len() as f64 * m.box_width
                    + members.len().saturating_sub(1) as f64 * m.h_padding
            }
        }
    }

    /// Emits this item's boxes starting at `x` and, for partnerships, the
    /// edge-to-edge connectors between its member boxes.
    fn layout(
        &self,
        x: f64,
        y: f64,
        m: &RowMetrics,
        boxes: &mut Vec<RowBox>,
        lines: &mut Vec<ScenePrimitive>,
    ) {
        match self {
            Self::Person { id, label } => {
                boxes.push(RowBox {
                    person: *id,
                    x,
                    y,
                    width: m.box_width,
                    height: m.box_height,
                    label: label.clone(),
                });
            }
            Self::Partnership { members } => {
                let mut cursor = x;
                for (i, (id, label)) in members.iter().enumerate() {
                    if i > 0 {
                        lines.push(ScenePrimitive::Line {
                            x1: cursor - m.h_padding,
                            y1: y + m.box_height / 2.0,
                            x2: cursor,
                            y2: y + m.box_height / 2.0,
                        });
                    }
                    boxes.push(RowBox {
                        person: *id,
                        x: cursor,
                        y,
                        width: m.box_width,
                        height: m.box_height,
                        label: label.clone(),
                    });
                    cursor += m.box_width + m.h_padding;
                }
            }
        }
    }
}

/// Lays out the three rows and their draw calls. Each row is centered under
/// the row above by sharing one vertical axis; a row's width is
/// `boxes * boxWidth + (boxes - 1) * horizontalPadding`.
pub fn layout_family_rows(snapshot: &FamilySnapshot, config: &TreeConfig) -> Result<RowsLayout> {
    snapshot.validate()?;
    let metrics = RowMetrics::from_config(config);
    let Some(focus_person) = snapshot.focus_person() else {
        return Err(kindred_core::Error::MissingFocus { id: snapshot.focus }.into());
    };

    // Parents row: the focal person's parent list in order, first placement
    // wins.
    let mut parent_items: Vec<RowItem> = Vec::new();
    let mut seen: FxHashSet<PersonId> = FxHashSet::default();
    for &parent_id in &focus_person.parents {
        if snapshot.person(parent_id).is_none() {
            tracing::debug!("skipping unknown parent reference: {}", parent_id);
            continue;
        }
        if !seen.insert(parent_id) {
            continue;
        }
        parent_items.push(RowItem::Person {
            id: parent_id,
            label: snapshot.label_of(parent_id),
        });
    }

    // Family row: every partnership's partners as one unit, then the focal
    // person.
    let mut family_items: Vec<RowItem> = Vec::new();
    let mut seen: FxHashSet<PersonId> = FxHashSet::default();
    seen.insert(snapshot.focus);
    for (_, partnership) in snapshot.partnerships_of(focus_person) {
        let mut members: Vec<(PersonId, Option<String>)> = Vec::new();
        for (member_id, _member) in snapshot.members_of(partnership) {
            if !seen.insert(member_id) {
                continue;
            }
            members.push((member_id, snapshot.label_of(member_id)));
        }
        if !members.is_empty() {
            family_items.push(RowItem::Partnership { members });
        }
    }
    family_items.push(RowItem::Person {
        id: snapshot.focus,
        label: snapshot.label_of(snapshot.focus),
    });

    // Children row: partnership child lists in partnership-then-list order.
    let mut child_items: Vec<RowItem> = Vec::new();
    let mut seen: FxHashSet<PersonId> = FxHashSet::default();
    for (_, partnership) in snapshot.partnerships_of(focus_person) {
        for (child_id, _child) in snapshot.children_of(partnership) {
            if !seen.insert(child_id) {
                continue;
            }
            child_items.push(RowItem::Person {
                id: child_id,
                label: snapshot.label_of(child_id),
            });
        }
    }

    let row_width = |items: &[RowItem]| -> f64 {
        if items.is_empty() {
            return 0.0;
        }
        let boxes: f64 = items.iter().map(|item| item.width(&metrics)).sum();
        boxes + (items.len() - 1) as f64 * metrics.h_padding
    };

    let row_plan = [
        (RowRole::Parents, parent_items),
        (RowRole::Family, family_items),
        (RowRole::Children, child_items),
    ];
    let widest = row_plan
        .iter()
        .map(|(_, items)| row_width(items))
        .fold(0.0_f64, f64::max);
    // TODO: place child boxes under their own parents once boxes track
    // cross-row identity; today rows only share this center axis.
    let center_x = ROW_MARGIN + widest / 2.0;

    let mut rows: Vec<RowLayout> = Vec::new();
    let mut middle_lines: Vec<ScenePrimitive> = Vec::new();
    let mut y = ROW_MARGIN;
    for (role, items) in row_plan {
        let width = row_width(&items);
        let mut boxes: Vec<RowBox> = Vec::new();
        let mut x = center_x - width / 2.0;
        for (i, item) in items.iter().enumerate() {
            // Consecutive family-row boxes join edge-to-edge, across item
            // boundaries included.
            if role == RowRole::Family && i > 0 {
                middle_lines.push(ScenePrimitive::Line {
                    x1: x - metrics.h_padding,
                    y1: y + metrics.box_height / 2.0,
                    x2: x,
                    y2: y + metrics.box_height / 2.0,
                });
            }
            item.layout(x, y, &metrics, &mut boxes, &mut middle_lines);
            x += item.width(&metrics) + metrics.h_padding;
        }
        rows.push(RowLayout {
            role,
            y,
            width,
            boxes,
        });
        y += metrics.box_height + metrics.v_padding;
    }

    let width = widest + 2.0 * ROW_MARGIN;
    let height = 2.0 * ROW_MARGIN + 3.0 * metrics.box_height + 2.0 * metrics.v_padding;

    let focal_box = rows
        .iter()
        .find(|row| row.role == RowRole::Family)
        .and_then(|row| row.boxes.iter().find(|b| b.person == snapshot.focus))
        .cloned();

    // Draw order: rectangles, connecting lines, labels.
    let mut primitives: Vec<ScenePrimitive> = Vec::new();
    for row in &rows {
        for b in &row.boxes {
            primitives.push(ScenePrimitive::Rect {
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
            });
        }
    }
    for row in &rows {
        match row.role {
            RowRole::Parents => {
                if let Some(focal) = &focal_box {
                    for b in &row.boxes {
                        primitives.push(ScenePrimitive::Line {
                            x1: b.x + b.width / 2.0,
                            y1: b.y + b.height,
                            x2: focal.x + focal.width / 2.0,
                            y2: focal.y,
                        });
                    }
                }
            }
            RowRole::Family => {
                primitives.extend(middle_lines.drain(..));
            }
            RowRole::Children => {
                if let Some(focal) = &focal_box {
                    for b in &row.boxes {
                        primitives.push(ScenePrimitive::Line {
                            x1: b.x + b.width / 2.0,
                            y1: b.y,
                            x2: focal.x + focal.width / 2.0,
                            y2: focal.y + focal.height,
                        });
                    }
                }
            }
        }
    }
    for row in &rows {
        for b in &row.boxes {
            if let Some(label) = &b.label {
                primitives.push(ScenePrimitive::Text {
                    x: b.x + b.width / 2.0,
                    y: b.y + b.height / 2.0,
                    text: label.clone(),
                });
            }
        }
    }

    Ok(RowsLayout {
        width,
        height,
        rows,
        primitives,
    })
}
