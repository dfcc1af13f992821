//! Hierarchy builder: series → sagas → arcs as a generic labeled tree,
//! plus the lookup indices used to resolve episode foreign keys.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::entities::{format_range, format_ranges, Document, Saga, StoryArc};

/// Level of a node in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Root,
    Saga,
    Arc,
}

/// Display-tree node handed to the tree layout.
///
/// Serializes to `{name, type, range?, superSaga?, id?, children?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_saga: Option<String>,
    /// Arc nodes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    fn root(series: &str, children: Vec<HierarchyNode>) -> Self {
        Self {
            name: series.to_string(),
            node_type: NodeType::Root,
            range: None,
            super_saga: None,
            id: None,
            children,
        }
    }

    fn saga(saga: &Saga) -> Self {
        Self {
            name: saga.name.clone(),
            node_type: NodeType::Saga,
            range: Some(format_range(saga.episode_range.as_ref())),
            super_saga: saga.super_saga.clone(),
            id: None,
            children: saga.arcs.iter().map(Self::arc).collect(),
        }
    }

    fn arc(arc: &StoryArc) -> Self {
        Self {
            name: arc.name.clone(),
            node_type: NodeType::Arc,
            range: format_ranges(&arc.episode_ranges),
            super_saga: None,
            id: Some(arc.id.clone()),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order traversal of this node and all descendants.
    pub fn descendants(&self) -> Vec<&HierarchyNode> {
        let mut nodes = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            // reverse so children come out left-to-right
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        nodes
    }

    /// Find the arc node with the given id.
    pub fn find_arc(&self, arc_id: &str) -> Option<&HierarchyNode> {
        self.descendants()
            .into_iter()
            .find(|n| n.node_type == NodeType::Arc && n.id.as_deref() == Some(arc_id))
    }

    /// Detail lines shown when hovering/inspecting a node.
    pub fn tooltip_lines(&self) -> Vec<String> {
        let mut lines = vec![self.name.clone()];
        if self.node_type == NodeType::Saga {
            lines.push(format!(
                "Super saga: {}",
                self.super_saga.as_deref().unwrap_or("?")
            ));
        }
        if let Some(range) = &self.range {
            lines.push(format!("Episodes: {range}"));
        }
        if self.node_type == NodeType::Root {
            lines.push("Click sagas to expand arcs.".to_string());
        }
        lines
    }
}

/// Lookup indices built alongside the hierarchy. Read-only after build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indices {
    saga_names: HashMap<String, String>,
    arc_names: HashMap<String, String>,
    arc_to_saga: HashMap<String, String>,
}

impl Indices {
    pub fn saga_name(&self, saga_id: &str) -> Option<&str> {
        self.saga_names.get(saga_id).map(String::as_str)
    }

    pub fn arc_name(&self, arc_id: &str) -> Option<&str> {
        self.arc_names.get(arc_id).map(String::as_str)
    }

    /// Owning saga of an arc.
    pub fn saga_of_arc(&self, arc_id: &str) -> Option<&str> {
        self.arc_to_saga.get(arc_id).map(String::as_str)
    }

    /// Saga name, or the raw id when the lookup misses.
    pub fn resolve_saga_name<'a>(&'a self, saga_id: &'a str) -> &'a str {
        self.saga_name(saga_id).unwrap_or_else(|| {
            debug!("missing saga lookup: {}", saga_id);
            saga_id
        })
    }

    /// Arc name, or the raw id when the lookup misses.
    pub fn resolve_arc_name<'a>(&'a self, arc_id: &'a str) -> &'a str {
        self.arc_name(arc_id).unwrap_or_else(|| {
            debug!("missing arc lookup: {}", arc_id);
            arc_id
        })
    }

    pub fn saga_count(&self) -> usize {
        self.saga_names.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arc_names.len()
    }
}

/// Build the hierarchy and indices in one pass over the document.
///
/// Sagas and arcs keep document order. The document is not modified.
#[instrument(level = "debug", skip(doc), fields(series = %doc.series))]
pub fn build(doc: &Document) -> (HierarchyNode, Indices) {
    let mut indices = Indices::default();

    for saga in &doc.sagas {
        indices
            .saga_names
            .insert(saga.id.clone(), saga.name.clone());
        for arc in &saga.arcs {
            indices.arc_names.insert(arc.id.clone(), arc.name.clone());
            indices.arc_to_saga.insert(arc.id.clone(), saga.id.clone());
        }
    }

    let root = HierarchyNode::root(
        &doc.series,
        doc.sagas.iter().map(HierarchyNode::saga).collect(),
    );
    debug!(
        "built hierarchy: {} sagas, {} arcs",
        indices.saga_count(),
        indices.arc_count()
    );

    (root, indices)
}
