//! Named, reusable layout configurations.
//!
//! A [`LayoutTemplate`] bundles a [`LayoutConfig`] with a name and the node
//! kinds it suits. The engine ships a small [`TemplateLibrary`] and callers
//! may add their own.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use arrange_core::graph::NodeKind;

use crate::{
    config::{Direction, LayoutConfig},
    layout::engines::{ForceDirectedLayout, HierarchicalLayout},
};

/// A reusable layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTemplate {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    config: LayoutConfig,
    /// Node kinds the template suits; empty means any kind.
    #[serde(default)]
    node_kinds: Vec<NodeKind>,
}

impl LayoutTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, config: LayoutConfig) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            config,
            node_kinds: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_node_kinds(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        self.node_kinds = kinds.into_iter().collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn node_kinds(&self) -> &[NodeKind] {
        &self.node_kinds
    }

    /// Returns true when the template suits nodes of `kind`.
    pub fn applies_to(&self, kind: NodeKind) -> bool {
        self.node_kinds.is_empty() || self.node_kinds.contains(&kind)
    }
}

/// Id-keyed collection of templates, in insertion order.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    templates: IndexMap<String, LayoutTemplate>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        let flow_kinds = [
            NodeKind::Start,
            NodeKind::Process,
            NodeKind::Condition,
            NodeKind::Approval,
            NodeKind::End,
        ];
        let mut library = Self::empty();
        library.insert(
            LayoutTemplate::new(
                "hierarchical-top-down",
                "Top-down flow",
                LayoutConfig::new(HierarchicalLayout::NAME).with_direction(Direction::TopBottom),
            )
            .with_description("Levels stacked from top to bottom, suited to sequential processes")
            .with_node_kinds(flow_kinds),
        );
        library.insert(
            LayoutTemplate::new(
                "hierarchical-left-right",
                "Left-to-right flow",
                LayoutConfig::new(HierarchicalLayout::NAME).with_direction(Direction::LeftRight),
            )
            .with_description("Levels laid out from left to right, saving vertical space")
            .with_node_kinds(flow_kinds),
        );
        library.insert(
            LayoutTemplate::new(
                "organic",
                "Organic",
                LayoutConfig::new(ForceDirectedLayout::NAME),
            )
            .with_description("Physics-based arrangement for loosely structured graphs"),
        );
        library
    }
}

impl TemplateLibrary {
    /// Creates a library without the built-in templates.
    pub fn empty() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Adds a template, replacing any template with the same id.
    pub fn insert(&mut self, template: LayoutTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn get(&self, id: &str) -> Option<&LayoutTemplate> {
        self.templates.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutTemplate> {
        self.templates.values()
    }

    /// Templates that suit nodes of `kind`.
    pub fn for_kind(&self, kind: NodeKind) -> impl Iterator<Item = &LayoutTemplate> {
        self.templates
            .values()
            .filter(move |template| template.applies_to(kind))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
