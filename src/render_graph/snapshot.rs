//! Serializable view of a render graph, for debugging and snapshot tests.

use crate::foundation::core::BlendMode;
use crate::render_graph::contents::Contents;
use crate::render_graph::entity::Entity;
use crate::render_graph::pass::{Element, EntityPass, PassId};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PassSnapshot {
    pub transform: [f64; 16],
    pub stencil_depth: u32,
    pub blend_mode: BlendMode,
    pub has_backdrop_filter: bool,
    pub elements: Vec<ElementSnapshot>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementSnapshot {
    Entity(EntitySnapshot),
    Subpass(PassSnapshot),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EntitySnapshot {
    pub transform: [f64; 16],
    pub stencil_depth: u32,
    pub blend_mode: BlendMode,
    pub contents: ContentsSnapshot,
}

/// Drawable kind plus, for filters, the chain of wrapped inputs.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ContentsSnapshot {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub absorb_opacity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Box<ContentsSnapshot>>,
}

impl ContentsSnapshot {
    pub fn of(contents: &Contents) -> Self {
        let filter = contents.as_filter();
        Self {
            kind: contents.kind_name(),
            geometry: contents.geometry().map(|g| g.kind_name()),
            absorb_opacity: filter.is_some_and(|f| f.absorb_opacity),
            input: filter.map(|f| Box::new(Self::of(f.input()))),
        }
    }

    /// Kinds from the outermost wrapper down to the innermost drawable.
    pub fn chain(&self) -> Vec<&'static str> {
        let mut out = vec![self.kind];
        let mut cur = self.input.as_deref();
        while let Some(c) = cur {
            out.push(c.kind);
            cur = c.input.as_deref();
        }
        out
    }
}

impl EntitySnapshot {
    pub fn of(entity: &Entity) -> Self {
        Self {
            transform: entity.transform().to_cols_array(),
            stencil_depth: entity.stencil_depth(),
            blend_mode: entity.blend_mode(),
            contents: ContentsSnapshot::of(entity.contents()),
        }
    }
}

impl EntityPass {
    pub fn snapshot(&self) -> PassSnapshot {
        self.snapshot_pass(self.root())
    }

    fn snapshot_pass(&self, id: PassId) -> PassSnapshot {
        let node = self.node(id);
        PassSnapshot {
            transform: node.transform().to_cols_array(),
            stencil_depth: node.stencil_depth(),
            blend_mode: node.blend_mode(),
            has_backdrop_filter: node.backdrop_filter().is_some(),
            elements: node
                .elements()
                .iter()
                .map(|e| match e {
                    Element::Entity(entity) => ElementSnapshot::Entity(EntitySnapshot::of(entity)),
                    Element::Subpass(child) => ElementSnapshot::Subpass(self.snapshot_pass(*child)),
                })
                .collect(),
        }
    }
}
