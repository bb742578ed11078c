use std::sync::Arc;

use crate::foundation::core::{BlendMode, Point, Rect};
use crate::foundation::math::Matrix;
use crate::render_graph::contents::{Contents, TextureContents};
use crate::render_graph::entity::Entity;
use crate::render_graph::filters::ImageFilterProc;
use crate::render_graph::glyph_atlas::{
    LazyGlyphAtlas, SharedGlyphAtlas, lock_atlas, new_shared_atlas,
};
use crate::render_graph::texture::Texture;

/// Decides how a subpass is composited back into its parent.
pub trait EntityPassDelegate: std::fmt::Debug + Send + Sync {
    /// Device-space bounds the subpass is limited to, if any.
    fn coverage(&self, transform: &Matrix) -> Option<Rect>;

    /// The subpass contributes nothing and may be skipped entirely.
    fn can_elide(&self) -> bool;

    /// The subpass may be drawn straight into the parent target without its own target.
    fn can_collapse_into_parent_pass(&self) -> bool;

    /// Drawable that composites the rendered subpass `target` into the parent.
    fn create_contents_for_subpass_target(
        &self,
        target: Arc<Texture>,
        effect_transform: &Matrix,
    ) -> Contents;
}

/// Delegate attached to plain subpasses: unbounded, never elided, always collapsible.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPassDelegate;

impl EntityPassDelegate for DefaultPassDelegate {
    fn coverage(&self, _transform: &Matrix) -> Option<Rect> {
        None
    }

    fn can_elide(&self) -> bool {
        false
    }

    fn can_collapse_into_parent_pass(&self) -> bool {
        true
    }

    fn create_contents_for_subpass_target(
        &self,
        target: Arc<Texture>,
        _effect_transform: &Matrix,
    ) -> Contents {
        let destination = Rect::from_origin_size(Point::ZERO, target.size());
        Contents::Texture(TextureContents::make_rect(destination, target))
    }
}

/// Handle to a pass node inside an [`EntityPass`] graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(pub(crate) u32);

impl PassId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered content of a pass: draw records interleaved with child subpasses.
#[derive(Clone, Debug)]
pub enum Element {
    Entity(Entity),
    Subpass(PassId),
}

/// One node of the render graph.
#[derive(Clone)]
pub struct PassNode {
    parent: Option<PassId>,
    elements: Vec<Element>,
    transform: Matrix,
    stencil_depth: u32,
    blend_mode: BlendMode,
    delegate: Arc<dyn EntityPassDelegate>,
    backdrop_filter: Option<ImageFilterProc>,
}

impl std::fmt::Debug for PassNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassNode")
            .field("parent", &self.parent)
            .field("elements", &self.elements)
            .field("transform", &self.transform)
            .field("stencil_depth", &self.stencil_depth)
            .field("blend_mode", &self.blend_mode)
            .field("delegate", &self.delegate)
            .field("has_backdrop_filter", &self.backdrop_filter.is_some())
            .finish()
    }
}

impl PassNode {
    fn new(parent: Option<PassId>) -> Self {
        Self {
            parent,
            elements: Vec::new(),
            transform: Matrix::IDENTITY,
            stencil_depth: 0,
            blend_mode: BlendMode::default(),
            delegate: Arc::new(DefaultPassDelegate),
            backdrop_filter: None,
        }
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.elements.push(Element::Entity(entity));
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Draw records directly in this pass, in recording order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.elements.iter().filter_map(|e| match e {
            Element::Entity(entity) => Some(entity),
            Element::Subpass(_) => None,
        })
    }

    pub fn subpasses(&self) -> impl Iterator<Item = PassId> + '_ {
        self.elements.iter().filter_map(|e| match e {
            Element::Subpass(id) => Some(*id),
            Element::Entity(_) => None,
        })
    }

    /// Parent pass, `None` for the root.
    pub fn superpass(&self) -> Option<PassId> {
        self.parent
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Matrix) {
        self.transform = transform;
    }

    pub fn stencil_depth(&self) -> u32 {
        self.stencil_depth
    }

    pub fn set_stencil_depth(&mut self, stencil_depth: u32) {
        self.stencil_depth = stencil_depth;
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.blend_mode = blend_mode;
    }

    pub fn delegate(&self) -> &dyn EntityPassDelegate {
        self.delegate.as_ref()
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn EntityPassDelegate>) {
        self.delegate = delegate;
    }

    pub fn backdrop_filter(&self) -> Option<&ImageFilterProc> {
        self.backdrop_filter.as_ref()
    }

    pub fn set_backdrop_filter(&mut self, backdrop_filter: Option<ImageFilterProc>) {
        self.backdrop_filter = backdrop_filter;
    }
}

/// Arena-backed render graph. Node 0 is the root; children refer to parents by [`PassId`].
///
/// All text records in one graph share the graph's lazy glyph atlas.
#[derive(Debug)]
pub struct EntityPass {
    nodes: Vec<PassNode>,
    glyph_atlas: SharedGlyphAtlas,
}

impl Default for EntityPass {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityPass {
    pub fn new() -> Self {
        Self {
            nodes: vec![PassNode::new(None)],
            glyph_atlas: new_shared_atlas(LazyGlyphAtlas::default()),
        }
    }

    pub fn root(&self) -> PassId {
        PassId(0)
    }

    pub fn node(&self, id: PassId) -> &PassNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: PassId) -> &mut PassNode {
        &mut self.nodes[id.index()]
    }

    pub fn add_entity(&mut self, pass: PassId, entity: Entity) {
        self.node_mut(pass).add_entity(entity);
    }

    /// Appends a new, empty child pass to `parent` and returns it.
    pub fn add_subpass(&mut self, parent: PassId) -> PassId {
        let id = PassId(self.nodes.len() as u32);
        self.nodes.push(PassNode::new(Some(parent)));
        self.node_mut(parent).elements.push(Element::Subpass(id));
        id
    }

    pub fn superpass(&self, id: PassId) -> Option<PassId> {
        self.node(id).superpass()
    }

    /// Height of the subtree rooted at `id`; a pass without subpasses has depth 1.
    pub fn subpasses_depth(&self, id: PassId) -> usize {
        1 + self
            .node(id)
            .subpasses()
            .map(|child| self.subpasses_depth(child))
            .max()
            .unwrap_or(0)
    }

    pub fn pass_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn entity_count(&self) -> usize {
        self.nodes.iter().map(|n| n.entities().count()).sum()
    }

    /// Shared atlas that text records of this graph register their glyphs with.
    pub fn lazy_glyph_atlas(&self) -> SharedGlyphAtlas {
        Arc::clone(&self.glyph_atlas)
    }

    /// Visits every entity depth-first in drawing order. Stops when `visitor` returns `false`.
    pub fn iterate_all_entities(&mut self, mut visitor: impl FnMut(&mut Entity) -> bool) {
        let root = self.root();
        visit_entities(&mut self.nodes, root, &mut visitor);
    }

    /// Visits every pass node except the root.
    pub fn iterate_all_subpasses(&mut self, mut visitor: impl FnMut(&mut PassNode)) {
        for node in self.nodes.iter_mut().skip(1) {
            visitor(node);
        }
    }

    /// Moves the contents of `other`'s root into `target`, grafting its subpasses as children
    /// of `target` and folding its glyph atlas into this graph's atlas.
    pub fn add_subpass_inline(&mut self, target: PassId, other: EntityPass) {
        let EntityPass {
            nodes: other_nodes,
            glyph_atlas: other_atlas,
        } = other;

        if !Arc::ptr_eq(&self.glyph_atlas, &other_atlas) {
            lock_atlas(&self.glyph_atlas).merge(&lock_atlas(&other_atlas));
        }

        // other node k (k >= 1) lands at base + k - 1; other root maps to `target`
        let base = self.nodes.len() as u32;
        let remap = |id: PassId| {
            if id.0 == 0 {
                target
            } else {
                PassId(base + id.0 - 1)
            }
        };

        let mut other_nodes = other_nodes.into_iter();
        let Some(other_root) = other_nodes.next() else {
            return;
        };

        let mut grafted: Vec<Element> = other_root.elements;
        for node in other_nodes {
            let mut node = node;
            node.parent = node.parent.map(remap);
            self.nodes.push(node);
        }

        let atlas = Arc::clone(&self.glyph_atlas);
        let relink = |element: &mut Element| match element {
            Element::Subpass(id) => *id = remap(*id),
            Element::Entity(entity) => entity.contents_mut().visit_mut(&mut |c| {
                if let Contents::Text(text) = c {
                    text.glyph_atlas = Arc::clone(&atlas);
                }
            }),
        };

        for node in &mut self.nodes[base as usize..] {
            node.elements.iter_mut().for_each(&relink);
        }
        grafted.iter_mut().for_each(&relink);
        self.node_mut(target).elements.extend(grafted);
    }
}

impl Clone for EntityPass {
    /// Deep copy. The clone gets its own glyph atlas and its text records point at it.
    fn clone(&self) -> Self {
        let glyph_atlas = new_shared_atlas(lock_atlas(&self.glyph_atlas).clone());
        let mut nodes = self.nodes.clone();
        for node in &mut nodes {
            for element in &mut node.elements {
                if let Element::Entity(entity) = element {
                    entity.contents_mut().visit_mut(&mut |c| {
                        if let Contents::Text(text) = c {
                            text.glyph_atlas = Arc::clone(&glyph_atlas);
                        }
                    });
                }
            }
        }
        Self { nodes, glyph_atlas }
    }
}

fn visit_entities(
    nodes: &mut [PassNode],
    id: PassId,
    visitor: &mut dyn FnMut(&mut Entity) -> bool,
) -> bool {
    for i in 0..nodes[id.index()].elements.len() {
        let child = match &mut nodes[id.index()].elements[i] {
            Element::Entity(entity) => {
                if !visitor(entity) {
                    return false;
                }
                continue;
            }
            Element::Subpass(child) => *child,
        };
        if !visit_entities(nodes, child, visitor) {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/render_graph/pass.rs"]
mod tests;
