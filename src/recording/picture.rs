use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render_graph::pass::EntityPass;
use crate::render_graph::snapshot::PassSnapshot;

/// A detached, replayable recording.
///
/// Produced by `Canvas::end_recording_as_picture` and replayed with `Canvas::draw_picture`.
/// The default picture holds no graph and replays as a no-op.
#[derive(Debug, Default)]
pub struct Picture {
    pass: Option<EntityPass>,
}

impl Picture {
    pub(crate) fn new(pass: EntityPass) -> Self {
        Self { pass: Some(pass) }
    }

    pub fn is_empty(&self) -> bool {
        self.pass.is_none()
    }

    pub fn pass(&self) -> Option<&EntityPass> {
        self.pass.as_ref()
    }

    pub fn into_pass(self) -> Option<EntityPass> {
        self.pass
    }

    pub fn entity_count(&self) -> usize {
        self.pass.as_ref().map_or(0, EntityPass::entity_count)
    }

    pub fn snapshot(&self) -> Option<PassSnapshot> {
        self.pass.as_ref().map(EntityPass::snapshot)
    }

    /// Pretty JSON of [`Picture::snapshot`]; an empty picture renders as `null`.
    pub fn snapshot_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| CanvasError::serde(format!("serialize picture snapshot: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recording/picture.rs"]
mod tests;
