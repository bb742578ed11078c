use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::foundation::core::{Point, Rect};

/// Font identity used as part of a glyph atlas key.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Font {
    pub family: String,
    pub size_px: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphPosition {
    pub glyph_id: u16,
    pub position: Point,
}

/// One shaped run of glyphs in a single font.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    pub font: Font,
    pub glyphs: Vec<GlyphPosition>,
}

/// Already-shaped text, positioned relative to the frame origin.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextFrame {
    pub runs: Vec<TextRun>,
}

impl TextFrame {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|r| r.glyphs.len()).sum()
    }

    /// Bounds of glyph origins inflated by the font size, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.runs
            .iter()
            .flat_map(|run| {
                let s = run.font.size_px;
                run.glyphs.iter().map(move |g| {
                    Rect::new(g.position.x, g.position.y - s, g.position.x + s, g.position.y)
                })
            })
            .reduce(|acc, r| acc.union(r))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct GlyphKey {
    family: String,
    size_bits: u64,
    glyph_id: u16,
}

/// Set of glyphs that will need rasterizing once the graph is rendered.
///
/// Text frames register their glyphs while recording; packing happens later in the backend.
#[derive(Clone, Debug, Default)]
pub struct LazyGlyphAtlas {
    glyphs: BTreeSet<GlyphKey>,
    frames: usize,
}

impl LazyGlyphAtlas {
    pub fn add_text_frame(&mut self, frame: &TextFrame) {
        self.frames += 1;
        for run in &frame.runs {
            for g in &run.glyphs {
                self.glyphs.insert(GlyphKey {
                    family: run.font.family.clone(),
                    size_bits: run.font.size_px.to_bits(),
                    glyph_id: g.glyph_id,
                });
            }
        }
    }

    pub fn merge(&mut self, other: &LazyGlyphAtlas) {
        self.frames += other.frames;
        self.glyphs.extend(other.glyphs.iter().cloned());
    }

    /// Unique (font, size, glyph) entries registered so far.
    pub fn unique_glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Shared handle attached to every text record of one render graph.
pub type SharedGlyphAtlas = Arc<Mutex<LazyGlyphAtlas>>;

pub(crate) fn new_shared_atlas(atlas: LazyGlyphAtlas) -> SharedGlyphAtlas {
    Arc::new(Mutex::new(atlas))
}

/// Locks the atlas, recovering the data if a previous holder panicked.
pub fn lock_atlas(atlas: &SharedGlyphAtlas) -> MutexGuard<'_, LazyGlyphAtlas> {
    atlas.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "../../tests/unit/render_graph/glyph_atlas.rs"]
mod tests;
