use std::fmt;
use std::sync::Arc;

use crossbeam_queue::SegQueue;
use slotmap::SlotMap;

use crate::math::{Rect, Vec2};
use crate::{Error, ErrorKind, Result};

slotmap::new_key_type! {
    pub struct SpriteId;
}

/// Border widths of a sprite's fixed 9-slice frame, in texels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpriteBorder {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl SpriteBorder {
    pub const ZERO: SpriteBorder = SpriteBorder::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> SpriteBorder {
        SpriteBorder {
            left,
            bottom,
            right,
            top,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.bottom + self.top
    }

    /// Multiplies every border width by `factor`, e.g. to convert texels to
    /// local units.
    pub fn scaled(self, factor: f32) -> SpriteBorder {
        SpriteBorder::new(
            self.left * factor,
            self.bottom * factor,
            self.right * factor,
            self.top * factor,
        )
    }
}

/// Description of a sprite as the mesh builders see it: its texel size, its
/// 9-slice border metrics and where it sits in its texture.
///
/// Texture contents and upload are the host's business; this crate only
/// consumes the metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteData {
    /// Sprite size in texels.
    pub size: Vec2,
    /// 9-slice border widths in texels. All zero when the sprite declares no
    /// border.
    pub border: SpriteBorder,
    /// How many texels of this sprite span one local unit.
    pub pixels_per_unit: f32,
    /// UV rectangle of the whole sprite within its texture.
    pub outer_uv: Rect,
    /// UV rectangle of the center region: the outer rectangle inset by the
    /// border.
    pub inner_uv: Rect,
}

impl SpriteData {
    /// Computes sprite metrics from a texel rectangle within a texture of the
    /// given size.
    ///
    /// UV coordinates follow the local-space convention: origin at the
    /// bottom-left, y up.
    pub fn from_texture_rect(
        texture_size: Vec2,
        rect: Rect,
        border: SpriteBorder,
        pixels_per_unit: f32,
    ) -> SpriteData {
        let inner_min = rect.min + Vec2::new(border.left, border.bottom);
        let inner_max = rect.max - Vec2::new(border.right, border.top);

        SpriteData {
            size: rect.size(),
            border,
            pixels_per_unit,
            outer_uv: Rect::new(rect.min / texture_size, rect.max / texture_size),
            inner_uv: Rect::new(inner_min / texture_size, inner_max / texture_size),
        }
    }

    pub fn has_border(&self) -> bool {
        self.border != SpriteBorder::ZERO
    }
}

/// Shared handle to a sprite registered in a [`SpriteCache`].
///
/// Handles are cheap to clone. Dropping the last clone queues the sprite for
/// release; the entry is freed by the next [`SpriteCache::cleanup`].
#[derive(Debug, Clone)]
pub struct SpriteHandle {
    inner: Arc<HandleInner>,
}

#[derive(Debug)]
struct HandleInner {
    id: SpriteId,
    cleanup_queue: Arc<SegQueue<SpriteId>>,
}

impl SpriteHandle {
    pub(crate) fn new(id: SpriteId, cleanup_queue: Arc<SegQueue<SpriteId>>) -> SpriteHandle {
        SpriteHandle {
            inner: Arc::new(HandleInner { id, cleanup_queue }),
        }
    }

    pub fn id(&self) -> SpriteId {
        self.inner.id
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        self.cleanup_queue.push(self.id);
    }
}

/// Registry of the sprites available to widgets.
///
/// The cache owns one permanent entry: a 1×1 full-UV sprite without a border,
/// available from [`SpriteCache::fallback`] and used by widgets with no
/// sprite assigned. Hosts typically pair it with a plain white texture. It is
/// registered when the cache is created and never released.
pub struct SpriteCache {
    sprites: SlotMap<SpriteId, SpriteData>,
    fallback: SpriteId,
    cleanup_queue: Arc<SegQueue<SpriteId>>,
}

impl SpriteCache {
    pub fn new() -> SpriteCache {
        let mut sprites = SlotMap::with_key();

        let fallback = sprites.insert(SpriteData {
            size: Vec2::ONE,
            border: SpriteBorder::ZERO,
            pixels_per_unit: 100.0,
            outer_uv: Rect::new(Vec2::ZERO, Vec2::ONE),
            inner_uv: Rect::new(Vec2::ZERO, Vec2::ONE),
        });

        SpriteCache {
            sprites,
            fallback,
            cleanup_queue: Arc::new(SegQueue::new()),
        }
    }

    /// Id of the permanent fallback sprite. Always valid.
    pub fn fallback(&self) -> SpriteId {
        self.fallback
    }

    pub fn add_sprite(&mut self, data: SpriteData) -> SpriteHandle {
        let id = self.sprites.insert(data);
        SpriteHandle::new(id, self.cleanup_queue.clone())
    }

    pub fn get(&self, id: SpriteId) -> Option<&SpriteData> {
        self.sprites.get(id)
    }

    /// Like [`SpriteCache::get`], but a dead id is an error instead of `None`.
    pub fn require(&self, id: SpriteId) -> Result<&SpriteData> {
        self.sprites
            .get(id)
            .ok_or_else(|| Error::new(ErrorKind::SpriteNotFound, "sprite is not registered"))
    }

    /// Resolves an optional sprite assignment to concrete sprite data,
    /// substituting the fallback sprite for `None` and for dead ids.
    pub fn resolve(&self, id: Option<SpriteId>) -> &SpriteData {
        id.and_then(|id| self.sprites.get(id))
            .unwrap_or_else(|| &self.sprites[self.fallback])
    }

    /// Frees sprites whose last [`SpriteHandle`] has been dropped.
    pub fn cleanup(&mut self) {
        while let Some(id) = self.cleanup_queue.pop() {
            // the fallback belongs to the cache itself
            if id == self.fallback {
                continue;
            }

            self.sprites.remove(id);
        }
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

impl Default for SpriteCache {
    fn default() -> SpriteCache {
        SpriteCache::new()
    }
}

impl fmt::Debug for SpriteCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpriteCache")
            .field("sprites", &self.sprites)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
