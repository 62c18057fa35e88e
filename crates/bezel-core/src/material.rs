use std::collections::HashMap;

use slotmap::SlotMap;

use crate::error::{Error, ErrorKind, Result};
use crate::geometry::{BorderStyle, WidgetGeometry};
use crate::math::{Vec2, Vec4};

/// Shader the border uniforms are written for. Materials running any other
/// shader are left untouched.
pub const BORDERED_IMAGE_SHADER: &str = "bezel/bordered_image";

pub const UNIFORM_IMAGE_WIDTH: &str = "image_width";
pub const UNIFORM_IMAGE_HEIGHT: &str = "image_height";
pub const UNIFORM_PIXEL_WORLD_SCALE: &str = "pixel_world_scale";
pub const UNIFORM_BORDER_RADIUS: &str = "border_radius";
pub const UNIFORM_BORDER_SIZE: &str = "border_size";

slotmap::new_key_type! {
    pub struct MaterialId;
}

/// Named uniform storage bound to a shader.
///
/// Keys are static so per-frame uniform writes never allocate.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    shader: String,
    scalars: HashMap<&'static str, f32>,
    vectors: HashMap<&'static str, Vec4>,
}

impl Material {
    pub fn new(shader: impl Into<String>) -> Material {
        Material {
            shader: shader.into(),
            scalars: HashMap::new(),
            vectors: HashMap::new(),
        }
    }

    /// Material running the border shader, with no uniforms written yet.
    pub fn bordered_image() -> Material {
        Material::new(BORDERED_IMAGE_SHADER)
    }

    pub fn shader(&self) -> &str {
        &self.shader
    }

    pub fn set_scalar(&mut self, name: &'static str, value: f32) {
        self.scalars.insert(name, value);
    }

    pub fn set_vector(&mut self, name: &'static str, value: Vec4) {
        self.vectors.insert(name, value);
    }

    pub fn scalar(&self, name: &str) -> Option<f32> {
        self.scalars.get(name).copied()
    }

    pub fn vector(&self, name: &str) -> Option<Vec4> {
        self.vectors.get(name).copied()
    }
}

/// Uniform values the border shader consumes, recomputed from the widget
/// parameters and its current geometry every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderUniforms {
    /// Rectangle size inflated by the falloff distance, in local units.
    pub image_size: Vec2,
    /// World units covered by one falloff step, normalized by the falloff
    /// distance. Zero when the falloff or the rectangle width is zero.
    pub pixel_world_scale: f32,
    /// Corner radii scaled down to fit the rectangle, as (top-left,
    /// top-right, bottom-right, bottom-left).
    pub border_radius: Vec4,
    /// Border width in local units, never negative.
    pub border_size: f32,
}

impl BorderUniforms {
    pub fn compute(style: &BorderStyle, geometry: &WidgetGeometry) -> BorderUniforms {
        let falloff = style.falloff.max(0.0);
        let size = geometry.rect.size().max(Vec2::ZERO);

        let pixel_world_scale = if falloff > 0.0 {
            (geometry.world_units_per_pixel() / falloff).max(0.0)
        } else {
            0.0
        };

        BorderUniforms {
            image_size: size + Vec2::splat(falloff),
            pixel_world_scale,
            border_radius: style.radius.scaled_to_fit(size).into(),
            border_size: style.width.max(0.0),
        }
    }

    /// Writes the uniforms onto `material` and reports whether it did.
    ///
    /// Materials running a shader other than [`BORDERED_IMAGE_SHADER`] have
    /// no matching uniform slots and are left byte for byte as they were.
    pub fn apply_to(&self, material: &mut Material) -> bool {
        if material.shader() != BORDERED_IMAGE_SHADER {
            return false;
        }

        material.set_scalar(UNIFORM_IMAGE_WIDTH, self.image_size.x);
        material.set_scalar(UNIFORM_IMAGE_HEIGHT, self.image_size.y);
        material.set_scalar(UNIFORM_PIXEL_WORLD_SCALE, self.pixel_world_scale);
        material.set_vector(UNIFORM_BORDER_RADIUS, self.border_radius);
        material.set_scalar(UNIFORM_BORDER_SIZE, self.border_size);
        true
    }
}

/// Owns every live [`Material`], addressed by [`MaterialId`].
#[derive(Default)]
pub struct MaterialCache {
    materials: SlotMap<MaterialId, Material>,
}

impl MaterialCache {
    pub fn new() -> MaterialCache {
        MaterialCache::default()
    }

    pub fn insert(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Like [`MaterialCache::get_mut`], but a missing material is an error
    /// instead of a silent [`None`].
    pub fn require_mut(&mut self, id: MaterialId) -> Result<&mut Material> {
        self.materials
            .get_mut(id)
            .ok_or_else(|| Error::new(ErrorKind::MaterialNotFound, "material is not registered"))
    }

    pub fn remove(&mut self, id: MaterialId) -> Option<Material> {
        self.materials.remove(id)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl std::fmt::Debug for MaterialCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialCache")
            .field("materials", &self.materials.len())
            .finish_non_exhaustive()
    }
}
