use bezel_core::mesh::{build_filled, build_simple, build_tiled};
use bezel_core::{
    BORDERED_IMAGE_SHADER, BorderStyle, BorderUniforms, Color, CornerRadii, DrawMode, Error,
    ErrorKind, FillSettings, Material, MaterialCache, MaterialId, Mesh, Result, SpriteCache,
    SpriteData, SpriteHandle, WidgetGeometry,
};

use log::debug;

/// Image widget with a resolution-independent border rendered by the
/// [`BORDERED_IMAGE_SHADER`].
///
/// The widget owns three border parameters: the border width, the falloff
/// distance softening the edge, and per-corner radii.
/// [`BorderedImage::draw_material`] recomputes them into shader uniforms,
/// and [`BorderedImage::rebuild_mesh`] emits geometry for the current draw
/// mode. Setters flag the affected side dirty; hosts poll
/// [`BorderedImage::is_mesh_dirty`] and [`BorderedImage::is_material_dirty`]
/// to skip redundant work.
#[derive(Debug)]
pub struct BorderedImage {
    sprite: Option<SpriteHandle>,
    color: Color,
    draw_mode: DrawMode,
    fill_center: bool,
    fill: FillSettings,
    border: BorderStyle,
    material: Option<MaterialId>,
    mesh_dirty: bool,
    material_dirty: bool,
    warned_foreign_shader: bool,
}

impl Default for BorderedImage {
    fn default() -> BorderedImage {
        BorderedImage {
            sprite: None,
            color: Color::WHITE,
            draw_mode: DrawMode::Simple,
            fill_center: true,
            fill: FillSettings::default(),
            border: BorderStyle::default(),
            material: None,
            mesh_dirty: true,
            material_dirty: true,
            warned_foreign_shader: false,
        }
    }
}

impl BorderedImage {
    pub fn new() -> BorderedImage {
        BorderedImage::default()
    }

    pub fn sprite(&self) -> Option<&SpriteHandle> {
        self.sprite.as_ref()
    }

    /// Changing the sprite affects both the mesh UVs and the bound texture,
    /// so it dirties both sides.
    pub fn set_sprite(&mut self, sprite: Option<SpriteHandle>) {
        let old = self.sprite.as_ref().map(SpriteHandle::id);
        if old == sprite.as_ref().map(SpriteHandle::id) {
            return;
        }

        self.sprite = sprite;
        self.mesh_dirty = true;
        self.material_dirty = true;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color == color {
            return;
        }

        self.color = color;
        self.mesh_dirty = true;
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, draw_mode: DrawMode) {
        if self.draw_mode == draw_mode {
            return;
        }

        self.draw_mode = draw_mode;
        self.mesh_dirty = true;
    }

    /// Whether [`DrawMode::Tiled`] fills the center region. The other draw
    /// modes ignore it.
    pub fn fill_center(&self) -> bool {
        self.fill_center
    }

    pub fn set_fill_center(&mut self, fill_center: bool) {
        if self.fill_center == fill_center {
            return;
        }

        self.fill_center = fill_center;
        self.mesh_dirty = true;
    }

    /// Parameters of [`DrawMode::Filled`]. The other draw modes ignore them.
    pub fn fill(&self) -> FillSettings {
        self.fill
    }

    pub fn set_fill(&mut self, fill: FillSettings) {
        if self.fill == fill {
            return;
        }

        self.fill = fill;
        self.mesh_dirty = true;
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn set_border(&mut self, border: BorderStyle) {
        if self.border == border {
            return;
        }

        self.border = border;
        self.mesh_dirty = true;
        self.material_dirty = true;
    }

    pub fn border_width(&self) -> f32 {
        self.border.width
    }

    pub fn set_border_width(&mut self, width: f32) {
        if self.border.width == width {
            return;
        }

        self.border.width = width;
        self.material_dirty = true;
    }

    pub fn falloff(&self) -> f32 {
        self.border.falloff
    }

    /// The falloff both feeds the uniforms and inflates the simple quad, so
    /// it dirties both sides.
    pub fn set_falloff(&mut self, falloff: f32) {
        if self.border.falloff == falloff {
            return;
        }

        self.border.falloff = falloff;
        self.mesh_dirty = true;
        self.material_dirty = true;
    }

    pub fn corner_radius(&self) -> CornerRadii {
        self.border.radius
    }

    pub fn set_corner_radius(&mut self, radius: impl Into<CornerRadii>) {
        let radius = radius.into();
        if self.border.radius == radius {
            return;
        }

        self.border.radius = radius;
        self.material_dirty = true;
    }

    pub fn is_mesh_dirty(&self) -> bool {
        self.mesh_dirty
    }

    pub fn is_material_dirty(&self) -> bool {
        self.material_dirty
    }

    /// Id of the widget's material, if one is registered.
    pub fn material(&self) -> Option<MaterialId> {
        self.material
    }

    /// Registers the widget's material if it doesn't exist yet.
    ///
    /// Call this when the widget is enabled, and again whenever the cache
    /// may have been rebuilt from scratch. Registering marks the material
    /// dirty so the next [`BorderedImage::draw_material`] uploads a full
    /// uniform set.
    pub fn ensure_material(&mut self, materials: &mut MaterialCache) -> MaterialId {
        if let Some(id) = self.material {
            if materials.get(id).is_some() {
                return id;
            }
        }

        let id = materials.insert(Material::bordered_image());
        self.material = Some(id);
        self.material_dirty = true;
        id
    }

    /// Recomputes the border uniforms for the current geometry and writes
    /// them onto the widget's material.
    ///
    /// Fails if the widget has no material or its material is gone from the
    /// cache. A material that was swapped to run a different shader is left
    /// untouched and the skip is logged once.
    pub fn draw_material(
        &mut self,
        materials: &mut MaterialCache,
        geometry: &WidgetGeometry,
    ) -> Result<MaterialId> {
        let id = self
            .material
            .ok_or_else(|| Error::new(ErrorKind::MaterialNotFound, "widget has no material"))?;
        let material = materials
            .require_mut(id)
            .map_err(|e| e.with_context("failed to fetch the widget's draw material"))?;

        let uniforms = BorderUniforms::compute(&self.border, geometry);
        if !uniforms.apply_to(material) && !self.warned_foreign_shader {
            debug!(
                "skipping border uniforms: material runs {:?}, not {:?}",
                material.shader(),
                BORDERED_IMAGE_SHADER,
            );
            self.warned_foreign_shader = true;
        }

        self.material_dirty = false;
        Ok(id)
    }

    /// Removes the widget's material from the cache, if any.
    pub fn release_material(&mut self, materials: &mut MaterialCache) {
        if let Some(id) = self.material.take() {
            materials.remove(id);
        }

        self.warned_foreign_shader = false;
    }

    /// Rebuilds `mesh` for the current draw mode.
    ///
    /// The mesh is cleared first, so one mesh can be reused across widgets.
    pub fn rebuild_mesh(
        &mut self,
        sprites: &SpriteCache,
        geometry: &WidgetGeometry,
        mesh: &mut Mesh,
    ) {
        mesh.clear();

        let sprite = self
            .sprite
            .as_ref()
            .and_then(|handle| sprites.get(handle.id()));
        let rect = geometry.rect;

        match self.draw_mode {
            // the shader renders the sliced frame, so both modes share one
            // quad
            DrawMode::Simple | DrawMode::Sliced => {
                build_simple(mesh, rect, sprite, self.border.falloff, self.color);
            }
            DrawMode::Tiled => build_tiled(mesh, rect, sprite, self.fill_center, self.color),
            DrawMode::Filled => build_filled(mesh, rect, sprite, &self.fill, self.color),
        }

        self.mesh_dirty = false;
    }

    /// Sprite data the widget is drawn with: the set sprite, or the cache's
    /// fallback when none is set or the handle went stale.
    pub fn display_sprite<'a>(&self, sprites: &'a SpriteCache) -> &'a SpriteData {
        sprites.resolve(self.sprite.as_ref().map(SpriteHandle::id))
    }
}
