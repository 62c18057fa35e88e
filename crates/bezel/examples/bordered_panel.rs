use bezel::math::{vec2, Rect, Vec2};
use bezel::{
    BorderStyle, BorderedImage, Color, CornerRadii, DrawMode, FillMethod, FillSettings,
    MaterialCache, Mesh, Result, SpriteBorder, SpriteCache, SpriteData, WidgetGeometry,
};

fn main() -> Result<()> {
    env_logger::init();

    let mut sprites = SpriteCache::new();
    let mut materials = MaterialCache::new();

    // 96×96 panel texture with a 12 texel frame, at 96 texels per unit
    let panel = sprites.add_sprite(SpriteData::from_texture_rect(
        Vec2::splat(96.0),
        Rect::new(Vec2::ZERO, Vec2::splat(96.0)),
        SpriteBorder::new(12.0, 12.0, 12.0, 12.0),
        96.0,
    ));

    let mut background = BorderedImage::new();
    background.set_sprite(Some(panel.clone()));
    background.set_draw_mode(DrawMode::Tiled);
    background.set_color(Color::WHITE.with_alpha(0.9));
    background.set_border(BorderStyle {
        width: 0.05,
        falloff: 0.02,
        radius: CornerRadii::new_equal(0.1),
    });

    let mut health_bar = BorderedImage::new();
    health_bar.set_color(Color::rgb(0.8, 0.2, 0.2));
    health_bar.set_draw_mode(DrawMode::Filled);
    health_bar.set_fill(FillSettings {
        method: FillMethod::Horizontal { from_right: false },
        amount: 0.65,
        clockwise: true,
    });

    let mut mesh = Mesh::new();

    let panel_geometry =
        WidgetGeometry::from_rect(Rect::from_pos_size(vec2(0.0, 0.0), vec2(4.0, 3.0)));
    background.ensure_material(&mut materials);
    background.draw_material(&mut materials, &panel_geometry)?;
    background.rebuild_mesh(&sprites, &panel_geometry, &mut mesh);
    println!(
        "background: {} triangles, texture {}",
        mesh.triangle_count(),
        background.display_sprite(&sprites).size,
    );

    let bar_geometry =
        WidgetGeometry::from_rect(Rect::from_pos_size(vec2(0.5, 2.4), vec2(3.0, 0.3)));
    health_bar.ensure_material(&mut materials);
    health_bar.draw_material(&mut materials, &bar_geometry)?;
    health_bar.rebuild_mesh(&sprites, &bar_geometry, &mut mesh);
    println!("health bar: {} triangles", mesh.triangle_count());

    background.release_material(&mut materials);
    health_bar.release_material(&mut materials);
    drop(background);
    drop(panel);
    sprites.cleanup();
    println!(
        "{} sprites and {} materials still registered",
        sprites.sprite_count(),
        materials.len(),
    );

    Ok(())
}
