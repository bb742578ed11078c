use super::*;
use crate::render_graph::filters::{BlurStyle, FilterInput};
use crate::render_graph::glyph_atlas::{LazyGlyphAtlas, new_shared_atlas};

fn texture() -> Arc<Texture> {
    Arc::new(Texture::from_rgba8(4, 2, vec![0; 32]).unwrap())
}

#[test]
fn uniform_setters_apply_per_kind() {
    let mut solid = Contents::solid_color(Geometry::make_cover(), Color::RED);
    solid.set_geometry(Geometry::make_rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
    solid.set_alpha(0.5);
    assert_eq!(
        solid,
        Contents::solid_color(
            Geometry::make_rect(Rect::new(0.0, 0.0, 1.0, 1.0)),
            Color::RED.with_alpha(0.5)
        )
    );

    let mut tex = Contents::Texture(TextureContents::make_rect(
        Rect::new(0.0, 0.0, 4.0, 2.0),
        texture(),
    ));
    tex.set_alpha(0.25);
    tex.set_geometry(Geometry::make_cover());
    tex.set_color(Color::BLUE);
    match &tex {
        Contents::Texture(t) => {
            assert_eq!(t.opacity, 0.25);
            assert_eq!(t.source_rect, Rect::new(0.0, 0.0, 4.0, 2.0));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(tex.geometry().is_none());
}

#[test]
fn color_sources_produce_fresh_contents() {
    let source = linear_gradient_source(
        Point::ZERO,
        Point::new(10.0, 0.0),
        vec![Color::RED, Color::BLUE],
        vec![0.0, 1.0],
        TileMode::Clamp,
    );
    let mut a = source();
    a.set_geometry(Geometry::make_rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
    a.set_alpha(0.5);
    let b = source();
    assert_ne!(a, b);
    assert_eq!(b.geometry(), Some(&Geometry::Cover));

    let radial = radial_gradient_source(
        Point::ZERO,
        5.0,
        vec![Color::WHITE],
        vec![0.0],
        TileMode::Mirror,
    )();
    assert_eq!(radial.kind_name(), "radial_gradient");

    let tiled = image_source(
        texture(),
        TileMode::Repeat,
        TileMode::Repeat,
        SamplerDescriptor::default(),
    )();
    assert_eq!(tiled.kind_name(), "tiled_texture");
}

#[test]
fn visit_mut_reaches_nested_inputs() {
    let atlas = new_shared_atlas(LazyGlyphAtlas::default());
    let text = Contents::Text(TextContents {
        frame: TextFrame::default(),
        glyph_atlas: atlas,
        color: Color::BLACK,
    });
    let blurred = FilterContents::make_gaussian_blur(
        FilterInput::make(text),
        1.0,
        1.0,
        BlurStyle::Normal,
        TileMode::Decal,
        Matrix::IDENTITY,
    );
    let mut contents = Contents::from(blurred);

    let mut seen = Vec::new();
    contents.visit_mut(&mut |c| seen.push(c.kind_name()));
    assert_eq!(seen, vec!["gaussian_blur", "text"]);

    contents.visit_mut(&mut |c| c.set_color(Color::RED));
    let inner = contents.as_filter().unwrap().input();
    match inner {
        Contents::Text(t) => assert_eq!(t.color, Color::RED),
        other => panic!("unexpected {other:?}"),
    }
}
