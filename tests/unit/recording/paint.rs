use std::sync::Arc;

use super::*;
use crate::foundation::core::Point;
use crate::render_graph::contents::linear_gradient_source;
use crate::render_graph::filters::{FilterKind, blend_color_filter, blur_image_filter};
use crate::render_graph::snapshot::ContentsSnapshot;

fn base() -> Contents {
    Contents::solid_color(Geometry::make_cover(), Color::RED)
}

fn chain(contents: &Contents) -> Vec<&'static str> {
    ContentsSnapshot::of(contents).chain()
}

fn gradient() -> ColorSourceProc {
    linear_gradient_source(
        Point::ZERO,
        Point::new(10.0, 0.0),
        vec![Color::RED, Color::BLUE],
        vec![0.0, 1.0],
        TileMode::Clamp,
    )
}

#[test]
fn with_filters_is_pass_through_without_effects() {
    let paint = Paint::default();
    assert!(!paint.has_effects());
    let out = paint.with_filters(base(), None, &Matrix::IDENTITY);
    assert_eq!(out, base());
    let out = paint.with_filters_for_subpass_target(base(), &Matrix::IDENTITY);
    assert_eq!(out, base());
}

#[test]
fn effects_wrap_in_fixed_order() {
    let paint = Paint {
        mask_blur_descriptor: Some(MaskBlurDescriptor::new(BlurStyle::Normal, 2.0).unwrap()),
        image_filter: Some(blur_image_filter(1.0, 1.0, TileMode::Clamp)),
        color_filter: Some(blend_color_filter(Color::BLUE, BlendMode::Multiply)),
        invert_colors: true,
        ..Paint::default()
    };
    let out = paint.with_filters(base(), None, &Matrix::IDENTITY);
    assert_eq!(
        chain(&out),
        vec![
            "color_matrix",
            "blend_color",
            "gaussian_blur",
            "gaussian_blur",
            "solid_color"
        ]
    );
    let invert = out.as_filter().unwrap();
    assert_eq!(invert.kind, FilterKind::ColorMatrix(ColorMatrix::INVERT));
    assert!(!invert.absorb_opacity);
}

#[test]
fn mask_blur_kind_follows_solid_color() {
    let blur = Some(MaskBlurDescriptor::new(BlurStyle::Outer, 3.0).unwrap());
    let flat = Paint {
        mask_blur_descriptor: blur,
        ..Paint::default()
    };
    let shaded = Paint {
        mask_blur_descriptor: blur,
        color_source: Some(gradient()),
        ..Paint::default()
    };

    let m = Matrix::IDENTITY;
    assert_eq!(chain(&flat.with_filters(base(), None, &m))[0], "gaussian_blur");
    assert_eq!(chain(&shaded.with_filters(base(), None, &m))[0], "border_mask_blur");
    assert_eq!(chain(&shaded.with_filters(base(), Some(true), &m))[0], "gaussian_blur");
    assert_eq!(chain(&flat.with_filters(base(), Some(false), &m))[0], "border_mask_blur");
}

#[test]
fn subpass_target_chain_absorbs_opacity() {
    let paint = Paint {
        mask_blur_descriptor: Some(MaskBlurDescriptor::new(BlurStyle::Normal, 1.0).unwrap()),
        color_filter: Some(blend_color_filter(Color::GREEN, BlendMode::Screen)),
        invert_colors: true,
        ..Paint::default()
    };
    let out = paint.with_filters_for_subpass_target(base(), &Matrix::IDENTITY);
    let snap = ContentsSnapshot::of(&out);
    assert_eq!(
        snap.chain(),
        vec!["color_matrix", "blend_color", "border_mask_blur", "solid_color"]
    );
    assert!(snap.absorb_opacity);
    assert!(snap.input.as_ref().unwrap().absorb_opacity);
    assert!(!snap.input.as_ref().unwrap().input.as_ref().unwrap().absorb_opacity);
}

#[test]
fn declining_color_filter_passes_input_through() {
    let paint = Paint {
        color_filter: Some(Arc::new(|_input: FilterInput| -> Option<FilterContents> { None })),
        ..Paint::default()
    };
    assert_eq!(paint.with_filters(base(), None, &Matrix::IDENTITY), base());
}

#[test]
fn image_filter_receives_effect_transform() {
    let paint = Paint {
        image_filter: Some(blur_image_filter(4.0, 1.0, TileMode::Mirror)),
        ..Paint::default()
    };
    let m = Matrix::make_scale(crate::foundation::math::Vec3::new(2.0, 2.0, 1.0));
    let out = paint.with_filters(base(), None, &m);
    let filter = out.as_filter().unwrap();
    assert_eq!(filter.effect_transform, m);
    assert_eq!(
        filter.kind,
        FilterKind::GaussianBlur {
            sigma_x: 4.0,
            sigma_y: 1.0,
            style: BlurStyle::Normal,
            tile_mode: TileMode::Mirror,
        }
    );
}

#[test]
fn contents_for_entity_follows_style() {
    let path = crate::render_graph::geometry::rect_path(crate::foundation::core::Rect::new(
        0.0, 0.0, 4.0, 4.0,
    ));

    let fill = Paint::fill(Color::BLUE).create_contents_for_entity(path.clone(), false);
    assert_eq!(fill.geometry().map(|g| g.kind_name()), Some("fill_path"));

    let stroke = Paint::stroke(Color::BLUE, 3.0).create_contents_for_entity(path.clone(), false);
    match stroke.geometry() {
        Some(Geometry::StrokePath { width, .. }) => assert_eq!(*width, 3.0),
        other => panic!("unexpected {other:?}"),
    }

    let cover = Paint::stroke(Color::BLUE, 3.0).create_contents_for_entity(path, true);
    assert_eq!(cover.geometry(), Some(&Geometry::Cover));
}

#[test]
fn color_source_gets_geometry_and_alpha() {
    let paint = Paint {
        color: Color::WHITE.with_alpha(0.25),
        color_source: Some(gradient()),
        ..Paint::default()
    };
    let c = paint.create_contents_for_geometry(Geometry::make_rect(
        crate::foundation::core::Rect::new(0.0, 0.0, 1.0, 1.0),
    ));
    match c {
        Contents::LinearGradient(g) => {
            assert_eq!(g.alpha, 0.25);
            assert_eq!(g.geometry.kind_name(), "rect");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn mask_blur_rejects_bad_sigma() {
    assert!(MaskBlurDescriptor::new(BlurStyle::Normal, -1.0).is_err());
    assert!(MaskBlurDescriptor::new(BlurStyle::Normal, f64::NAN).is_err());
    assert!(MaskBlurDescriptor::new(BlurStyle::Normal, 0.0).is_ok());
}
