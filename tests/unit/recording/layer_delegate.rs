use super::*;
use crate::foundation::core::Color;
use crate::foundation::math::Vec3;
use crate::render_graph::filters::{ColorMatrix, matrix_color_filter};
use crate::render_graph::snapshot::ContentsSnapshot;

fn target() -> Arc<Texture> {
    Arc::new(Texture::from_rgba8(4, 2, vec![0; 32]).unwrap())
}

#[test]
fn coverage_is_transformed_bounds() {
    let d = PaintPassDelegate::new(Paint::default(), Some(Rect::new(0.0, 0.0, 10.0, 5.0)));
    let m = Matrix::make_translation(Vec3::new(3.0, 4.0, 0.0));
    assert_eq!(d.coverage(&m), Some(Rect::new(3.0, 4.0, 13.0, 9.0)));
    assert_eq!(PaintPassDelegate::new(Paint::default(), None).coverage(&m), None);
}

#[test]
fn elides_only_for_destination_blend() {
    let mut paint = Paint::default();
    assert!(!PaintPassDelegate::new(paint.clone(), None).can_elide());
    paint.blend_mode = BlendMode::Destination;
    assert!(PaintPassDelegate::new(paint, None).can_elide());
}

#[test]
fn collapse_requires_plain_opaque_paint() {
    assert!(PaintPassDelegate::new(Paint::default(), None).can_collapse_into_parent_pass());

    let translucent = Paint::fill(Color::BLACK.with_alpha(0.5));
    assert!(!PaintPassDelegate::new(translucent, None).can_collapse_into_parent_pass());

    let multiply = Paint {
        blend_mode: BlendMode::Multiply,
        ..Paint::default()
    };
    assert!(!PaintPassDelegate::new(multiply, None).can_collapse_into_parent_pass());

    let inverted = Paint {
        invert_colors: true,
        ..Paint::default()
    };
    assert!(!PaintPassDelegate::new(inverted, None).can_collapse_into_parent_pass());
}

#[test]
fn subpass_target_carries_paint_alpha_and_filters() {
    let plain = PaintPassDelegate::new(Paint::fill(Color::WHITE.with_alpha(0.5)), None);
    match plain.create_contents_for_subpass_target(target(), &Matrix::IDENTITY) {
        Contents::Texture(t) => {
            assert_eq!(t.opacity, 0.5);
            assert_eq!(t.destination, Rect::new(0.0, 0.0, 4.0, 2.0));
        }
        other => panic!("unexpected {other:?}"),
    }

    let filtered = PaintPassDelegate::new(
        Paint {
            color_filter: Some(matrix_color_filter(ColorMatrix::INVERT)),
            ..Paint::default()
        },
        None,
    );
    let c = filtered.create_contents_for_subpass_target(target(), &Matrix::IDENTITY);
    let snap = ContentsSnapshot::of(&c);
    assert_eq!(snap.chain(), vec!["color_matrix", "texture"]);
    assert!(snap.absorb_opacity);
}
