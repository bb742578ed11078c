use super::*;
use crate::foundation::math::Vec3;

#[test]
fn coverage_of_rect_follows_transform() {
    let g = Geometry::make_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    let m = Matrix::make_translation(Vec3::new(5.0, 5.0, 0.0));
    assert_eq!(g.coverage(&m), Some(Rect::new(5.0, 5.0, 15.0, 15.0)));
}

#[test]
fn cover_is_unbounded() {
    assert_eq!(Geometry::make_cover().coverage(&Matrix::IDENTITY), None);
}

#[test]
fn stroke_coverage_includes_half_width() {
    let g = Geometry::make_stroke_path(
        rect_path(Rect::new(0.0, 0.0, 10.0, 10.0)),
        4.0,
        4.0,
        Cap::Butt,
        Join::Miter,
    );
    assert_eq!(
        g.coverage(&Matrix::IDENTITY),
        Some(Rect::new(-2.0, -2.0, 12.0, 12.0))
    );
}

#[test]
fn circle_path_bounds() {
    let path = circle_path(Point::new(5.0, 5.0), 5.0);
    let b = path.bounding_box();
    assert!((b.x0 - 0.0).abs() < 1e-6 && (b.x1 - 10.0).abs() < 1e-6);
}

#[test]
fn vertices_bounds_and_flags() {
    let mut v = VerticesGeometry::new(
        VertexMode::Triangles,
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 1.0),
            Point::new(2.0, 6.0),
        ],
    );
    assert_eq!(v.bounds(), Some(Rect::new(0.0, 0.0, 4.0, 6.0)));
    assert!(!v.has_vertex_colors());
    v.colors = vec![Color::RED; 3];
    assert!(v.has_vertex_colors());
    assert!(VerticesGeometry::default().bounds().is_none());
}
