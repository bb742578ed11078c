use super::*;
use crate::foundation::core::Color;
use crate::render_graph::contents::Contents;
use crate::render_graph::entity::Entity;
use crate::render_graph::geometry::Geometry;

#[test]
fn default_picture_is_empty() {
    let p = Picture::default();
    assert!(p.is_empty());
    assert_eq!(p.entity_count(), 0);
    assert!(p.snapshot().is_none());
    assert_eq!(p.snapshot_json().unwrap(), "null");
    assert!(p.into_pass().is_none());
}

#[test]
fn snapshot_json_lists_entities() {
    let mut pass = EntityPass::new();
    let root = pass.root();
    pass.add_entity(
        root,
        Entity::new(Contents::solid_color(Geometry::make_cover(), Color::GREEN)),
    );
    let p = Picture::new(pass);
    assert!(!p.is_empty());
    assert_eq!(p.entity_count(), 1);

    let json = p.snapshot_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["elements"][0]["type"], "entity");
    assert_eq!(v["elements"][0]["contents"]["kind"], "solid_color");
    assert_eq!(v["elements"][0]["contents"]["geometry"], "cover");
}
