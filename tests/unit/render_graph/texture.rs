use super::*;

#[test]
fn from_rgba8_validates_length() {
    assert!(Texture::from_rgba8(2, 2, vec![0; 16]).is_ok());
    let err = Texture::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(err.to_string().contains("expected 16"));
}

#[test]
fn from_rgba_image_premultiplies() {
    let img = image::RgbaImage::from_raw(1, 1, vec![255, 128, 0, 128]).unwrap();
    let tex = Texture::from_rgba_image(img);
    assert_eq!(tex.size(), Size::new(1.0, 1.0));
    assert_eq!(tex.pixels(), &[128, 64, 0, 128]);
}

#[test]
fn image_clones_share_texture() {
    let image = Image::new(Texture::from_rgba8(3, 1, vec![7; 12]).unwrap());
    let other = image.clone();
    assert!(Arc::ptr_eq(&image.texture(), &other.texture()));
    assert_eq!(other.size(), Size::new(3.0, 1.0));
}

#[test]
fn empty_texture_has_no_area() {
    let tex = Texture::empty();
    assert!(crate::foundation::core::size_is_empty(tex.size()));
}
