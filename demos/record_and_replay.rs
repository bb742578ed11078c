use wavyte_canvas::render_graph::filters::blur_image_filter;
use wavyte_canvas::{
    BlurStyle, Canvas, CanvasConfig, ClipOperation, Color, MaskBlurDescriptor, Paint, Point,
    Rect, TileMode, Vec3,
};

fn parse_config() -> anyhow::Result<CanvasConfig> {
    match std::env::args().nth(1) {
        Some(path) => Ok(CanvasConfig::from_path(path)?),
        None => Ok(CanvasConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = parse_config()?;

    // a reusable badge: soft shadow under a rounded card
    let mut canvas = Canvas::with_config(config);
    let shadow = Paint {
        mask_blur_descriptor: Some(MaskBlurDescriptor::new(BlurStyle::Normal, 6.0)?),
        ..Paint::fill(Color::BLACK.with_alpha(0.4))
    };
    canvas.draw_rrect(Rect::new(4.0, 6.0, 124.0, 66.0), 12.0, &shadow);
    canvas.draw_rrect(
        Rect::new(0.0, 0.0, 120.0, 60.0),
        12.0,
        &Paint::fill(Color::from_rgba8(0x2b, 0x6c, 0xb0, 0xff)),
    );
    let badge = canvas.end_recording_as_picture();

    // a scene that stamps the badge inside a clipped, blurred-backdrop layer
    canvas.draw_paint(&Paint::fill(Color::WHITE));
    canvas.save_layer(
        &Paint::fill(Color::WHITE.with_alpha(0.8)),
        Some(Rect::new(0.0, 0.0, 400.0, 300.0)),
        Some(blur_image_filter(8.0, 8.0, TileMode::Clamp)),
    );
    canvas.clip_rect(Rect::new(20.0, 20.0, 380.0, 280.0), ClipOperation::Intersect);
    for (i, y) in [40.0, 120.0, 200.0].into_iter().enumerate() {
        canvas.save();
        canvas.translate(Vec3::new(40.0 + 60.0 * i as f64, y, 0.0));
        canvas.draw_picture(&badge);
        canvas.restore();
    }
    canvas.draw_circle(Point::new(320.0, 60.0), 18.0, &Paint::stroke(Color::RED, 3.0));
    canvas.restore();

    let scene = canvas.end_recording_as_picture();
    println!("{}", scene.snapshot_json()?);
    Ok(())
}
