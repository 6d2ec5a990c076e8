use super::*;
use crate::fonts::bitmap::BUILTIN;

#[test]
fn bitmap_shaper_measures_by_advance() {
    let mut shaper = TextShaper::new(Arc::new(FontHandle::Bitmap(&BUILTIN))).unwrap();
    assert_eq!(shaper.measure("hello"), 30);
    assert_eq!(shaper.measure(""), 0);
    assert!(shaper.font_data().is_none());

    let line = shaper.shape("hi there");
    assert_eq!(line.width, 48);
    assert!(line.glyphs.is_empty());
}

#[test]
fn width_px_rounds_up_and_ignores_garbage() {
    assert_eq!(width_px(10.0), 10);
    assert_eq!(width_px(10.01), 11);
    assert_eq!(width_px(-3.0), 0);
    assert_eq!(width_px(f32::NAN), 0);
}

fn fixture_shaper(size_px: u32) -> TextShaper {
    let path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSans-Bold.ttf");
    let font = ScalableFont::load(&path, size_px).unwrap();
    TextShaper::new(Arc::new(FontHandle::Scalable(font))).unwrap()
}

#[test]
fn scalable_shaper_positions_glyphs_along_the_line() {
    let mut shaper = fixture_shaper(100);
    assert!(shaper.font_data().is_some());

    let line = shaper.shape("Hello");
    assert_eq!(line.glyphs.len(), 5);
    assert!(line.glyphs.windows(2).all(|w| w[1].x > w[0].x));
    // Baseline sits below the top of the line box and is shared by the run.
    assert!(line.glyphs[0].y > 50.0 && line.glyphs[0].y < 110.0);
    assert!(line.glyphs.iter().all(|g| g.y == line.glyphs[0].y));
    assert_eq!(line.width, shaper.measure("Hello"));
}

#[test]
fn scalable_width_grows_with_text_and_size() {
    let mut small = fixture_shaper(50);
    let mut large = fixture_shaper(100);

    let w_small = small.measure("therapy");
    let w_large = large.measure("therapy");
    assert!(w_small > 0);
    assert!(w_large.abs_diff(w_small * 2) <= 2, "{w_small} vs {w_large}");
    assert!(large.measure("therapy work") > w_large);
    assert_eq!(large.measure(""), 0);
}
