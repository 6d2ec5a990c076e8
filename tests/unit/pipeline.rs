use super::*;
use crate::fonts::cache::FontCache;

const SCENARIO: &str = "Unhinged mental health\nhacks I learned in therapy\n(that actually work)";

fn renderer() -> CaptionRenderer {
    CaptionRenderer::new(
        StyleConfig::default(),
        FontResolver::with_font_dir(
            Path::new("/nonexistent/captionburn/fonts"),
            Arc::new(FontCache::new()),
        ),
    )
    .unwrap()
}

fn opts(position: PositionMode, supersample: u32) -> BurnOptions {
    BurnOptions {
        position,
        supersample,
        ..BurnOptions::default()
    }
}

#[test]
fn default_options_match_house_style() {
    let o = BurnOptions::default();
    assert_eq!(o.position, PositionMode::Upper);
    assert_eq!(o.supersample, 2);
    assert_eq!(o.background, Color::BLACK);
}

#[test]
fn blank_captions_have_no_layout() {
    let r = renderer();
    for caption in ["", "   ", "\n\t"] {
        assert!(
            r.layout(1080, 1920, caption, &BurnOptions::default())
                .unwrap()
                .is_none()
        );
    }
}

#[test]
fn scenario_layout_at_native_resolution() {
    let layout = renderer()
        .layout(1080, 1920, SCENARIO, &opts(PositionMode::Upper, 1))
        .unwrap()
        .unwrap();

    assert_eq!(layout.font_size, 55);
    assert_eq!(layout.canvas, CanvasSize::new(1080, 1920).unwrap());
    assert_eq!(layout.plan.start_y, 346);
    assert_eq!(layout.plan.line_height, 58);
    assert_eq!(
        layout.plan.total_height,
        layout.plan.lines.len() as u64 * 58
    );

    let words: Vec<_> = layout
        .plan
        .lines
        .iter()
        .flat_map(|l| l.text.split(' '))
        .collect();
    assert_eq!(words, SCENARIO.split_whitespace().collect::<Vec<_>>());

    for line in &layout.plan.lines {
        assert_eq!(line.x, (1080 - i64::from(line.width)).div_euclid(2));
    }
}

#[test]
fn supersampling_scales_font_canvas_and_band() {
    let layout = renderer()
        .layout(1080, 1920, SCENARIO, &opts(PositionMode::Upper, 2))
        .unwrap()
        .unwrap();

    assert_eq!(layout.font_size, 110);
    assert_eq!(layout.canvas, CanvasSize::new(2160, 3840).unwrap());
    // round(3840 * 0.18) = round(691.2)
    assert_eq!(layout.plan.start_y, 691);
    // round(110 * 1.06) = round(116.6)
    assert_eq!(layout.plan.line_height, 117);
}

#[test]
fn narrow_images_wrap_into_several_lines() {
    // 100 px wide: max line width floor(100 * 0.88) = 88 px, 14 bitmap chars.
    let layout = renderer()
        .layout(100, 400, SCENARIO, &opts(PositionMode::Center, 1))
        .unwrap()
        .unwrap();

    assert!(layout.plan.lines.len() > 1);
    for line in &layout.plan.lines {
        assert!(line.width <= 88 || !line.text.contains(' '), "{line:?}");
    }
    // font size clamps to 38, line height round(38 * 1.06) = 40
    assert_eq!(layout.plan.line_height, 40);
    let total = layout.plan.total_height as i64;
    assert_eq!(layout.plan.start_y, (400 - total).div_euclid(2));
}

#[test]
fn bottom_mode_ends_above_margin() {
    let layout = renderer()
        .layout(828, 1792, SCENARIO, &opts(PositionMode::Bottom, 1))
        .unwrap()
        .unwrap();
    assert_eq!(layout.font_size, 42);
    let margin = (1792.0f64 * 0.12).round() as i64;
    assert_eq!(
        layout.plan.start_y + layout.plan.total_height as i64,
        1792 - margin
    );
}

#[test]
fn zero_supersample_is_rejected() {
    let err = renderer()
        .layout(100, 100, "hi", &opts(PositionMode::Upper, 0))
        .unwrap_err();
    assert!(matches!(err, CaptionError::Validation(_)));
}

#[test]
fn render_returns_blank_caption_input_unchanged() {
    let img = DynamicImage::ImageRgba8(image::RgbaImage::from_fn(7, 5, |x, y| {
        image::Rgba([x as u8, y as u8, 3, 100])
    }));
    let r = renderer();
    for caption in ["", "   "] {
        let out = r.render(&img, caption, &BurnOptions::default()).unwrap();
        assert_eq!(out, img);
    }
}

#[test]
fn render_produces_opaque_image_of_input_size() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 90, image::Rgb([80, 80, 80])));
    let out = renderer()
        .render(&img, "HI", &opts(PositionMode::Center, 2))
        .unwrap();

    assert_eq!((out.width(), out.height()), (120, 90));
    let DynamicImage::ImageRgb8(rgb) = &out else {
        panic!("expected rgb8 output, got {:?}", out.color());
    };
    assert!(rgb.pixels().any(|p| p.0 != [80, 80, 80]));
    assert_eq!(rgb.get_pixel(0, 0).0, [80, 80, 80]);
}

#[test]
fn preview_rejects_empty_canvas() {
    assert!(renderer().preview("hi", 0, 10, PREVIEW_BACKGROUND).is_err());
}

#[test]
fn supersample_past_rasterizer_limit_fails_before_allocating() {
    let r = renderer();
    let ok = r
        .layout(4000, 10, "HI", &opts(PositionMode::Upper, 16))
        .unwrap()
        .unwrap();
    assert_eq!(ok.canvas.width, 64_000);

    let err = r
        .layout(4000, 10, "HI", &opts(PositionMode::Upper, 20))
        .unwrap_err();
    assert!(matches!(err, CaptionError::Render(_)), "{err}");

    let img = DynamicImage::ImageRgb8(RgbImage::new(4000, 10));
    let err = r
        .render(&img, "HI", &opts(PositionMode::Upper, 20))
        .unwrap_err();
    assert!(matches!(err, CaptionError::Render(_)), "{err}");
}
