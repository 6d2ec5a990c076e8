use super::*;
use crate::fonts::bitmap::BUILTIN;

#[test]
fn bitmap_handle_reports_fixed_size() {
    let h = FontHandle::Bitmap(&BUILTIN);
    assert!(h.is_fallback());
    assert_eq!(h.size_px(), 8);
    assert_eq!(h.family(), "builtin");
    assert!(h.source_path().is_none());
}

#[test]
fn missing_file_is_a_font_load_error() {
    let err = ScalableFont::load(Path::new("/nonexistent/captionburn/font.ttf"), 42).unwrap_err();
    assert!(matches!(err, CaptionError::FontLoad { .. }));
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn garbage_bytes_are_a_font_load_error() {
    let err = ScalableFont::from_bytes(Path::new("mem.ttf"), b"not a font".to_vec(), 42)
        .unwrap_err();
    assert!(matches!(err, CaptionError::FontLoad { .. }));
}

#[test]
fn zero_size_is_rejected_before_reading() {
    let err = ScalableFont::load(Path::new("whatever.ttf"), 0).unwrap_err();
    assert!(err.to_string().contains("font size must be > 0"));
}
