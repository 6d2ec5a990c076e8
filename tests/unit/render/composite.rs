use super::*;

#[test]
fn over_blends_premultiplied() {
    assert_eq!(over([10, 20, 30, 255], [0, 0, 0, 0]), [10, 20, 30, 255]);
    assert_eq!(over([10, 20, 30, 255], [1, 2, 3, 255]), [1, 2, 3, 255]);
    // 50% white over opaque black.
    assert_eq!(over([0, 0, 0, 255], [128, 128, 128, 128]), [128, 128, 128, 255]);
}

#[test]
fn over_in_place_checks_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(over_in_place(&mut dst[..7], &[0u8; 7]).is_err());

    let src = [255, 255, 255, 255, 0, 0, 0, 0];
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, vec![255, 255, 255, 255, 0, 0, 0, 0]);
}

#[test]
fn premultiply_zeroes_transparent_color() {
    let mut px = vec![200, 100, 50, 0, 200, 100, 50, 255, 255, 255, 255, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 200, 100, 50, 255, 128, 128, 128, 128]);
}

#[test]
fn to_premul_converts_rgb_to_opaque() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 1, image::Rgb([9, 8, 7])));
    let premul = to_premul_rgba8(&img);
    assert_eq!(premul.dimensions(), (2, 1));
    assert_eq!(premul.as_raw().as_slice(), &[9, 8, 7, 255, 9, 8, 7, 255]);
}

#[test]
fn resample_same_size_is_identity() {
    let img = RgbaImage::from_fn(5, 3, |x, y| image::Rgba([x as u8 * 40, y as u8 * 60, 7, 255]));
    let out = resample_premul(&img, CanvasSize::new(5, 3).unwrap());
    assert_eq!(out, img);
}

#[test]
fn resample_solid_color_stays_solid() {
    let img = RgbaImage::from_pixel(16, 12, image::Rgba([80, 80, 80, 255]));
    let down = resample_premul(&img, CanvasSize::new(8, 6).unwrap());
    assert_eq!(down.dimensions(), (8, 6));
    for px in down.pixels() {
        for c in 0..3 {
            assert!(px[c].abs_diff(80) <= 1, "{px:?}");
        }
        assert!(px[3] >= 254);
    }
}

#[test]
fn flatten_uses_background_under_transparency() {
    let mut img = RgbaImage::new(3, 1);
    img.put_pixel(0, 0, image::Rgba([0, 0, 0, 0]));
    img.put_pixel(1, 0, image::Rgba([255, 255, 255, 255]));
    img.put_pixel(2, 0, image::Rgba([64, 0, 0, 128]));

    let out = flatten_premul(&img, Color::rgb(0, 0, 200));
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 200]);
    assert_eq!(out.get_pixel(1, 0).0, [255, 255, 255]);
    // 64 + 0, 0 + 0, 0 + 200 * 127 / 255
    assert_eq!(out.get_pixel(2, 0).0, [64, 0, 100]);
}

#[test]
fn to_premul_rounds_half_alpha_to_nearest() {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, image::Rgba([255, 128, 0, 128])));
    assert_eq!(to_premul_rgba8(&img).as_raw().as_slice(), &[128, 64, 0, 128]);
}
