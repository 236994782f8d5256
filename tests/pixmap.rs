//! Pixel-level checks of the software canvas through full sessions.

use image::RgbaImage;
use pixwire::{ExitStatus, PixmapCanvas, run};

fn session(input: &str, width: u32, height: u32) -> PixmapCanvas {
    let mut canvas = PixmapCanvas::new(width, height).unwrap();
    let status = run(input.as_bytes(), &mut canvas).expect("session should not fail");
    assert_eq!(status, ExitStatus::Clean);
    canvas
}

fn pixel(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn presented_frame_contains_the_red_pixel() {
    let canvas = session("C ff0000P 00100020U", 64, 64);
    assert_eq!(pixel(canvas.front(), 16, 32), [0xff, 0, 0, 255]);
    assert_eq!(pixel(canvas.front(), 17, 32), [0, 0, 0, 255]);
}

#[test]
fn no_present_means_untouched_front_buffer() {
    let canvas = session("CffffffF0000000000400040", 64, 64);
    assert!(
        canvas
            .front()
            .pixels()
            .all(|px| px.0 == [0, 0, 0, 255]),
        "front buffer must stay cleared"
    );
    assert_eq!(pixel(canvas.back(), 0, 0), [0xff, 0xff, 0xff, 255]);
}

#[test]
fn consecutive_presents_are_idempotent() {
    let once = session("Cffffff F00010001 00020002 U", 16, 16);
    let twice = session("Cffffff F00010001 00020002 UU", 16, 16);
    assert_eq!(once.front().as_raw(), twice.front().as_raw());
    assert_eq!(twice.frames_presented(), 2);
}

#[test]
fn filled_rect_covers_exact_extent() {
    let canvas = session("C0000ffF0002000300040005U", 16, 16);
    for y in 0..16 {
        for x in 0..16 {
            let expect_blue = (2..6).contains(&x) && (3..8).contains(&y);
            let got = pixel(canvas.front(), x, y);
            if expect_blue {
                assert_eq!(got, [0, 0, 0xff, 255], "({x}, {y}) should be filled");
            } else {
                assert_eq!(got, [0, 0, 0, 255], "({x}, {y}) should be clear");
            }
        }
    }
}

#[test]
fn out_of_range_drawing_is_clipped_not_fatal() {
    let canvas = session("CffffffPffffffffLfff0fff0ffffffffRfff0fff000200020U", 8, 8);
    // Everything lands outside an 8x8 surface; the frame stays black.
    assert!(canvas.front().pixels().all(|px| px.0 == [0, 0, 0, 255]));
}

#[test]
fn line_spans_its_endpoints() {
    let canvas = session("C00ff00L0000000000050005U", 8, 8);
    for i in 0..=5 {
        assert_eq!(pixel(canvas.front(), i, i), [0, 0xff, 0, 255]);
    }
    assert_eq!(pixel(canvas.front(), 6, 6), [0, 0, 0, 255]);
}
