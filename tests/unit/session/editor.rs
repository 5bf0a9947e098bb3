use std::io::Cursor;

use super::*;
use crate::input::validate::{CandidateFile, validate};
use crate::session::sink::InMemoryPreviewSink;
use crate::text::fonts::{FontBook, FontSource};

const TEST_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/DejaVuSans.ttf");

fn session() -> MemeSession<InMemoryPreviewSink> {
    let book = FontBook::new().with_font(
        FontFamily::Impact,
        FontSource::from_path(TEST_FONT).unwrap(),
    );
    MemeSession::new(Compositor::new(&book).unwrap(), InMemoryPreviewSink::new())
}

fn png_file(width: u32, height: u32, rgba: [u8; 4]) -> ValidatedFile {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    validate(&CandidateFile::new(buf, "image/png")).unwrap()
}

#[test]
fn starts_empty_with_defaults() {
    let s = session();
    assert!(s.base().is_none());
    assert!(s.preview().is_none());
    assert_eq!(s.caption(), &CaptionText::default());
    assert_eq!(s.style(), &StyleConfig::default());
}

#[test]
fn edits_before_loading_do_not_compose() {
    let mut s = session();
    s.set_top_text("early");
    assert_eq!(s.sink().updates(), 0);
    assert!(s.preview().is_none());
    assert!(s.export().is_err());
}

#[test]
fn loading_composes_once_with_current_caption() {
    let mut s = session();
    s.set_top_text("HELLO");
    s.load_image(&png_file(200, 120, [40, 40, 40, 255])).unwrap();
    assert_eq!(s.sink().updates(), 1);
    let preview = s.preview().unwrap();
    assert_eq!(preview.dimensions(), (200, 120));
    assert_ne!(preview, s.base().unwrap());
    assert_eq!(s.sink().last(), Some(preview));
}

#[test]
fn every_change_recomposes_from_base() {
    let mut s = session();
    s.load_image(&png_file(240, 160, [10, 80, 10, 255])).unwrap();
    let base = s.base().unwrap().clone();
    assert_eq!(s.preview(), Some(&base));

    s.set_top_text("ONE");
    let with_one = s.preview().unwrap().clone();
    s.set_top_text("");
    // Clearing the text restores the untouched base: text is never drawn over old text.
    assert_eq!(s.preview(), Some(&base));

    s.set_top_text("ONE");
    assert_eq!(s.preview(), Some(&with_one));
    assert_eq!(s.sink().updates(), 4);
}

#[test]
fn invalid_style_values_are_rejected_without_side_effects() {
    let mut s = session();
    s.load_image(&png_file(100, 100, [0, 0, 0, 255])).unwrap();
    let updates = s.sink().updates();

    assert!(s.set_font_size(80).is_err());
    assert!(s.set_text_color("not-a-color").is_err());
    assert_eq!(s.style(), &StyleConfig::default());
    assert_eq!(s.sink().updates(), updates);

    s.set_font_size(12).unwrap();
    s.set_text_color("#00ff00").unwrap();
    assert_eq!(s.style().font_size.px(), 12);
    assert_eq!(s.style().text_color, TextColor::rgb(0, 255, 0));
    assert_eq!(s.sink().updates(), updates + 2);
}

#[test]
fn failed_load_keeps_previous_image() {
    let mut s = session();
    s.load_image(&png_file(64, 64, [1, 2, 3, 255])).unwrap();
    s.set_bottom_text("KEEP");
    let preview = s.preview().unwrap().clone();

    let broken = validate(&CandidateFile::new(b"\x89PNG\r\n\x1a\nbroken".to_vec(), "image/png"))
        .unwrap();
    let err = s.load_image(&broken).unwrap_err();
    assert!(err.is_input_rejection());
    assert_eq!(s.preview(), Some(&preview));
    assert_eq!(s.base().unwrap().dimensions(), (64, 64));
}

#[test]
fn new_image_replaces_old_one() {
    let mut s = session();
    s.load_image(&png_file(64, 64, [1, 2, 3, 255])).unwrap();
    s.load_image(&png_file(32, 16, [4, 5, 6, 255])).unwrap();
    assert_eq!(s.base().unwrap().dimensions(), (32, 16));
    assert_eq!(s.preview().unwrap().dimensions(), (32, 16));
    assert_eq!(s.sink().clears(), 1);
}

#[test]
fn export_encodes_current_preview() {
    let mut s = session();
    s.load_image(&png_file(90, 70, [200, 200, 200, 255])).unwrap();
    s.apply_config(CaptionConfig {
        caption: CaptionText::new("A", "B"),
        style: StyleConfig {
            text_align: TextAlign::Left,
            ..StyleConfig::default()
        },
    });
    let e = s.export().unwrap();
    assert_eq!(e.file_name, "meme.png");
    let back = crate::codec::decode::decode(&e.bytes).unwrap();
    assert_eq!(&back, s.preview().unwrap());
}

#[test]
fn clear_drops_image_but_keeps_text() {
    let mut s = session();
    s.load_image(&png_file(20, 20, [0, 0, 0, 255])).unwrap();
    s.set_top_text("stay");
    s.clear();
    assert!(s.base().is_none());
    assert!(s.preview().is_none());
    assert!(s.sink().last().is_none());
    assert_eq!(s.caption().top_text, "stay");
}

#[test]
fn unit_sink_session_works() {
    let book = FontBook::new().with_font(
        FontFamily::Impact,
        FontSource::from_path(TEST_FONT).unwrap(),
    );
    let mut s = MemeSession::without_sink(Compositor::new(&book).unwrap());
    s.load_raster(Raster::filled(10, 10, [0, 0, 0, 255]).unwrap());
    assert!(s.preview().is_some());
}
