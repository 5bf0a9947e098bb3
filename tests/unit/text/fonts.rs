use super::*;

const TEST_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/DejaVuSans.ttf");

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("memegen_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn empty_book_resolves_nothing() {
    let book = FontBook::new();
    assert!(book.is_empty());
    assert!(book.resolve(FontFamily::Impact).is_none());
}

#[test]
fn missing_family_resolves_to_first_registered() {
    let book = FontBook::new()
        .with_font(FontFamily::Arial, FontSource::from_bytes(vec![1u8], "arial"))
        .with_font(
            FontFamily::TimesNewRoman,
            FontSource::from_bytes(vec![2u8], "times"),
        );

    let r = book.resolve(FontFamily::Arial).unwrap();
    assert!(!r.is_fallback);
    assert_eq!(r.source.origin(), "arial");

    let r = book.resolve(FontFamily::Impact).unwrap();
    assert!(r.is_fallback);
    assert_eq!(r.source.origin(), "arial");
}

#[test]
fn explicit_fallback_wins() {
    let book = FontBook::new()
        .with_font(FontFamily::Arial, FontSource::from_bytes(vec![1u8], "arial"))
        .with_fallback(FontSource::from_bytes(vec![9u8], "fallback"));
    let r = book.resolve(FontFamily::Helvetica).unwrap();
    assert!(r.is_fallback);
    assert_eq!(r.source.bytes(), &[9u8]);
}

#[test]
fn from_dir_matches_file_stems_to_families() {
    let dir = temp_dir("font_dir_match");
    let bytes = std::fs::read(TEST_FONT).unwrap();
    std::fs::write(dir.join("Impact.ttf"), &bytes).unwrap();
    std::fs::write(dir.join("comic_sans_ms.TTF"), &bytes).unwrap();
    std::fs::write(dir.join("Times-New-Roman.otf"), &bytes).unwrap();
    std::fs::write(dir.join("DejaVuSans.ttf"), &bytes).unwrap();
    std::fs::write(dir.join("notes.txt"), b"not a font").unwrap();

    let book = FontBook::from_dir(&dir).unwrap();
    let families: Vec<_> = book.families().collect();
    assert_eq!(
        families,
        vec![
            FontFamily::Impact,
            FontFamily::ComicSansMs,
            FontFamily::TimesNewRoman
        ]
    );
    assert!(!book.contains(FontFamily::Arial));
    let r = book.resolve(FontFamily::Arial).unwrap();
    assert!(r.is_fallback);
    assert!(r.source.origin().ends_with("Impact.ttf"));
}

#[test]
fn from_dir_with_only_unmatched_files_still_has_fallback() {
    let dir = temp_dir("font_dir_spare");
    std::fs::write(dir.join("b.ttf"), [2u8]).unwrap();
    std::fs::write(dir.join("a.ttf"), [1u8]).unwrap();

    let book = FontBook::from_dir(&dir).unwrap();
    assert!(!book.is_empty());
    assert_eq!(book.families().count(), 0);
    let r = book.resolve(FontFamily::Impact).unwrap();
    assert!(r.is_fallback);
    assert_eq!(r.source.bytes(), &[1u8]);
}

#[test]
fn from_dir_missing_dir_is_font_error() {
    let err = FontBook::from_dir("/definitely/not/a/font/dir").unwrap_err();
    assert!(err.to_string().contains("font error:"));
}
