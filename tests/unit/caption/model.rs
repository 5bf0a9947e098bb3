use super::*;

#[test]
fn defaults_match_editor_initial_state() {
    let style = StyleConfig::default();
    assert_eq!(style.font_size.px(), 42);
    assert_eq!(style.font_family, FontFamily::Impact);
    assert_eq!(style.text_color.to_hex(), "#ffffff");
    assert_eq!(style.text_align, TextAlign::Center);

    let caption = CaptionText::default();
    assert!(caption.top_text.is_empty());
    assert!(caption.bottom_text.is_empty());
    assert!(caption.is_empty());
}

#[test]
fn font_size_bounds_are_inclusive() {
    assert!(FontSize::new(11).is_err());
    assert_eq!(FontSize::new(12).unwrap().px(), 12);
    assert_eq!(FontSize::new(72).unwrap().px(), 72);
    assert!(FontSize::new(73).is_err());
}

#[test]
fn font_family_parses_names_and_labels() {
    assert_eq!("Impact".parse::<FontFamily>().unwrap(), FontFamily::Impact);
    assert_eq!(
        "comic sans ms".parse::<FontFamily>().unwrap(),
        FontFamily::ComicSansMs
    );
    assert_eq!(
        "Comic Sans".parse::<FontFamily>().unwrap(),
        FontFamily::ComicSansMs
    );
    assert_eq!(
        "times-new-roman".parse::<FontFamily>().unwrap(),
        FontFamily::TimesNewRoman
    );
    assert!("Papyrus".parse::<FontFamily>().is_err());
}

#[test]
fn font_family_round_trips_through_name() {
    for f in FontFamily::ALL {
        assert_eq!(f.name().parse::<FontFamily>().unwrap(), f);
    }
}

#[test]
fn text_align_parses_case_insensitively() {
    assert_eq!("LEFT".parse::<TextAlign>().unwrap(), TextAlign::Left);
    assert_eq!(" right ".parse::<TextAlign>().unwrap(), TextAlign::Right);
    assert!("justify".parse::<TextAlign>().is_err());
}

#[test]
fn hex_color_long_and_short_forms() {
    assert_eq!(
        TextColor::from_hex("#FF8000").unwrap(),
        TextColor::rgb(255, 128, 0)
    );
    assert_eq!(
        TextColor::from_hex("00ff00").unwrap(),
        TextColor::rgb(0, 255, 0)
    );
    assert_eq!(
        TextColor::from_hex("#f0a").unwrap(),
        TextColor::rgb(0xff, 0x00, 0xaa)
    );
    assert_eq!(TextColor::rgb(255, 128, 0).to_hex(), "#ff8000");
}

#[test]
fn hex_color_rejects_malformed_input() {
    for bad in ["", "#", "#ff00", "#gg0000", "#+f0000", "#ff00000", "red"] {
        assert!(TextColor::from_hex(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn style_serializes_with_display_names() {
    let style = StyleConfig {
        font_family: FontFamily::ComicSansMs,
        text_color: TextColor::rgb(1, 2, 3),
        text_align: TextAlign::Right,
        font_size: FontSize::new(20).unwrap(),
    };
    let v = serde_json::to_value(style).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "fontSize": 20,
            "fontFamily": "Comic Sans MS",
            "textColor": "#010203",
            "textAlign": "right"
        })
    );
}
