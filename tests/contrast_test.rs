//! Integration tests for badge text color resolution.

use rstest::rstest;

use deskview::domain::{contrasting_text_color, DomainError, HexColor};

#[rstest]
#[case("#808080", "#000000")]
#[case("#000000", "#ffffff")]
#[case("#FFFFFF", "#000000")]
#[case("#ffd700", "#000000")]
#[case("#8b0000", "#ffffff")]
#[case("#00ff00", "#000000")]
#[case("#0000ff", "#ffffff")]
#[case("1e90ff", "#ffffff")]
#[case("#da3af8", "#ffffff")]
#[case("#da3af9", "#000000")]
fn given_background_when_resolving_then_readable_text_color(
    #[case] background: &str,
    #[case] expected: &str,
) {
    let text = contrasting_text_color(background).unwrap();
    assert_eq!(text.to_string(), expected);
}

#[rstest]
#[case("#zzz")]
#[case("")]
#[case("#")]
#[case("#12345")]
#[case("#1234567")]
#[case("##123456")]
#[case("#12345g")]
#[case("#ééé")]
fn given_malformed_color_when_resolving_then_parse_error(#[case] input: &str) {
    let err = contrasting_text_color(input).unwrap_err();

    assert!(err.is_parse_error());
    assert!(matches!(err, DomainError::MalformedColor { input: ref i, .. } if i == input));
}

#[test]
fn given_sampled_backgrounds_when_resolving_then_always_black_or_white() {
    for r in (0..=255u8).step_by(17) {
        for g in (0..=255u8).step_by(51) {
            for b in (0..=255u8).step_by(85) {
                let background = HexColor::new(r, g, b).to_string();
                let text = contrasting_text_color(&background).unwrap();
                assert!(
                    text == HexColor::BLACK || text == HexColor::WHITE,
                    "{background} resolved to {text}"
                );
            }
        }
    }
}

#[test]
fn given_mid_grays_when_resolving_then_split_at_half_luminance() {
    // gray luminance is value / 255
    assert!(HexColor::new(0x80, 0x80, 0x80).luminance() > 0.5);
    assert!(HexColor::new(0x7f, 0x7f, 0x7f).luminance() < 0.5);
    assert_eq!(
        HexColor::new(0x7f, 0x7f, 0x7f).contrasting_text(),
        HexColor::WHITE
    );
}

#[test]
fn given_hex_string_when_parsing_via_from_str_then_same_as_parse() {
    let parsed: HexColor = "#9D4EDD".parse().unwrap();
    assert_eq!(parsed, HexColor::new(157, 78, 221));
    assert_eq!(parsed.to_string(), "#9d4edd");
}
