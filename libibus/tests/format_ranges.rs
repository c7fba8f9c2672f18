//! Merging attribute formats into renderable ranges.
//!
//! Covers:
//! - Exact-range grouping with attribute order preserved
//! - Invalid attributes staying out of every merge group
//! - Overlapping but non-identical ranges never merging

use libibus::{
    AttrUnderline, Attribute, AttributeList, AttributeType, Rgb, Text, TextFormat, UnderlineStyle,
};

fn list(attrs: Vec<Attribute>) -> AttributeList {
    AttributeList::from_attributes(attrs)
}

#[test]
fn test_underline_and_foreground_share_one_format() {
    let ranges = list(vec![
        Attribute::new(AttributeType::Underline, AttrUnderline::Single.as_raw(), 0, 5),
        Attribute::new(AttributeType::Foreground, 0xFF0000, 0, 5),
        Attribute::new(AttributeType::Background, 0x00FF00, 10, 15),
    ])
    .format_ranges();

    assert_eq!(ranges.len(), 3);
    let combined = TextFormat {
        underline_style: Some(UnderlineStyle::Single),
        foreground: Some(Rgb::RED),
        ..TextFormat::default()
    };
    assert_eq!(ranges[0].format, combined);
    assert_eq!(ranges[1].format, combined);
    assert_eq!(
        ranges[2].format,
        TextFormat {
            background: Some(Rgb::new(0, 0xFF, 0)),
            ..TextFormat::default()
        }
    );
}

#[test]
fn test_output_positions_follow_input_order() {
    let spans = [(7, 9), (0, 3), (3, 7), (0, 3), (12, 20), (7, 9), (1, 1)];
    let kinds = [
        AttributeType::Underline,
        AttributeType::Foreground,
        AttributeType::Invalid,
        AttributeType::Background,
    ];

    // Several rotations so grouping differs between runs.
    for shift in 0..spans.len() {
        let attrs: Vec<Attribute> = spans
            .iter()
            .cycle()
            .skip(shift)
            .take(spans.len())
            .enumerate()
            .map(|(i, &(start, end))| Attribute::new(kinds[i % kinds.len()], 1, start, end))
            .collect();
        let ranges = list(attrs.clone()).format_ranges();

        let expected: Vec<(u32, u32)> = attrs.iter().map(|a| (a.start, a.end - a.start)).collect();
        let actual: Vec<(u32, u32)> = ranges.iter().map(|r| (r.start, r.length)).collect();
        assert_eq!(actual, expected, "rotation {shift}");
    }
}

#[test]
fn test_invalid_attribute_does_not_join_merge_group() {
    let foreground = Attribute::new(AttributeType::Foreground, 0x123456, 0, 5);
    let alone = list(vec![foreground.clone()]).format_ranges();
    let with_invalid = list(vec![
        Attribute::new(AttributeType::Invalid, 0xFFFFFF, 0, 5),
        foreground,
    ])
    .format_ranges();

    assert!(with_invalid[0].format.is_empty());
    assert_eq!(with_invalid[1].format, alone[0].format);
}

#[test]
fn test_unknown_type_contributes_nothing() {
    let mut odd = Attribute::new(AttributeType::Invalid, 0, 2, 4);
    odd.kind = AttributeType::from_raw(9);
    let ranges = list(vec![odd, Attribute::underline(AttrUnderline::Double, 2, 4)]).format_ranges();
    assert!(ranges[0].format.is_empty());
    assert_eq!(ranges[1].format.underline_style, Some(UnderlineStyle::Dash));
}

/// Grouping uses the exact `[start, end)` pair. Two attributes whose ranges
/// overlap without being identical keep separate formats.
#[test]
fn test_overlapping_ranges_are_not_merged() {
    let ranges = list(vec![
        Attribute::underline(AttrUnderline::Single, 0, 5),
        Attribute::foreground(Rgb::RED, 2, 5),
        Attribute::background(Rgb::new(0, 0, 0xFF), 0, 6),
    ])
    .format_ranges();

    assert_eq!(ranges[0].format.underline_style, Some(UnderlineStyle::Single));
    assert!(ranges[0].format.foreground.is_none());
    assert!(ranges[0].format.background.is_none());

    assert_eq!(ranges[1].format.foreground, Some(Rgb::RED));
    assert!(ranges[1].format.underline_style.is_none());

    assert_eq!(ranges[2].format.background, Some(Rgb::new(0, 0, 0xFF)));
    assert!(ranges[2].format.underline_style.is_none());
}

#[test]
fn test_later_attribute_overrides_same_property() {
    let ranges = list(vec![
        Attribute::foreground(Rgb::new(1, 2, 3), 0, 4),
        Attribute::foreground(Rgb::new(4, 5, 6), 0, 4),
    ])
    .format_ranges();
    assert_eq!(ranges[0].format.foreground, Some(Rgb::new(4, 5, 6)));
    assert_eq!(ranges[1].format, ranges[0].format);
}

#[test]
fn test_error_underline_keeps_red_colour_after_merge() {
    let ranges = list(vec![
        Attribute::underline(AttrUnderline::Error, 0, 3),
        Attribute::background(Rgb::new(0xEE, 0xEE, 0xEE), 0, 3),
    ])
    .format_ranges();
    assert_eq!(ranges[0].format.underline_style, Some(UnderlineStyle::Wave));
    assert_eq!(ranges[0].format.underline_color, Some(Rgb::RED));
    assert_eq!(ranges[0].format.background, Some(Rgb::new(0xEE, 0xEE, 0xEE)));
}

#[test]
fn test_text_delegates_to_its_attributes() {
    let mut attrs = AttributeList::new();
    attrs.push(Attribute::underline(AttrUnderline::Single, 0, 2));
    attrs.push(Attribute::foreground(Rgb::RED, 0, 2));
    let text = Text::with_attributes("你好", attrs.clone());
    assert_eq!(text.format_ranges(), attrs.format_ranges());
}
