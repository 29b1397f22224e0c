use pretty_assertions::assert_eq;
use shapefit::{shape_text, HeuristicMetrics, LayoutResult, Options, SizeInput, ELLIPSIS};

fn fit(text: &str, options: &Options) -> LayoutResult {
    shape_text(text, options, HeuristicMetrics::default()).expect("options are valid")
}

fn joined(result: &LayoutResult) -> String {
    result.lines.iter().map(|line| line.text.as_str()).collect()
}

#[test]
fn short_text_fits_untouched() {
    let result = fit("Hi", &Options::new(250.0));

    assert_eq!(result.lines.len(), 1);
    assert_eq!(result.lines[0].text, "Hi");
    assert!(!result.meta.modified);
    assert!(!result.meta.overflowed);
    assert_eq!(result.meta.font_size, 16.0);
    assert_eq!(result.meta.text.leftover, "");
}

#[test]
fn font_shrinks_until_the_text_fits() {
    let text = "The quick brown fox jumps over the lazy dog";
    let result = fit(text, Options::new(100.0).font_size(SizeInput::shrinking(40.0, 10.0)));

    assert!(result.meta.modified);
    assert!(!result.meta.overflowed);
    assert!(result.meta.font_size >= 10.0 && result.meta.font_size < 40.0);
    assert_eq!(result.meta.font_size.fract(), 0.0);
    assert!(result.lines.len() > 1);
    assert_eq!(joined(&result), text);
    assert_eq!(result.meta.text.leftover, "");
}

#[test]
fn long_word_is_cut_with_an_ellipsis() {
    let word = "Pneumonoultramicroscopicsilicovolcanoconiosis";
    let result = fit(word, Options::new(60.0).ellipsis(ELLIPSIS));

    assert!(result.meta.modified);
    assert!(result.meta.overflowed);
    let last = result.lines.last().expect("something fits");
    assert!(last.text.ends_with(ELLIPSIS), "{last:?}");
    assert!(!result.meta.text.leftover.is_empty());

    let shown = joined(&result);
    let shown = shown.trim_end_matches(ELLIPSIS);
    assert_eq!(format!("{shown}{}", result.meta.text.leftover), word);
}

#[test]
fn clipped_text_leaves_a_suffix_over() {
    let text = lipsum::lipsum(120);
    let result = fit(
        &text,
        Options::new(100.0)
            .font_size(SizeInput::shrinking(16.0, 12.0))
            .line_height(SizeInput::shrinking(1.2, 1.0))
            .ellipsis(false),
    );

    assert!(result.meta.modified);
    assert!(result.meta.overflowed);
    assert_eq!(result.meta.font_size, 12.0);
    assert_eq!(result.meta.line_height, 1.0);

    let leftover = &result.meta.text.leftover;
    assert!(!leftover.is_empty());
    assert!(text.ends_with(leftover.as_str()));
    assert!(result.lines.iter().all(|line| !line.text.contains(ELLIPSIS)));

    let shown = joined(&result);
    assert!(!shown.is_empty());
    assert!(text.starts_with(&shown));
    assert!(shown.len() + leftover.len() <= text.len());
}

#[test]
fn empty_text_gives_an_empty_result() {
    let result = fit(
        "",
        Options::new(10.0).font_size(SizeInput::shrinking(40.0, 2.0)).ellipsis(true),
    );

    assert!(result.lines.is_empty());
    assert!(!result.meta.modified);
    assert!(!result.meta.overflowed);
    assert_eq!(result.meta.font_size, 40.0);
}

#[test]
fn lines_are_ordered_top_to_bottom() {
    for words in [5, 20, 60, 200] {
        let text = lipsum::lipsum(words);
        let result = fit(&text, Options::new(180.0).ellipsis(true));
        for pair in result.lines.windows(2) {
            assert!(pair[0].y < pair[1].y, "{:?} before {:?}", pair[0], pair[1]);
            assert!(pair[0].y + pair[0].height <= pair[1].y);
        }
    }
}

#[test]
fn layout_is_deterministic() {
    let text = lipsum::lipsum(80);
    let mut options = Options::new(150.0);
    options
        .font_size(SizeInput::shrinking(20.0, 8.0))
        .line_height(SizeInput::shrinking(1.5, 1.1))
        .ellipsis(true);

    assert_eq!(fit(&text, &options), fit(&text, &options));
}

#[test]
fn shrinking_stays_within_the_range() {
    let text = lipsum::lipsum(60);
    for (value, min) in [(30.0, 20.0), (24.0, 6.0), (12.0, 11.0)] {
        let result = fit(&text, Options::new(200.0).font_size(SizeInput::shrinking(value, min)));
        assert!(result.meta.font_size >= min && result.meta.font_size <= value);
        assert!(result.meta.line_height == 1.2);
    }

    // no floor: nothing shrinks, the text is cut instead
    let result = fit(&text, Options::new(100.0).font_size(30.0_f32));
    assert_eq!(result.meta.font_size, 30.0);
    assert_eq!(result.meta.line_height, 1.2);
    assert!(result.meta.modified);
}

#[test]
fn hyphenated_words_keep_their_hyphens() {
    let text = "a state-of-the-art well-known self-contained example";
    let result = fit(text, &Options::new(200.0));
    assert_eq!(joined(&result), text);
    assert_eq!(result.meta.text.full, text);
}

#[test]
fn options_from_json() {
    let options = Options::from_json(concat!(
        r#"{"size": 120, "fontSize": {"value": 24, "min": 10}, "ellipsis": "...", "#,
        r#""origin": "center", "verticalAlign": "top"}"#,
    ))
    .expect("parses");
    let result = fit(&lipsum::lipsum(40), &options);

    assert!(result.meta.modified);
    let json = serde_json::to_value(&result).expect("serializes");
    assert_eq!(json["meta"]["origin"], "center");
    assert_eq!(json["lines"].as_array().map(Vec::len), Some(result.lines.len()));
}
