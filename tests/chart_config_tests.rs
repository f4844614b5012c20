use chart_error_bars::ChartError;
use chart_error_bars::api::{
    ChartConfig, ChartEngine, ChartEngineConfig, DatasetConfig, ErrorBarStyleConfig,
    ScriptContext, Scriptable,
};
use chart_error_bars::core::{
    Axis, DataValue, ErrorBarDatum, RangeValue, ScaleKind, StyleOption, Viewport,
};
use chart_error_bars::elements::ErrorBarElement;
use chart_error_bars::render::{Color, NullRenderer};

const BAR_CONFIG: &str = r##"{
    "viewport": { "width": 640, "height": 480 },
    "chart": {
        "type": "barWithErrorBars",
        "data": {
            "labels": ["Q1", "Q2", "Q3"],
            "datasets": [{
                "label": "Revenue",
                "backgroundColor": "#4e79a7",
                "errorBarColor": "#ff0000",
                "errorBarWhiskerSize": [10, 20],
                "data": [
                    { "y": 4, "yMin": 1, "yMax": 6 },
                    { "y": 5, "yMin": [4, 3], "yMax": [6, 8] },
                    null
                ]
            }]
        },
        "options": {
            "errorBarLineWidth": { "v": [1, 3] },
            "scales": { "y": { "min": -2, "max": 10 } }
        }
    }
}"##;

#[test]
fn config_json_round_trip_preserves_everything() {
    let config = ChartEngineConfig::from_json_str(BAR_CONFIG).expect("parse");
    let dataset = &config.chart.data.datasets[0];

    assert_eq!(dataset.label.as_deref(), Some("Revenue"));
    assert_eq!(dataset.data.len(), 3);
    assert_eq!(dataset.data[2], None);
    assert_eq!(
        dataset.data[1],
        Some(DataValue::Point(ErrorBarDatum::y(
            5.0,
            vec![4.0, 3.0],
            vec![6.0, 8.0]
        )))
    );
    assert_eq!(
        dataset.error_bar.error_bar_color,
        Some(Scriptable::from(Color::from_rgb8(255, 0, 0)))
    );
    assert_eq!(
        config.chart.options.error_bar.error_bar_line_width,
        Some(Scriptable::Value(StyleOption::cycling(vec![1.0, 3.0])))
    );

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartEngineConfig::from_json_str(&json).expect("parse back");
    assert_eq!(restored, config);
}

#[test]
fn json_config_drives_the_engine() {
    let config = ChartEngineConfig::from_json_str(BAR_CONFIG).expect("parse");
    let engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");

    assert_eq!(engine.scale_domain(Axis::Y), Some((-2.0, 10.0)));
    let elements = engine.elements(0).expect("dataset");
    let ErrorBarElement::Bar(first) = &elements[0] else {
        panic!("expected a bar");
    };
    // dataset option resolved per data index, chart option cycled per stacked bar
    assert_eq!(first.error_bar.whisker_size, StyleOption::Fixed(10.0));
    assert_eq!(first.error_bar.line_width, StyleOption::cycling(vec![1.0, 3.0]));
    assert_eq!(first.error_bar.color, StyleOption::Fixed(Color::from_rgb8(255, 0, 0)));
    assert_eq!(first.background_color, Color::parse_css("#4e79a7").expect("color"));

    let ErrorBarElement::Bar(second) = &elements[1] else {
        panic!("expected a bar");
    };
    assert_eq!(second.error_bar.whisker_size, StyleOption::Fixed(20.0));
    assert!(matches!(second.props.y_min, Some(RangeValue::Multi(ref values)) if values.len() == 2));
    assert!(elements[2].skip());
}

#[test]
fn scale_type_override_switches_to_logarithmic() {
    let json = r#"{
        "viewport": { "width": 300, "height": 200 },
        "chart": {
            "type": "scatterWithErrorBars",
            "data": { "datasets": [{ "data": [
                { "x": 1, "y": 10, "yMin": 5, "yMax": 100 },
                { "x": 2, "y": 1000 }
            ] }] },
            "options": { "scales": { "y": { "type": "logarithmic" } } }
        }
    }"#;
    let config = ChartEngineConfig::from_json_str(json).expect("parse");
    assert_eq!(
        config.chart.options.scales.y.and_then(|scale| scale.kind),
        Some(ScaleKind::Logarithmic)
    );

    let engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    assert_eq!(
        engine.scales().y.as_ref().map(|scale| scale.kind()),
        Some(ScaleKind::Logarithmic)
    );
    assert_eq!(engine.scale_domain(Axis::Y), Some((5.0, 1000.0)));
}

#[test]
fn malformed_json_reports_invalid_data() {
    let err = ChartEngineConfig::from_json_str("{ \"viewport\": 1 }").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(message) if message.starts_with("failed to parse config")));
}

#[test]
fn scripted_options_cannot_be_persisted() {
    let dataset = DatasetConfig::new([1.0]).with_error_bar(
        ErrorBarStyleConfig::default().with_color(Scriptable::script(|ctx: &ScriptContext<'_>| {
            let shade = if ctx.data_index % 2 == 0 { 0.0 } else { 1.0 };
            StyleOption::Fixed(Color::rgb(shade, shade, shade))
        })),
    );
    let config = ChartEngineConfig::new(
        Viewport::new(100, 100),
        ChartConfig::new("barWithErrorBars").with_dataset(dataset),
    );

    let err = config.to_json_pretty().expect_err("scripts are not data");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    let ErrorBarElement::Bar(bar) = &engine.elements(0).expect("dataset")[0] else {
        panic!("expected a bar");
    };
    assert_eq!(bar.error_bar.color, StyleOption::Fixed(Color::rgb(0.0, 0.0, 0.0)));
}
