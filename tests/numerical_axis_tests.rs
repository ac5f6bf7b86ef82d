use approx::{assert_abs_diff_eq, assert_relative_eq};
use chart_axis::api::NumericalAxisConfig;
use chart_axis::core::{
    AxisUpdateContext, ChartPoint, NumericalAxisKind, NumericalAxisModel, RangeExtendDirection,
    SeriesModel, ValueRange,
};

fn series_of(values: &[f64]) -> SeriesModel<ChartPoint> {
    SeriesModel::new(values.iter().map(|&value| ChartPoint::new(value)).collect())
}

fn laid_out(
    config: NumericalAxisConfig,
    values: &[f64],
) -> (NumericalAxisModel, AxisUpdateContext<ChartPoint>) {
    let mut axis = NumericalAxisModel::with_config(config).expect("valid config");
    let mut context = AxisUpdateContext::new(vec![series_of(values)]);
    axis.update(&mut context);
    axis.plot(&mut context);
    (axis, context)
}

#[test]
fn small_positive_data_gets_step_two_and_zero_anchor() {
    let (axis, context) = laid_out(NumericalAxisConfig::default(), &[1.0, 2.0, 3.0, 10.0]);

    assert_eq!(axis.major_step(), 2.0);
    assert_eq!(axis.actual_range().minimum, 0.0);
    assert_abs_diff_eq!(axis.actual_range().maximum, 12.0, epsilon = 1e-9);

    let values: Vec<f64> = axis
        .ticks(ValueRange::new(0.0, 1.0))
        .map(|tick| tick.value)
        .collect();
    assert_eq!(values.len(), 7);
    for (index, value) in values.iter().enumerate() {
        assert_abs_diff_eq!(*value, index as f64 * 2.0, epsilon = 1e-9);
    }

    let top = context.series[0].points[3]
        .plot_info
        .and_then(|info| info.as_numerical().copied())
        .expect("numerical plot info");
    assert_relative_eq!(top.normalized_value, 10.0 / 12.0, epsilon = 1e-9);
    assert_eq!(top.plot_origin_offset, 0.0);
}

#[test]
fn all_negative_data_keeps_zero_as_maximum() {
    let (axis, context) = laid_out(NumericalAxisConfig::default(), &[-5.0, -2.0]);

    assert_abs_diff_eq!(axis.actual_range().minimum, -6.0, epsilon = 1e-9);
    assert_eq!(axis.actual_range().maximum, 0.0);
    assert_eq!(axis.normalized_origin(), 1.0);
    assert_eq!(context.series[0].plot_origin, 1.0);
}

#[test]
fn disabled_extension_keeps_data_bounds() {
    let config = NumericalAxisConfig {
        extend_direction: RangeExtendDirection::None,
        ..NumericalAxisConfig::default()
    };
    let (axis, _) = laid_out(config, &[2.0, 8.0]);
    assert_abs_diff_eq!(axis.major_step(), 1.0, epsilon = 1e-12);
    assert_eq!(axis.actual_range(), ValueRange::new(2.0, 8.0));
    assert_eq!(axis.normalized_origin(), 0.0);
}

#[test]
fn logarithmic_axis_skips_non_positive_values() {
    let config = NumericalAxisConfig::new(NumericalAxisKind::Logarithmic { base: 10.0 });
    let (axis, context) = laid_out(config, &[0.0, 10.0, 1_000.0]);

    let points = &context.series[0].points;
    assert!(points[0].plot_info.is_none());
    assert!(points[1].plot_info.is_some());
    assert!(points[2].plot_info.is_some());

    assert_eq!(axis.actual_range().minimum, 0.0);
    assert_abs_diff_eq!(axis.actual_range().maximum, 4.0, epsilon = 1e-9);
    let values: Vec<f64> = axis
        .ticks(ValueRange::new(0.0, 1.0))
        .map(|tick| tick.value)
        .collect();
    let expected = [1.0, 10.0, 100.0, 1_000.0, 10_000.0];
    assert_eq!(values.len(), expected.len());
    for (value, expected) in values.iter().zip(expected) {
        assert_relative_eq!(*value, expected, max_relative = 1e-9);
    }
}

#[test]
fn user_step_survives_extension_and_rounding() {
    let config = NumericalAxisConfig {
        major_step: Some(3.0),
        ..NumericalAxisConfig::default()
    };
    let (axis, _) = laid_out(config, &[1.0, 10.0]);
    assert_eq!(axis.major_step(), 3.0);
    assert_eq!(axis.actual_range().minimum, 0.0);
    assert_abs_diff_eq!(axis.actual_range().maximum, 12.0, epsilon = 1e-9);
}

#[test]
fn zoom_densifies_ticks_without_touching_the_range() {
    let (mut axis, _) = laid_out(NumericalAxisConfig::default(), &[1.0, 2.0, 3.0, 10.0]);
    let range = axis.actual_range();
    axis.set_zoom(4.0).expect("positive zoom");

    assert_eq!(axis.actual_range(), range);
    assert!(axis.is_updated());
    let values: Vec<f64> = axis
        .ticks(ValueRange::new(0.0, 0.25))
        .map(|tick| tick.value)
        .collect();
    assert_eq!(values.len(), 7);
    assert_abs_diff_eq!(values[1] - values[0], 0.5, epsilon = 1e-9);
}

#[test]
fn inverse_axis_reports_flipped_tick_positions() {
    let config = NumericalAxisConfig {
        is_inverse: true,
        ..NumericalAxisConfig::default()
    };
    let (axis, _) = laid_out(config, &[1.0, 2.0, 3.0, 10.0]);
    let ticks: Vec<_> = axis.ticks(ValueRange::new(0.0, 1.0)).collect();

    assert_eq!(ticks[0].value, 0.0);
    assert_eq!(ticks[0].normalized_value, 1.0);
    assert_abs_diff_eq!(ticks[6].normalized_value, 0.0, epsilon = 1e-9);

    let value = axis
        .convert_relative_to_data(1.0)
        .expect("finite position")
        .expect("updated axis");
    assert_abs_diff_eq!(value, 0.0, epsilon = 1e-9);
}

#[test]
fn hidden_series_do_not_affect_the_range() {
    let mut axis = NumericalAxisModel::default();
    let mut context = AxisUpdateContext::new(vec![
        series_of(&[1.0, 4.0]),
        series_of(&[500.0]).with_visibility(false),
    ]);
    axis.update(&mut context);
    axis.plot(&mut context);

    assert!(axis.actual_range().maximum < 10.0);
    assert!(context.series[1].points[0].plot_info.is_none());
}

#[test]
fn radial_axis_honours_user_step_and_large_arc() {
    let config = NumericalAxisConfig {
        major_step: Some(240.0),
        ..NumericalAxisConfig::new(NumericalAxisKind::Radial)
    };
    let (axis, context) = laid_out(config, &[-90.0, 45.0]);

    assert!(axis.is_large_arc());
    assert_eq!(axis.ticks(ValueRange::new(0.0, 1.0)).count(), 2);
    let wrapped = context.series[0].points[0]
        .plot_info
        .and_then(|info| info.as_numerical().copied())
        .expect("numerical plot info");
    assert_relative_eq!(wrapped.normalized_value, 270.0 / 360.0, epsilon = 1e-12);
}

#[test]
fn config_round_trips_through_json_and_rebuilds_the_axis() {
    let config = NumericalAxisConfig {
        minimum: Some(-10.0),
        desired_tick_count: Some(6),
        ..NumericalAxisConfig::new(NumericalAxisKind::Polar)
    };
    let json = config.to_json_pretty().expect("serialize");
    let restored = NumericalAxisConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);

    let axis = NumericalAxisModel::with_config(restored).expect("valid config");
    assert_eq!(axis.kind(), NumericalAxisKind::Polar);
    assert!(!axis.is_updated());
}

#[test]
fn setter_sentinels_restore_automatic_behaviour() {
    let mut axis = NumericalAxisModel::default();
    axis.set_minimum(-3.0).expect("finite minimum");
    axis.set_major_step(5.0).expect("positive step");
    axis.set_minimum(f64::NEG_INFINITY).expect("sentinel");
    axis.set_major_step(0.0).expect("sentinel");
    axis.set_desired_tick_count(1);

    assert_eq!(axis.config(), NumericalAxisConfig::default());
    assert!(axis.set_minimum(f64::NAN).is_err());
}

#[test]
fn decimal_prices_are_ingested_as_ohlc_values() {
    use chart_axis::core::{AxisValue, Ohlc};
    use rust_decimal::Decimal;

    let candle = Ohlc::from_decimal(
        Decimal::new(10_050, 2),
        Decimal::new(10_400, 2),
        Decimal::new(9_900, 2),
        Decimal::new(10_200, 2),
    )
    .expect("representable prices");
    let close = AxisValue::from_decimal(Decimal::new(10_200, 2)).expect("representable close");
    assert_eq!(close.as_scalar(), Some(candle.close));

    let mut axis = NumericalAxisModel::default();
    let mut context = AxisUpdateContext::new(vec![SeriesModel::new(vec![
        ChartPoint::new(candle),
        ChartPoint::new(close),
    ])]);
    axis.update(&mut context);
    axis.plot(&mut context);

    let info = context.series[0].points[0]
        .plot_info
        .and_then(|info| info.as_ohlc().copied())
        .expect("ohlc plot info");
    assert!(info.is_bullish());
    assert_relative_eq!(info.relative_open, 3.5 / 5.0, epsilon = 1e-9);
    assert_relative_eq!(info.relative_close, 2.0 / 5.0, epsilon = 1e-9);
}

#[test]
fn infinite_values_are_left_out_of_range_and_plot() {
    let (axis, context) = laid_out(
        NumericalAxisConfig::default(),
        &[1.0, 2.0, f64::INFINITY, f64::NEG_INFINITY],
    );

    let range = axis.actual_range();
    assert!(range.minimum.is_finite() && range.maximum.is_finite());
    assert!(axis.major_step() > 0.0);

    let points = &context.series[0].points;
    assert!(points[2].plot_info.is_none());
    assert!(points[3].plot_info.is_none());
    for point in &points[..2] {
        let info = point
            .plot_info
            .and_then(|info| info.as_numerical().copied())
            .expect("numerical plot info");
        assert!((0.0..=1.0).contains(&info.normalized_value));
        assert!(info.plot_origin_offset.is_finite());
    }
}

#[test]
fn logarithmic_axis_drops_candles_and_ranges_with_non_positive_parts() {
    use chart_axis::core::{Ohlc, RangeValue};

    let config = NumericalAxisConfig::new(NumericalAxisKind::Logarithmic { base: 10.0 });
    let mut axis = NumericalAxisModel::with_config(config).expect("valid config");
    let mut context = AxisUpdateContext::new(vec![SeriesModel::new(vec![
        ChartPoint::new(Ohlc::new(10.0, 100.0, 0.0, 50.0)),
        ChartPoint::new(RangeValue::new(-1.0, 100.0)),
        ChartPoint::new(1_000.0),
    ])]);
    axis.update(&mut context);
    axis.plot(&mut context);

    let range = axis.actual_range();
    assert!(range.minimum.is_finite() && range.maximum.is_finite());

    let points = &context.series[0].points;
    assert!(points[0].plot_info.is_none());
    assert!(points[1].plot_info.is_none());
    let info = points[2]
        .plot_info
        .and_then(|info| info.as_numerical().copied())
        .expect("numerical plot info");
    assert!((0.0..=1.0).contains(&info.normalized_value));
}

#[test]
fn radial_ticks_follow_the_visible_window_and_zoom() {
    let config = NumericalAxisConfig {
        major_step: Some(90.0),
        ..NumericalAxisConfig::new(NumericalAxisKind::Radial)
    };
    let (mut axis, _) = laid_out(config, &[10.0, 200.0]);

    let values: Vec<f64> = axis
        .ticks(ValueRange::new(0.5, 1.0))
        .map(|tick| tick.value)
        .collect();
    assert_eq!(values, vec![180.0, 270.0]);

    axis.set_zoom(2.0).expect("positive zoom");
    let values: Vec<f64> = axis
        .ticks(ValueRange::new(0.0, 0.25))
        .map(|tick| tick.value)
        .collect();
    assert_eq!(values, vec![0.0, 45.0, 90.0]);
}
