use approx::assert_relative_eq;
use barchart_rs::config::{ConfigVariant, bar_config};
use barchart_rs::render::tick_label_rotation;
use barchart_rs::{BarChart, Surface};
use serde_json::{Value, json};

const PLOT_WIDTH: f64 = 500.0;

fn surface() -> Surface {
    Surface::new(600.0, 400.0).expect("valid surface")
}

fn dataset(rows: &[(&str, f64)]) -> Vec<Value> {
    rows.iter()
        .map(|(term, count)| json!({"term": term, "count": count}))
        .collect()
}

#[test]
fn band_axis_creates_one_tick_per_category() {
    let mut chart = BarChart::new(bar_config(ConfigVariant::Default)).expect("chart");
    let mut surface = surface();
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0), ("DE", 3.0), ("IT", 1.0)]))
        .expect("render");

    let axis = surface.x_axis().expect("x axis");
    let labels: Vec<&str> = axis.ticks.values().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["FR", "DE", "IT"]);

    // Band ticks sit at band centers, strictly increasing.
    let offsets: Vec<f64> = axis.ticks.values().map(|tick| tick.offset).collect();
    assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(offsets.iter().all(|offset| (0.0..=PLOT_WIDTH).contains(offset)));
}

#[test]
fn band_tick_labels_are_subsampled_by_stride() {
    let mut config = bar_config(ConfigVariant::Default);
    config.axis.x.options.ticks.number = Some(2);
    let mut chart = BarChart::new(config).expect("chart");
    let mut surface = surface();
    chart
        .render(
            &mut surface,
            &dataset(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0), ("e", 5.0)]),
        )
        .expect("render");

    let axis = surface.x_axis().expect("x axis");
    let labels: Vec<&str> = axis.ticks.values().map(|tick| tick.label.as_str()).collect();
    // Every 2nd domain value by index: 0, 2, 4.
    assert_eq!(labels, vec!["a", "c", "e"]);
}

#[test]
fn y_axis_spans_zero_to_current_max() {
    let mut config = bar_config(ConfigVariant::Default);
    config.axis.y.options.ticks.number = Some(5);
    let mut chart = BarChart::new(config).expect("chart");
    let mut surface = surface();
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0), ("DE", 3.0)]))
        .expect("render");

    let axis = surface.y_axis().expect("y axis");
    let labels: Vec<&str> = axis.ticks.values().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["0", "1", "2", "3", "4", "5"]);
}

#[test]
fn y_gridlines_fade_out_and_back_in_on_update() {
    let mut chart = BarChart::new(bar_config(ConfigVariant::Default)).expect("chart");
    let mut surface = surface();

    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("first render");
    let grid = surface.grid_y().expect("y gridlines");
    assert_relative_eq!(grid.opacity, 0.7);
    assert_relative_eq!(grid.extent, PLOT_WIDTH);

    surface.advance(1_000.0);
    chart
        .render(&mut surface, &dataset(&[("FR", 9.0)]))
        .expect("second render");

    // Fully faded out at the end of the 200ms dip.
    surface.advance(1_200.0);
    let grid = surface.grid_y().expect("y gridlines");
    assert!(grid.opacity < 1e-3);

    // Faded back in after the 300ms recovery.
    surface.advance(1_500.0);
    let grid = surface.grid_y().expect("y gridlines");
    assert_relative_eq!(grid.opacity, 0.7, epsilon = 1e-9);
}

#[test]
fn x_gridlines_are_only_created_when_enabled() {
    let mut chart = BarChart::new(bar_config(ConfigVariant::Default)).expect("chart");
    let mut surface = surface();
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("render");

    // Stock config enables y gridlines only.
    assert!(surface.grid_y().is_some());
    assert!(surface.grid_x().is_none());
}

#[test]
fn toggled_off_gridlines_are_hidden_but_kept() {
    let mut chart = BarChart::new(bar_config(ConfigVariant::Default)).expect("chart");
    let mut surface = surface();
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("first render");
    assert!(surface.grid_y().expect("y gridlines").visible);

    let mut config = bar_config(ConfigVariant::Default);
    config.axis.y.options.gridlines = false;
    chart.set_config(config).expect("set config");
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("second render");

    // The group stays in the scene; only its display state changes.
    let grid = surface.grid_y().expect("y gridlines");
    assert!(!grid.visible);

    chart
        .set_config(bar_config(ConfigVariant::Default))
        .expect("set config");
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("third render");
    assert!(surface.grid_y().expect("y gridlines").visible);
}

#[test]
fn style_toggles_are_reapplied_every_render() {
    let mut chart = BarChart::new(bar_config(ConfigVariant::Default)).expect("chart");
    let mut surface = surface();
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("first render");

    let axis = surface.x_axis().expect("x axis");
    assert!(!axis.line_visible);
    assert!(!axis.ticks_visible);
    assert!(axis.tick_labels_visible);
    assert_relative_eq!(tick_label_rotation(axis), 0.0);

    let mut config = bar_config(ConfigVariant::Default);
    config.axis.x.options.tick_labels.rotated = true;
    config.axis.x.options.line.visible = true;
    chart.set_config(config).expect("set config");
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("second render");

    let axis = surface.x_axis().expect("x axis");
    assert!(axis.line_visible);
    assert_relative_eq!(tick_label_rotation(axis), -25.0);
}

#[test]
fn toggling_label_visibility_changes_only_the_label() {
    let mut chart = BarChart::new(bar_config(ConfigVariant::Default)).expect("chart");
    let mut surface = surface();
    let data = dataset(&[("FR", 5.0), ("DE", 3.0)]);

    chart.render(&mut surface, &data).expect("first render");
    surface.advance(1_000.0);
    assert!(surface.label_y().is_none());
    let bars_before: Vec<(f64, f64)> = surface
        .bars()
        .values()
        .map(|bar| (bar.x, bar.height))
        .collect();
    let ticks_before: Vec<f64> = surface
        .x_axis()
        .expect("x axis")
        .ticks
        .values()
        .map(|tick| tick.offset)
        .collect();

    let mut config = bar_config(ConfigVariant::Default);
    config.axis.y.options.label.visible = true;
    config.axis.y.options.label.value = "Count".to_owned();
    chart.set_config(config).expect("set config");
    chart.render(&mut surface, &data).expect("second render");
    surface.advance(2_000.0);

    let label = surface.label_y().expect("y label");
    assert!(label.visible);
    assert_eq!(label.text, "Count");
    assert_relative_eq!(label.rotation_deg, -90.0);

    let bars_after: Vec<(f64, f64)> = surface
        .bars()
        .values()
        .map(|bar| (bar.x, bar.height))
        .collect();
    let ticks_after: Vec<f64> = surface
        .x_axis()
        .expect("x axis")
        .ticks
        .values()
        .map(|tick| tick.offset)
        .collect();
    assert_eq!(bars_before, bars_after);
    assert_eq!(ticks_before, ticks_after);
}

#[test]
fn label_position_is_fixed_after_creation() {
    let mut config = bar_config(ConfigVariant::Default);
    config.axis.x.options.label.visible = true;
    config.axis.x.options.label.value = "Country".to_owned();
    let mut chart = BarChart::new(config.clone()).expect("chart");
    let mut surface = surface();

    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("first render");
    let label = surface.label_x().expect("x label");
    let position = (label.x, label.y);
    assert_eq!(label.text, "Country");

    config.axis.x.options.label.value = "Pays".to_owned();
    chart.set_config(config).expect("set config");
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0)]))
        .expect("second render");

    let label = surface.label_x().expect("x label");
    assert_eq!(label.text, "Pays");
    assert_eq!((label.x, label.y), position);
}

#[test]
fn time_axis_orders_bars_and_formats_tick_labels() {
    let mut config = bar_config(ConfigVariant::Date);
    config.axis.x.scale.kind = "time".to_owned();
    config.axis.x.options.ticks.number = Some(2);
    let mut chart = BarChart::new(config).expect("chart");
    let mut surface = surface();

    let data = vec![
        json!({"term": "02 Jan 2017", "count": 3}),
        json!({"term": "10 Jan 2017", "count": 5}),
        json!({"term": "06 Jan 2017", "count": 1}),
    ];
    chart.render(&mut surface, &data).expect("render");
    surface.advance(1_000.0);

    let early = surface.bar("02 Jan 2017").expect("early bar");
    let mid = surface.bar("06 Jan 2017").expect("mid bar");
    let late = surface.bar("10 Jan 2017").expect("late bar");
    assert!(early.x < mid.x && mid.x < late.x);

    let axis = surface.x_axis().expect("x axis");
    let labels: Vec<&str> = axis.ticks.values().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["02 Jan 2017", "06 Jan 2017", "10 Jan 2017"]);
}

#[test]
fn axis_transition_moves_existing_ticks() {
    let mut chart = BarChart::new(bar_config(ConfigVariant::Default)).expect("chart");
    let mut surface = surface();

    chart
        .render(&mut surface, &dataset(&[("FR", 5.0), ("DE", 3.0)]))
        .expect("first render");
    surface.advance(1_000.0);
    let fr_before = surface.x_axis().expect("x axis").ticks["FR"].offset;

    // Adding a category squeezes the bands leftward.
    chart
        .render(&mut surface, &dataset(&[("FR", 5.0), ("DE", 3.0), ("IT", 1.0)]))
        .expect("second render");

    // The FR tick animates from its old offset rather than jumping.
    surface.advance(1_100.0);
    let fr_mid = surface.x_axis().expect("x axis").ticks["FR"].offset;
    surface.advance(2_000.0);
    let fr_after = surface.x_axis().expect("x axis").ticks["FR"].offset;

    assert!(fr_after < fr_before);
    assert!(fr_mid <= fr_before && fr_mid >= fr_after);

    // The new tick faded in.
    let it = &surface.x_axis().expect("x axis").ticks["IT"];
    assert_relative_eq!(it.opacity, 1.0, epsilon = 1e-9);
}
