//! Elevation view
use hifitime::{Duration, Epoch};

use plotly::{
    common::{color::NamedColor, AxisSide, DashType, Line, Mode},
    layout::{Axis, Shape, ShapeLayer, ShapeLine, ShapeType},
    Scatter,
};

use crate::altaz;
use crate::site::GeodeticLocation;
use crate::source::NamedSource;
use crate::window::ObservingWindow;

use super::{build_chart_epoch_axis, build_timedomain_plot, format_datetime, PlotContext};

/// x axis major tick interval [hours]
const TICK_INTERVAL_HOURS: f64 = 4.0;

/// Upper bound of the elevation axis [ddeg]
const ZENITH_DEG: f64 = 90.0;

/// Elevation of every target (solid) and calibrator (dashed) over the
/// sampling grid, with the planned window shaded and its two boundaries
/// labeled on a secondary top axis. The elevation limit is a display
/// floor: curves below it are computed but clipped out of view.
pub fn elevation_plot(
    location: &GeodeticLocation,
    targets: &[NamedSource],
    calibrators: &[NamedSource],
    window: &ObservingWindow,
    elevation_limit_deg: f64,
) -> PlotContext {
    let grid = window.sample_grid();

    let mut plot = build_timedomain_plot(
        "Elevation",
        "Elevation [°]",
        (elevation_limit_deg, ZENITH_DEG),
        grid_ticks(&grid),
    );

    // planned observing window: shaded band + boundary labels up top
    let layout = plot
        .layout()
        .clone()
        .shapes(vec![observing_band(window.start, window.end())])
        .x_axis2(window_axis(window, &grid));
    plot.set_layout(layout);

    let mut plot_ctx = PlotContext::new();
    plot_ctx.add_plot(plot);

    for source in targets {
        let elevation = altaz::elevation_series(&source.coord, location, &grid);
        let trace = build_chart_epoch_axis(&source.name, Mode::Lines, grid.clone(), elevation);
        plot_ctx.add_trace(trace);
    }

    for source in calibrators {
        let elevation = altaz::elevation_series(&source.coord, location, &grid);
        let trace = build_chart_epoch_axis(&source.name, Mode::Lines, grid.clone(), elevation)
            .line(Line::new().dash(DashType::Dash));
        plot_ctx.add_trace(trace);
    }

    plot_ctx.add_trace(window_anchor(window));

    plot_ctx
}

/// Major x ticks aligned on hours divisible by the tick interval,
/// labeled "DD-Mon-YYYY/HH:MM".
/// Ticks are built in the Epoch domain (exact nanosecond steps),
/// so labels never drift off the whole hour over long spans.
fn grid_ticks(grid: &[Epoch]) -> (Vec<f64>, Vec<String>) {
    let (first, last) = match (grid.first(), grid.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return (Vec::new(), Vec::new()),
    };
    let interval = Duration::from_hours(TICK_INTERVAL_HOURS);
    // first tick: earliest interval-aligned hour (UTC) within the grid
    let (y, m, d, hh, _, _, _) = first.to_gregorian_utc();
    let aligned = hh - hh % TICK_INTERVAL_HOURS as u8;
    let mut tick = Epoch::from_gregorian_utc(y, m, d, aligned, 0, 0, 0);
    while tick < first {
        tick += interval;
    }
    let mut values = Vec::new();
    let mut labels = Vec::new();
    while tick <= last {
        values.push(tick.to_mjd_utc_days());
        labels.push(format_datetime(tick));
        tick += interval;
    }
    (values, labels)
}

/// Shaded band over the planned observing window, below the curves
fn observing_band(t1: Epoch, t2: Epoch) -> Shape {
    Shape::new()
        .shape_type(ShapeType::Rect)
        .x_ref("x")
        .y_ref("paper")
        .x0(t1.to_mjd_utc_days())
        .x1(t2.to_mjd_utc_days())
        .y0(0.0)
        .y1(1.0)
        .fill_color(NamedColor::Pink)
        .opacity(0.3)
        .layer(ShapeLayer::Below)
        .line(ShapeLine::new().width(0.0))
}

/// Secondary top axis: carries only the two window boundary labels
fn window_axis(window: &ObservingWindow, grid: &[Epoch]) -> Axis {
    let range: Vec<f64> = match (grid.first(), grid.last()) {
        (Some(first), Some(last)) => vec![first.to_mjd_utc_days(), last.to_mjd_utc_days()],
        _ => Vec::new(),
    };
    Axis::new()
        .overlaying("x")
        .side(AxisSide::Top)
        .range(range)
        .show_grid(false)
        .tick_values(vec![
            window.start.to_mjd_utc_days(),
            window.end().to_mjd_utc_days(),
        ])
        .tick_text(vec![
            format_datetime(window.start),
            format_datetime(window.end()),
        ])
}

/// Fully transparent trace bound to the secondary axis, so it renders
fn window_anchor(window: &ObservingWindow) -> Box<Scatter<f64, f64>> {
    Scatter::new(
        vec![
            window.start.to_mjd_utc_days(),
            window.end().to_mjd_utc_days(),
        ],
        vec![0.0, 0.0],
    )
    .mode(Mode::Lines)
    .x_axis("x2")
    .opacity(0.0)
    .show_legend(false)
}
