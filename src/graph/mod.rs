use hifitime::Epoch;

use plotly::{
    common::{Font, HoverInfo, Mode, Title},
    layout::Axis,
    Layout, Plot, Scatter,
};

mod context;
pub use context::PlotContext;

mod elevation;
pub use elevation::elevation_plot;

/// Month tags of the x axis tick labels
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/*
 * builds a standard 2D plot single Y scale,
 * ready to plot data against time (`Epoch`, x values in MJD)
 */
pub fn build_timedomain_plot(
    title: &str,
    y_title: &str,
    y_range: (f64, f64),
    xticks: (Vec<f64>, Vec<String>),
) -> Plot {
    build_plot(
        title,
        Font::default(),
        "Time (UTC)",
        y_title,
        y_range,
        xticks,
        true, // show legend
        true, // autosize
    )
}

/*
 * Builds a Plot
 */
fn build_plot(
    title: &str,
    title_font: Font,
    x_axis_title: &str,
    y_axis_title: &str,
    y_range: (f64, f64),
    xticks: (Vec<f64>, Vec<String>),
    show_legend: bool,
    auto_size: bool,
) -> Plot {
    let layout = Layout::new()
        .title(Title::with_text(title).font(title_font))
        .x_axis(
            Axis::new()
                .title(Title::with_text(x_axis_title))
                .zero_line(false)
                .tick_values(xticks.0)
                .tick_text(xticks.1),
        )
        .y_axis(
            Axis::new()
                .title(Title::with_text(y_axis_title))
                .range(vec![y_range.0, y_range.1])
                .zero_line(false),
        )
        .show_legend(show_legend)
        .auto_size(auto_size);
    let mut p = Plot::new();
    p.set_layout(layout);
    p
}

/*
 * Builds a default chart, 2D, X = time axis (MJD),
 * hover text carries the full epoch description
 */
pub fn build_chart_epoch_axis(
    name: &str,
    mode: Mode,
    epochs: Vec<Epoch>,
    data_y: Vec<f64>,
) -> Box<Scatter<f64, f64>> {
    let txt: Vec<String> = epochs.iter().map(|e| e.to_string()).collect();
    Scatter::new(epochs.iter().map(|e| e.to_mjd_utc_days()).collect(), data_y)
        .mode(mode)
        .name(name)
        .hover_text_array(txt)
        .hover_info(HoverInfo::All)
}

/// Human readable "DD-Mon-YYYY/HH:MM" (UTC) tick label
pub fn format_datetime(t: Epoch) -> String {
    let (y, m, d, hh, mm, _, _) = t.to_gregorian_utc();
    format!("{:02}-{}-{}/{:02}:{:02}", d, MONTHS[(m - 1) as usize], y, hh, mm)
}
