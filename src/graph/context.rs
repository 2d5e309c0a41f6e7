use plotly::{Plot, Trace};

/// Accumulates the plots of one rendering session,
/// rendered as a single HTML product.
pub struct PlotContext {
    plots: Vec<Plot>,
}

impl Default for PlotContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotContext {
    pub fn new() -> Self {
        Self { plots: Vec::new() }
    }

    pub fn add_plot(&mut self, plot: Plot) {
        self.plots.push(plot);
    }

    /// Adds a trace to the latest plot
    pub fn add_trace(&mut self, trace: Box<dyn Trace>) {
        if let Some(plot) = self.plots.last_mut() {
            plot.add_trace(trace);
        }
    }

    /// Renders all plots as one self contained HTML page.
    /// The first plot provides the page (and the plotly.js inclusion),
    /// following plots are appended as inline snippets.
    pub fn to_html(&self) -> String {
        let mut plots = self.plots.iter();
        let mut html = match plots.next() {
            Some(plot) => plot.to_html(),
            None => return String::new(),
        };
        for (index, plot) in plots.enumerate() {
            let div = plot.to_inline_html(Some(&format!("plotly-div-{}", index + 1)));
            html = html.replace("</body>", &format!("{}\n</body>", div));
        }
        html
    }
}
