//! Plotting observer for solver traces.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use ampline_core::Observer;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// How a [`PlotObserver`] result is rendered.
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Two-shot reclosure").log_x())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    legend: bool,
    log_x: bool,
    log_y: bool,
}

impl ShowConfig {
    /// No title or labels, no legend, linear axes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Labels each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Plots log₁₀ of x. Points with non-positive x are skipped.
    #[must_use]
    pub fn log_x(mut self) -> Self {
        self.log_x = true;
        self
    }

    /// Plots log₁₀ of y. Points with non-positive y are skipped.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }
}

/// Extracts plottable data from a solver event.
///
/// Implement this on a local event type to pass a [`PlotObserver`] straight to
/// a solver. Return `None` from [`x`][Plottable::x] to skip the event, or
/// `None` in a trace slot to skip just that trace.
///
/// Solver events from `ampline-solvers` carry lifetimes and generic payloads;
/// for those, record from a closure with [`PlotObserver::record`].
pub trait Plottable<const N: usize> {
    fn x(&self) -> Option<f64>;

    fn traces(&self) -> [Option<f64>; N];
}

/// Collects `N` named traces during a solve and shows them in an egui window.
///
/// ```ignore
/// let mut obs = PlotObserver::new(["Conductor"]);
/// integrate_observed(t0, &waveform, &params, dt, 660.0, |event: &euler::Event<'_, _, _>| {
///     let state = &event.snapshot.input;
///     obs.record(state.time, [Some(state.temperature)]);
///     None
/// })?;
/// obs.show(ShowConfig::new().log_x())?;
/// ```
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records one x value across all traces; `None` skips a trace.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (i, y) in traces.into_iter().enumerate() {
            if let Some(y) = y {
                self.data[i].push([x, y]);
            }
        }
    }

    /// Number of points recorded for trace `index`.
    #[must_use]
    pub fn trace_len(&self, index: usize) -> usize {
        self.data.get(index).map_or(0, Vec::len)
    }

    /// Opens a window with the collected traces and blocks until it closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.clone().unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self
            .names
            .into_iter()
            .zip(self.data)
            .map(|(name, points)| (name, transform(&points, config.log_x, config.log_y)))
            .collect();

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| Ok(Box::new(PlotApp { traces, config }))),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Lets `&mut PlotObserver` be passed by value so it can be shown afterwards.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

/// Applies the log axes, dropping points that have no logarithm.
fn transform(points: &[[f64; 2]], log_x: bool, log_y: bool) -> Vec<[f64; 2]> {
    let axis = |v: f64, log: bool| match (log, v > 0.0) {
        (false, _) => Some(v),
        (true, true) => Some(v.log10()),
        (true, false) => None,
    };
    points
        .iter()
        .filter_map(|&[x, y]| Some([axis(x, log_x)?, axis(y, log_y)?]))
        .collect()
}

struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    config: ShowConfig,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("plot_observer");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            let x_label = axis_label(self.config.x_label.as_deref(), self.config.log_x);
            let y_label = axis_label(self.config.y_label.as_deref(), self.config.log_y);
            if let Some(label) = x_label {
                plot = plot.x_axis_label(label);
            }
            if let Some(label) = y_label {
                plot = plot.y_axis_label(label);
            }
            plot.show(ui, |plot_ui| {
                for (name, points) in &self.traces {
                    let points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(name));
                }
            });
        });
    }
}

fn axis_label(label: Option<&str>, log: bool) -> Option<String> {
    match (label, log) {
        (Some(label), true) => Some(format!("log₁₀ {label}")),
        (Some(label), false) => Some(label.to_owned()),
        (None, true) => Some("log₁₀".to_owned()),
        (None, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct Sample {
        time: Option<f64>,
        conductor: Option<f64>,
        ambient: Option<f64>,
    }

    impl Plottable<2> for Sample {
        fn x(&self) -> Option<f64> {
            self.time
        }

        fn traces(&self) -> [Option<f64>; 2] {
            [self.conductor, self.ambient]
        }
    }

    fn feed(obs: &mut PlotObserver<2>, sample: Sample) {
        let _: Option<()> = obs.observe(&sample);
    }

    #[test]
    fn records_only_present_values() {
        let mut obs = PlotObserver::new(["conductor", "ambient"]);
        feed(
            &mut obs,
            Sample {
                time: Some(0.02),
                conductor: Some(66.4),
                ambient: None,
            },
        );
        feed(
            &mut obs,
            Sample {
                time: None,
                conductor: Some(67.6),
                ambient: Some(25.0),
            },
        );

        assert_eq!(obs.data[0], vec![[0.02, 66.4]]);
        assert!(obs.data[1].is_empty());
        assert_eq!(obs.trace_len(0), 1);
        assert_eq!(obs.trace_len(5), 0);
    }

    #[test]
    fn log_axes_skip_non_positive_points() {
        let points = [[0.0, 65.2], [1.0, 84.6], [100.0, 0.0]];

        assert_eq!(transform(&points, false, false), points.to_vec());
        assert_eq!(
            transform(&points, true, false),
            vec![[0.0, 84.6], [100.0_f64.log10(), 0.0]]
        );
        assert_eq!(transform(&points, true, true).len(), 1);
    }

    #[test]
    fn labels_mark_log_axes() {
        assert_eq!(axis_label(Some("time (s)"), true).as_deref(), Some("log₁₀ time (s)"));
        assert_eq!(axis_label(Some("°C"), false).as_deref(), Some("°C"));
        assert_eq!(axis_label(None, false), None);
    }
}
