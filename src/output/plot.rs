//! Bar charts comparing stored method scores

use crate::error::{Result, TextBaselinesError};
use crate::output::metrics::{Metrics, MethodScores};
use log::{info, warn};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (1200, 1000);

impl Metrics {
    /// Write a 2x2 grid of bar charts (one per score) as SVG.
    ///
    /// Returns `Ok(false)` without touching `path` when nothing has been scored.
    pub fn plot(&self, path: &Path) -> Result<bool> {
        if self.is_empty() {
            warn!("No metrics data to plot. Use the .run() method first.");
            return Ok(false);
        }

        draw_comparison(self, path).map_err(|e| TextBaselinesError::Plot(e.to_string()))?;
        info!("Saved metrics chart to {}", path.display());
        Ok(true)
    }
}

fn draw_comparison(metrics: &Metrics, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let methods: Vec<&str> = metrics.results().iter().map(|(name, _)| name.as_str()).collect();
    let n = methods.len();

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Model Performance Comparison", ("sans-serif", 32))?;

    let label_style = TextStyle::from(("sans-serif", 14).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (metric_idx, area) in root.split_evenly((2, 2)).iter().enumerate() {
        let scores: Vec<f64> = metrics
            .results()
            .iter()
            .map(|(_, scores)| scores.values()[metric_idx])
            .collect();

        let mut chart = ChartBuilder::on(area)
            .caption(MethodScores::NAMES[metric_idx], ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..105f64)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Score (%)")
            .x_labels(n)
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(idx) => {
                    methods.get(*idx).map(|m| m.to_string()).unwrap_or_default()
                }
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(scores.iter().enumerate().map(|(idx, &score)| {
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(idx), 0.0), (SegmentValue::Exact(idx + 1), score)],
                Palette99::pick(idx).mix(0.85).filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))?;

        chart.draw_series(scores.iter().enumerate().map(|(idx, &score)| {
            Text::new(
                format!("{:.2}", score),
                (SegmentValue::CenterOf(idx), score + 1.0),
                label_style.clone(),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}
