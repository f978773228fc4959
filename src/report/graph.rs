// CPU utilization line plot (SVG)

use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;

use super::create_parent;
use crate::models::CpuSample;

const GRAPH_SIZE: (u32, u32) = (800, 480);

fn plot_err<E: Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("graph rendering: {}", e)
}

/// x = elapsed seconds, y = CPU percent. An empty series still produces an empty chart.
pub fn render_graph(samples: &[CpuSample], title: &str, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    create_parent(path)?;

    let x_max = samples.iter().map(|s| s.elapsed_secs).max().unwrap_or(0).max(1);
    let y_min = samples.iter().map(|s| s.percent).min().unwrap_or(0).min(0);
    let y_max = samples.iter().map(|s| s.percent).max().unwrap_or(0).max(100);

    let root = SVGBackend::new(path, GRAPH_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Time (seconds)")
        .y_desc("CPU (Percentage %)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.elapsed_secs, s.percent)),
            &BLUE,
        ))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    tracing::info!(path = %path.display(), samples = samples.len(), "CPU graph written");
    Ok(())
}
