//! Stacked bar chart of passes by location and air-yard bin.

use crate::error::{ReportError, Result};
use crate::reporting::console::display_name;
use crate::types::{AirYardCategory, LocationDepthTable, PassLocation};
use plotly::common::Title;
use plotly::layout::{Axis, BarMode, Legend};
use plotly::{Bar, Layout, Plot};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Chart title, e.g. "J. Dart (NYG) Pass Distribution by Location & Distance (Total Throws: 312)".
pub fn chart_title(player: &str, team: Option<&str>, total_throws: usize) -> String {
    let team = team.map(|t| format!(" ({})", t)).unwrap_or_default();
    format!(
        "{}{} Pass Distribution by Location & Distance (Total Throws: {})",
        display_name(player),
        team,
        total_throws
    )
}

/// Build the chart: one bar per location, one stacked segment per air-yard bin.
pub fn build_chart(table: &LocationDepthTable, title: &str) -> Plot {
    let locations: Vec<String> = PassLocation::ALL
        .iter()
        .map(|location| location.to_string())
        .collect();

    let mut plot = Plot::new();
    for category in AirYardCategory::ALL {
        plot.add_trace(
            Bar::new(locations.clone(), table.category_series(category)).name(category.label()),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(title)
            .bar_mode(BarMode::Stack)
            .x_axis(Axis::new().title("Pass Location"))
            .y_axis(Axis::new().title("Number of Throws"))
            .legend(Legend::new().title(Title::with_text("Air Yard Distance"))),
    );

    plot
}

/// Write the chart as a standalone HTML file, then open it when `show` is set.
pub fn render_chart(plot: &Plot, path: &Path, show: bool) -> Result<PathBuf> {
    fs::write(path, plot.to_html())
        .map_err(|e| ReportError::ChartFailed(format!("{}: {}", path.display(), e)))?;
    info!("Chart saved: {}", path.display());

    if show {
        plot.show();
    }

    Ok(path.to_path_buf())
}
