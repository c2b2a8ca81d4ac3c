//! Vocabulary charts rendered to SVG.

mod bar;
mod cloud;

use std::path::Path;

use clap::ValueEnum;
use plotters::prelude::*;

use crate::config::{CHART_SIZE, DEFAULT_CLOUD_WORDS, DEFAULT_MAX_RANK};
use crate::error::{MinerError, Result};
use crate::vocab::FrequencyTable;

pub use bar::draw_bar_chart;
pub use cloud::{draw_word_cloud, layout_cloud, PlacedWord};

fn plot_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> MinerError {
    MinerError::Plot(err.to_string())
}

/// Which chart to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlotKind {
    /// Ranked bar chart.
    Bar,
    /// Word cloud.
    Cloud,
    /// Bar chart and word cloud side by side.
    #[default]
    Combined,
}

/// Chart options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    /// Bars for ranks 1..=max_rank.
    pub max_rank: usize,
    /// Words in the cloud.
    pub max_words: usize,
    /// Canvas size in pixels.
    pub size: (u32, u32),
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            max_rank: DEFAULT_MAX_RANK,
            max_words: DEFAULT_CLOUD_WORDS,
            size: CHART_SIZE,
        }
    }
}

/// Render a chart for one label of a frequency table to an SVG file.
///
/// # Errors
/// `MinerError::EmptyLabel` when the table has no rows for `label`;
/// `MinerError::Plot` when `options.max_rank` is zero.
pub fn save_plot(
    table: &FrequencyTable,
    label: &str,
    kind: PlotKind,
    options: &PlotOptions,
    path: &Path,
) -> Result<()> {
    if table.top_by_count(label, 1).is_empty() {
        return Err(MinerError::EmptyLabel(label.to_string()));
    }
    if options.max_rank == 0 {
        return Err(MinerError::Plot("max_rank must be at least 1".to_string()));
    }
    let ranked = table.top_ranked(label, options.max_rank);
    let cloud_words: Vec<(&str, usize)> = table
        .top_by_count(label, options.max_words)
        .into_iter()
        .map(|r| (r.word.as_str(), r.count))
        .collect();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let root = SVGBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    match kind {
        PlotKind::Bar => draw_bar_chart(&root, &ranked, label)?,
        PlotKind::Cloud => draw_word_cloud(&root, &cloud_words)?,
        PlotKind::Combined => {
            let (left, right) = root.split_horizontally(options.size.0 / 2);
            draw_bar_chart(&left, &ranked, label)?;
            draw_word_cloud(&right, &cloud_words)?;
        }
    }

    root.present().map_err(plot_error)?;
    tracing::debug!(label, ?kind, path = %path.display(), "Saved chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn table() -> FrequencyTable {
        let counts = BTreeMap::from([
            ("landlord".to_string(), 12),
            ("tenant".to_string(), 9),
            ("rent".to_string(), 4),
        ]);
        FrequencyTable::from_counts("RTA", counts)
    }

    #[test]
    fn test_save_each_kind() {
        let dir = tempfile::tempdir().unwrap();
        for kind in [PlotKind::Bar, PlotKind::Cloud, PlotKind::Combined] {
            let path = dir.path().join(format!("{kind:?}.svg"));
            save_plot(&table(), "RTA", kind, &PlotOptions::default(), &path).unwrap();
            let svg = std::fs::read_to_string(&path).unwrap();
            assert!(svg.contains("<svg"));
            assert!(svg.contains("landlord"), "{kind:?}");
        }
    }

    #[test]
    fn test_unknown_label() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_plot(
            &table(),
            "missing",
            PlotKind::Bar,
            &PlotOptions::default(),
            &dir.path().join("x.svg"),
        )
        .unwrap_err();
        assert!(matches!(err, MinerError::EmptyLabel(_)));
    }

    #[test]
    fn test_zero_max_rank_is_not_reported_as_missing_label() {
        let dir = tempfile::tempdir().unwrap();
        let options = PlotOptions {
            max_rank: 0,
            ..PlotOptions::default()
        };
        let err = save_plot(&table(), "RTA", PlotKind::Bar, &options, &dir.path().join("x.svg"))
            .unwrap_err();
        assert!(matches!(err, MinerError::Plot(ref m) if m.contains("max_rank")));
    }
}
