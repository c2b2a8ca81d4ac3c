//! Ranked bar chart of word counts.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::plot_error;
use crate::error::Result;
use crate::vocab::FrequencyRow;

/// Draw one bar per row, in the given order.
pub fn draw_bar_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rows: &[&FrequencyRow],
    label: &str,
) -> Result<()> {
    let words: Vec<String> = rows.iter().map(|r| r.word.clone()).collect();
    let max_count = rows.iter().map(|r| r.count).max().unwrap_or(0);
    let y_max = u32::try_from(max_count).unwrap_or(u32::MAX - 1) + 1;

    let mut chart = ChartBuilder::on(area)
        .caption(label, ("sans-serif", 24.0).into_font())
        .margin(15)
        .x_label_area_size(110)
        .y_label_area_size(60)
        .build_cartesian_2d((0..words.len()).into_segmented(), 0u32..y_max)
        .map_err(plot_error)?;

    let word_at = |value: &SegmentValue<usize>| match value {
        SegmentValue::CenterOf(i) => words.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(words.len())
        .x_label_formatter(&word_at)
        .x_label_style(
            ("sans-serif", 14.0)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Word")
        .y_desc("Number of Occurrences")
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(8)
                .data(
                    rows.iter()
                        .enumerate()
                        .map(|(i, r)| (i, u32::try_from(r.count).unwrap_or(u32::MAX))),
                ),
        )
        .map_err(plot_error)?;

    Ok(())
}
