// Console output: the side-by-side table of results and the timing lines.

use std::io::Write;

use crate::timing::TimingSummary;

const INDEX_WIDTH: usize = 5;
const MIN_VALUE_WIDTH: usize = 15;

/// Writes the first `rows` entries of both vectors next to each other.
///
/// __Arguments:__
///
/// + `labels` - (reference, optimized) kernel names for the column headers
///
/// + `rows` - number of entries to show; clamped to the shorter vector
///
pub fn render_comparison_table<W: Write>(
    writer: &mut W,
    labels: (&str, &str),
    z_reference: &[f32],
    z_optimized: &[f32],
    rows: usize,
) -> std::io::Result<()> {
    let headers = (
        format!("Vector Z ({})", labels.0),
        format!("Vector Z ({})", labels.1),
    );
    let width = MIN_VALUE_WIDTH
        .max(headers.0.len())
        .max(headers.1.len());
    let line_len = INDEX_WIDTH + 2 * (width + 3);

    writeln!(writer, "{}", "-".repeat(line_len))?;
    writeln!(
        writer,
        "{:>iw$} | {:>w$} | {:>w$}",
        "Index",
        headers.0,
        headers.1,
        iw = INDEX_WIDTH,
        w = width
    )?;
    writeln!(writer, "{}", "-".repeat(line_len))?;

    for (i, (r, o)) in z_reference
        .iter()
        .zip(z_optimized)
        .take(rows)
        .enumerate()
    {
        writeln!(
            writer,
            "{:>iw$} | {:>w$.6} | {:>w$.6}",
            i + 1,
            r,
            o,
            iw = INDEX_WIDTH,
            w = width
        )?;
    }

    writeln!(writer, "{}", "=".repeat(line_len))
}

/// Writes the average trial time of one kernel, in seconds.
pub fn render_average<W: Write>(
    writer: &mut W,
    label: &str,
    summary: &TimingSummary,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "Average time (for {})\t: {:.9} s",
        label, summary.average
    )
}

/// Writes how many times faster the optimized kernel ran.
pub fn render_speedup<W: Write>(
    writer: &mut W,
    label: &str,
    speedup: Option<f64>,
) -> std::io::Result<()> {
    match speedup {
        Some(speedup) => writeln!(writer, "Speedup (for {})\t: {:.2}x", label, speedup),
        None => writeln!(writer, "Speedup (for {})\t: n/a", label),
    }
}
