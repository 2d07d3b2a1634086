//! Console and PNG rendering of sweep results.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::sweep::SweepPoint;

pub fn print_table(points: &[SweepPoint], out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{:>6} {:>8} {:>8} {:>6} {:>8} {:>10} {:>10}",
        "qubits", "N", "target", "k", "found", "success", "expected"
    )?;
    for p in points {
        writeln!(
            out,
            "{:>6} {:>8} {:>8} {:>6} {:>8} {:>10.4} {:>10.4}",
            p.num_of_qbits,
            p.search_space,
            p.target,
            p.iterations,
            p.found_index,
            p.success_probability,
            p.theoretical_probability
        )?;
    }
    Ok(())
}

fn size_range(points: &[SweepPoint]) -> Result<(f64, f64)> {
    let first = points
        .first()
        .ok_or_else(|| anyhow::anyhow!("No sweep points to plot"))?;
    let last = points.last().unwrap_or(first);
    // Pad by half a doubling so the end markers are not clipped.
    Ok((
        first.search_space as f64 / 2f64.sqrt(),
        last.search_space as f64 * 2f64.sqrt(),
    ))
}

/// Success probability against search space size N, measured and exact.
pub fn plot_success_rates(points: &[SweepPoint], path: &Path) -> Result<()> {
    let (x_min, x_max) = size_range(points)?;

    let root = BitMapBackend::new(path, (800, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Grover search success rate", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0.0..1.05)?;

    chart
        .configure_mesh()
        .x_desc("Search space size N")
        .y_desc("Success probability")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            points
                .iter()
                .map(|p| (p.search_space as f64, p.theoretical_probability)),
            &BLUE,
        ))?
        .label("theoretical")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(points.iter().map(|p| {
            Circle::new(
                (p.search_space as f64, p.success_probability),
                4,
                RED.filled(),
            )
        }))?
        .label("measured")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Grover iterations used against search space size N.
pub fn plot_iterations(points: &[SweepPoint], path: &Path) -> Result<()> {
    let (x_min, x_max) = size_range(points)?;
    let y_max = points.iter().map(|p| p.iterations).max().unwrap_or(1) as f64 + 1.0;

    let root = BitMapBackend::new(path, (800, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Grover iterations by search space size", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Search space size N")
        .y_desc("Iterations")
        .draw()?;

    chart.draw_series(LineSeries::new(
        points
            .iter()
            .map(|p| (p.search_space as f64, p.iterations as f64)),
        &GREEN,
    ))?;
    chart.draw_series(points.iter().map(|p| {
        Rectangle::new(
            [
                (p.search_space as f64 * 0.95, p.iterations as f64 - 0.15),
                (p.search_space as f64 * 1.05, p.iterations as f64 + 0.15),
            ],
            GREEN.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
