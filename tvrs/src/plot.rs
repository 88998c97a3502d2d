use crate::stats::GenreAverages;
use anyhow::{bail, Result};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use rand::Rng;
use std::path::Path;

/// An RGB colour with each channel in `[0, 1]`.
pub type Rgb = (f64, f64, f64);

/// Fraction of each genre slot covered by its bar.
const BAR_WIDTH: f64 = 0.6;

pub fn random_colors(count: usize) -> Vec<Rgb> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| (rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

fn to_color((r, g, b): Rgb) -> RGBColor {
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(channel(r), channel(g), channel(b))
}

pub fn create_plot(path: &Path, averages: &GenreAverages) -> Result<()> {
    if averages.is_empty() {
        bail!("no rated genres to plot");
    }
    info!("plotting {} genres to {}", averages.len(), path.display());
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    draw_bars(&root, averages)?;
    root.present()?;
    Ok(())
}

/// Draw one bar per genre, in the order `averages` yields them.
fn draw_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    averages: &GenreAverages,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let genres: Vec<&str> = averages.iter().map(|(genre, _)| genre).collect();
    let colors = random_colors(genres.len());
    let top = averages.iter().map(|(_, avg)| avg).fold(10.0, f64::max);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption("Rating-Genre Bar chart", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(140)
        .y_label_area_size(60)
        .build_cartesian_2d((0..genres.len()).into_segmented(), 0f64..top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(genres.len())
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => genres.get(*idx).copied().unwrap_or_default().to_string(),
            _ => String::new(),
        })
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Genres")
        .y_desc("Average rating by genre")
        .draw()?;

    let (width, _) = chart.plotting_area().dim_in_pixel();
    let slot = width as f64 / genres.len() as f64;
    let gap = (slot * (1.0 - BAR_WIDTH) / 2.0) as u32;

    chart.draw_series(averages.iter().zip(&colors).enumerate().map(
        |(idx, ((_, avg), rgb))| {
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(idx), 0.0), (SegmentValue::Exact(idx + 1), avg)],
                to_color(*rgb).filled(),
            );
            bar.set_margin(0, 0, gap, gap);
            bar
        },
    ))?;

    Ok(())
}
