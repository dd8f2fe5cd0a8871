use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;

use crate::errors::AppError;
use crate::external::history_provider::Interval;
use crate::models::price::PriceSeries;
use crate::models::snapshot::SnapshotOptions;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;

fn chart_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Chart(e.to_string())
}

/// Render the close-price series as a PNG line chart and return it
/// base64-encoded for inline embedding.
///
/// The drawing area borrows the RGB buffer inside `draw`, so it is
/// released before encoding on success and failure paths alike; nothing
/// chart-related outlives the request.
pub fn render_price_chart(
    ticker: &str,
    series: &PriceSeries,
    options: &SnapshotOptions,
) -> Result<String, AppError> {
    let mut rgb = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    draw(&mut rgb, ticker, series, options)?;

    let image = image::RgbImage::from_raw(WIDTH, HEIGHT, rgb)
        .ok_or_else(|| AppError::Chart("buffer size mismatch".to_string()))?;
    let mut png = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageOutputFormat::Png,
        )
        .map_err(chart_err)?;

    Ok(BASE64.encode(&png))
}

fn draw(
    rgb: &mut [u8],
    ticker: &str,
    series: &PriceSeries,
    options: &SnapshotOptions,
) -> Result<(), AppError> {
    let points = series.points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(AppError::Chart("empty series".to_string()));
    };

    let x_start = first.at;
    let mut x_end = last.at;
    if x_end <= x_start {
        x_end = x_start + Duration::hours(1);
    }

    let (Some(mut lo), Some(mut hi)) = (series.min_close(), series.max_close()) else {
        return Err(AppError::Chart("empty series".to_string()));
    };
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    let (y_lo, y_hi) = (lo - pad, hi + pad);

    let x_formatter: fn(&DateTime<Utc>) -> String = match options.interval {
        Interval::Daily => |at| at.format("%m-%d").to_string(),
        Interval::Hourly => |at| at.format("%m-%d %H:%M").to_string(),
    };
    let y_currency = |v: &f64| format!("${v:.2}");

    let x_desc = match options.interval {
        Interval::Daily => "Date",
        Interval::Hourly => "Time",
    };

    let x_label_count = if options.thin_x_labels {
        (points.len() / 7).max(2)
    } else {
        6
    };

    let root = BitMapBackend::with_buffer(rgb, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let caption = format!("{} - Last {} Days", ticker, options.window_days);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22).into_font())
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(x_start..x_end, y_lo..y_hi)
        .map_err(chart_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(x_label_count)
        .y_labels(6)
        .x_desc(x_desc)
        .y_desc("Price ($)")
        .x_label_formatter(&x_formatter)
        .label_style(("sans-serif", 13).into_font());
    if options.currency_ticks {
        mesh.y_label_formatter(&y_currency);
    }
    if !options.grid_lines {
        mesh.disable_x_mesh();
        mesh.disable_y_mesh();
    }
    mesh.draw().map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.at, p.close)),
            &BLUE,
        ))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}
