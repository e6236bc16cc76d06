use std::error::Error;

use plotters::prelude::*;

use super::Series;

/// Scatter plot of the projected samples, one color per class
pub fn plot_classes(
    classes: &[(String, Series)],
    caption: &str,
    filename: &str,
    dims: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let mut points = classes.iter().flat_map(|(_, s)| s.iter());
    let first = points.next().ok_or("nothing to plot")?;
    let (mut x_min, mut x_max, mut y_min, mut y_max) = (first.0, first.0, first.1, first.1);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    let (x_min, x_max) = padded(x_min, x_max);
    let (y_min, y_max) = padded(y_min, y_max);
    info!("x: {}..{}, y: {}..{}", x_min, x_max, y_min, y_max);

    let root_area = BitMapBackend::new(filename, dims).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut cc0 = ChartBuilder::on(&root_area)
        .margin(5)
        .set_all_label_area_size(50)
        .caption(caption, ("sans-serif", 30).into_font().with_color(&BLACK))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    cc0.configure_mesh()
        .x_labels(20)
        .y_labels(20)
        .x_label_formatter(&|v| format!("{:.2}", v))
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()?;

    for (i, (name, series)) in classes.iter().enumerate() {
        let (r, g, b) = Palette99::COLORS[i % Palette99::COLORS.len()];
        let color = RGBColor(r, g, b);
        cc0.draw_series(series.iter().map(|&(x, y)| Circle::new((x, y), 5, color.filled())))?
            .label(name.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }
    cc0.configure_series_labels().border_style(&BLACK).draw()?;
    root_area.present()?;

    info!("successfully plotted to {}", filename);

    Ok(())
}

/// Widen a range by 5% on each side, never returning an empty range
fn padded(min: f64, max: f64) -> (f64, f64) {
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}
