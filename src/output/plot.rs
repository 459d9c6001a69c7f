// plot.rs - SVG distance distribution plot

use std::path::{Path, PathBuf};

use crate::core::OutlierResult;

/// Layout and colours of the distance plot
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub font_family: String,
    pub font_size: u32,
    pub point_color: String,
    pub outlier_color: String,
    pub mean_color: String,
    pub sigma_color: String,
    /// Number of bins in the z-score histogram inset
    pub histogram_bins: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin: 70.0,
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12,
            point_color: "#1f77b4".to_string(),
            outlier_color: "#d62728".to_string(),
            mean_color: "#2ca02c".to_string(),
            sigma_color: "#ff7f0e".to_string(),
            histogram_bins: 10,
        }
    }
}

/// Escape text for inclusion in SVG markup
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Linear map from a data range onto a pixel range
#[derive(Debug, Clone, Copy)]
struct Scale {
    d0: f64,
    d1: f64,
    p0: f64,
    p1: f64,
}

impl Scale {
    fn new(mut d0: f64, mut d1: f64, p0: f64, p1: f64) -> Self {
        // Pad flat ranges so a single value still lands mid-axis
        if (d1 - d0).abs() < f64::EPSILON {
            let pad = if d0.abs() > 0.0 { d0.abs() * 0.1 } else { 0.5 };
            d0 -= pad;
            d1 += pad;
        }
        Self { d0, d1, p0, p1 }
    }

    fn map(&self, value: f64) -> f64 {
        self.p0 + (value - self.d0) / (self.d1 - self.d0) * (self.p1 - self.p0)
    }
}

struct SvgBuilder<'a> {
    config: &'a PlotConfig,
    elements: Vec<String>,
}

impl<'a> SvgBuilder<'a> {
    fn new(config: &'a PlotConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
        }
    }

    fn add_background(&mut self) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="white"/>"#,
            self.config.width, self.config.height
        ));
    }

    fn add_text(&mut self, x: f64, y: f64, size: u32, anchor: &str, text: &str) {
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{}px" text-anchor="{}">{}</text>"#,
            x,
            y,
            self.config.font_family,
            size,
            anchor,
            escape(text)
        ));
    }

    fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, dashed: bool) {
        let dash = if dashed { r#" stroke-dasharray="8,4""# } else { "" };
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1.5"{}/>"#,
            x1, y1, x2, y2, color, dash
        ));
    }

    fn add_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str, opacity: f64) {
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" fill-opacity="{}"/>"#,
            cx, cy, r, color, opacity
        ));
    }

    fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}"/>"#,
            x, y, w, h, fill, stroke
        ));
    }

    fn finish(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.config.width, self.config.height, self.config.width, self.config.height
        );
        svg.push('\n');
        for element in self.elements {
            svg.push_str("  ");
            svg.push_str(&element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// Render the distance distribution for one alignment as an SVG document.
///
/// Mean distances are scattered by sequence index with outliers highlighted
/// and labelled, a solid line marks the mean and a dashed line the mean plus
/// three population standard deviations. An inset shows the z-score histogram.
pub fn render_distance_plot(alignment_name: &str, result: &OutlierResult, config: &PlotConfig) -> String {
    let means = result.mean_distances();
    let z_scores = result.z_scores();
    let outlier_indices = result.outlier_indices();
    let mean = result.mean;
    let three_sigma = mean + 3.0 * result.std_dev;

    let mut svg = SvgBuilder::new(config);
    svg.add_background();

    let left = config.margin;
    let right = config.width - config.margin / 2.0;
    let top = config.margin;
    let bottom = config.height - config.margin;

    svg.add_text(
        config.width / 2.0,
        top / 2.0,
        config.font_size + 4,
        "middle",
        &format!("Distance Distribution - {}", alignment_name),
    );

    let n = means.len();
    let x_scale = Scale::new(0.0, n.saturating_sub(1) as f64, left + 20.0, right - 20.0);
    let y_max = means.iter().copied().fold(three_sigma, f64::max);
    let y_min = means.iter().copied().fold(mean, f64::min);
    let y_scale = Scale::new(y_min, y_max, bottom - 20.0, top + 20.0);

    // Axes and labels
    svg.add_line(left, bottom, right, bottom, "black", false);
    svg.add_line(left, top, left, bottom, "black", false);
    svg.add_text((left + right) / 2.0, bottom + 40.0, config.font_size, "middle", "Sequence Index");
    svg.add_text(left - 45.0, (top + bottom) / 2.0, config.font_size, "middle", "Avg Distance");
    for (value, label_y) in [(y_scale.d0, bottom - 20.0), (y_scale.d1, top + 20.0)] {
        svg.add_text(left - 5.0, label_y, config.font_size - 2, "end", &format!("{:.4}", value));
    }

    let mean_y = y_scale.map(mean);
    svg.add_line(left, mean_y, right, mean_y, &config.mean_color, false);
    let sigma_y = y_scale.map(three_sigma);
    svg.add_line(left, sigma_y, right, sigma_y, &config.sigma_color, true);

    for (i, &value) in means.iter().enumerate() {
        svg.add_circle(x_scale.map(i as f64), y_scale.map(value), 4.0, &config.point_color, 0.7);
    }
    for &i in &outlier_indices {
        let (x, y) = (x_scale.map(i as f64), y_scale.map(means[i]));
        svg.add_circle(x, y, 8.0, &config.outlier_color, 1.0);
        svg.add_text(x, y - 12.0, config.font_size, "middle", &result.statistics[i].sequence_id);
    }

    // Legend
    let legend_x = right - 260.0;
    let mut legend_y = top + 10.0;
    svg.add_line(legend_x, legend_y, legend_x + 30.0, legend_y, &config.mean_color, false);
    svg.add_text(legend_x + 36.0, legend_y + 4.0, config.font_size, "start", &format!("Mean distance: {:.4}", mean));
    legend_y += 20.0;
    svg.add_line(legend_x, legend_y, legend_x + 30.0, legend_y, &config.sigma_color, true);
    svg.add_text(legend_x + 36.0, legend_y + 4.0, config.font_size, "start", "3σ threshold");
    if !outlier_indices.is_empty() {
        legend_y += 20.0;
        svg.add_circle(legend_x + 15.0, legend_y, 6.0, &config.outlier_color, 1.0);
        svg.add_text(legend_x + 36.0, legend_y + 4.0, config.font_size, "start", "Outliers");
    }

    render_histogram(&mut svg, &z_scores, config);
    svg.finish()
}

/// Inset z-score histogram in the lower left of the plot area
fn render_histogram(svg: &mut SvgBuilder<'_>, z_scores: &[f64], config: &PlotConfig) {
    let bins = config.histogram_bins.max(1);
    let inset_w = config.width * 0.3;
    let inset_h = config.height * 0.25;
    let inset_x = config.margin + 30.0;
    let inset_y = config.height - config.margin - inset_h - 30.0;

    svg.add_rect(inset_x, inset_y, inset_w, inset_h, "white", "#999999");
    svg.add_text(inset_x + inset_w / 2.0, inset_y - 6.0, config.font_size, "middle", "Z-score Distribution");

    let lo = z_scores.iter().copied().fold(f64::INFINITY, f64::min).min(3.0);
    let hi = z_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(3.0);
    let x_scale = Scale::new(lo, hi, inset_x + 5.0, inset_x + inset_w - 5.0);
    let width = (x_scale.d1 - x_scale.d0) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &z in z_scores {
        let bin = (((z - x_scale.d0) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1) as f64;

    for (bin, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let x0 = x_scale.map(x_scale.d0 + bin as f64 * width);
        let x1 = x_scale.map(x_scale.d0 + (bin + 1) as f64 * width);
        let h = (inset_h - 10.0) * count as f64 / max_count;
        svg.add_rect(x0, inset_y + inset_h - h, (x1 - x0).max(1.0), h, &config.point_color, "white");
    }

    let marker = x_scale.map(3.0);
    svg.add_line(marker, inset_y, marker, inset_y + inset_h, &config.outlier_color, true);
    svg.add_text(marker + 4.0, inset_y + 12.0, config.font_size - 2, "start", "Z=3");
}

/// Write `<alignment_name>_distance_plot.svg` into `output_dir` and return its path
pub fn write_distance_plot(output_dir: &Path, alignment_name: &str, result: &OutlierResult) -> Result<PathBuf, String> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        format!("Failed to create output directory '{}': {}", output_dir.display(), e)
    })?;
    let path = output_dir.join(format!("{}_distance_plot.svg", alignment_name));
    let svg = render_distance_plot(alignment_name, result, &PlotConfig::default());
    std::fs::write(&path, svg)
        .map_err(|e| format!("Failed to write plot '{}': {}", path.display(), e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{spread_stats, SequenceStatistic};

    fn result(values: &[(&str, f64, f64)], z_threshold: f64) -> OutlierResult {
        let statistics: Vec<_> = values
            .iter()
            .map(|(id, mean_distance, z_score)| SequenceStatistic {
                sequence_id: id.to_string(),
                mean_distance: *mean_distance,
                z_score: *z_score,
            })
            .collect();
        let means: Vec<f64> = statistics.iter().map(|s| s.mean_distance).collect();
        let (mean, std_dev) = spread_stats(&means);
        let outliers = statistics
            .iter()
            .filter(|s| std_dev > 0.0 && s.z_score > z_threshold)
            .cloned()
            .collect();
        OutlierResult {
            z_threshold,
            mean,
            std_dev,
            statistics,
            outliers,
        }
    }

    #[test]
    fn test_plot_marks_outliers() {
        let r = result(
            &[("A", 0.333, -0.577), ("B", 0.333, -0.577), ("C", 0.333, -0.577), ("D<x>", 1.0, 1.732)],
            1.5,
        );
        let svg = render_distance_plot("gene1", &r, &PlotConfig::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Distance Distribution - gene1"));
        assert!(svg.contains("D&lt;x&gt;"));
        assert!(svg.contains(">Outliers<"));
        assert!(svg.contains("Z-score Distribution"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_plot_handles_zero_variance() {
        let r = result(&[("A", 0.0, 0.0), ("B", 0.0, 0.0), ("C", 0.0, 0.0)], 3.0);
        let svg = render_distance_plot("flat", &r, &PlotConfig::default());
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
        assert!(!svg.contains(">Outliers<"));
    }

    #[test]
    fn test_write_distance_plot() {
        let dir = tempfile::tempdir().unwrap();
        let r = result(&[("A", 0.1, -1.0), ("B", 0.3, 1.0)], 3.0);
        let path = write_distance_plot(dir.path(), "cox1", &r).unwrap();
        assert_eq!(path, dir.path().join("cox1_distance_plot.svg"));
        assert!(std::fs::read_to_string(path).unwrap().contains("<circle"));
    }
}
