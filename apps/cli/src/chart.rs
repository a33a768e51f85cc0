//! Text trend charts for the dashboard.

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per value, scaled between the series min and max.
///
/// Series shorter than two points render as an empty string. A flat series
/// has its range widened by one so every point sits on the lowest level.
pub fn sparkline(values: &[f64]) -> String {
    if values.len() < 2 {
        return String::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        max += 1.0;
    }
    let top = (LEVELS.len() - 1) as f64;
    values
        .iter()
        .map(|v| {
            let level = ((v - min) / (max - min) * top).round();
            LEVELS[(level.max(0.0) as usize).min(LEVELS.len() - 1)]
        })
        .collect()
}

/// Labelled chart line with the series range, e.g. `GDP trend  ▁▃█  [9000 .. 10100]`.
pub fn trend_line(label: &str, values: &[f64], precision: usize) -> String {
    let line = sparkline(values);
    if line.is_empty() {
        return format!("{label:<14} (not enough data)");
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    format!("{label:<14} {line}  [{min:.precision$} .. {max:.precision$}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_is_blank() {
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[1.0]), "");
    }

    #[test]
    fn flat_series_sits_low() {
        assert_eq!(sparkline(&[5.0, 5.0, 5.0]), "▁▁▁");
    }

    #[test]
    fn rising_series_spans_range() {
        let s: Vec<char> = sparkline(&[0.0, 50.0, 100.0]).chars().collect();
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], '▁');
        assert_eq!(s[2], '█');
        assert!(s[1] != '▁' && s[1] != '█');
    }

    #[test]
    fn trend_line_shows_range() {
        let line = trend_line("GDP trend", &[9000.0, 10100.0], 0);
        assert!(line.starts_with("GDP trend"));
        assert!(line.ends_with("[9000 .. 10100]"));
        assert!(trend_line("Support", &[50.0], 1).contains("not enough data"));
    }
}
