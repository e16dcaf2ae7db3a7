//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Metric;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for warnings (missing store, coerced filters).
    pub warning: Color,
    /// Color for errors and "down" statuses.
    pub critical: Color,
    /// Color for "up" statuses.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Line colors for the cpu, memory and disk series.
    pub series: [Color; 3],
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            series: [Color::Cyan, Color::Magenta, Color::Yellow],
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            series: [Color::Blue, Color::Magenta, Color::Rgb(176, 120, 0)],
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a `ping_status` cell.
    ///
    /// Common reachability words get status colors; anything else is plain.
    pub fn ping_style(&self, status: &str) -> Style {
        match status.to_ascii_lowercase().as_str() {
            "up" | "ok" | "online" | "reachable" | "success" => Style::default().fg(self.healthy),
            "down" | "offline" | "unreachable" | "timeout" | "fail" | "failed" => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            _ => Style::default(),
        }
    }

    /// Line style for a chart series.
    pub fn metric_style(&self, metric: Metric) -> Style {
        let color = match metric {
            Metric::Cpu => self.series[0],
            Metric::Memory => self.series[1],
            Metric::Disk => self.series[2],
        };
        Style::default().fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_style() {
        let theme = Theme::dark();
        assert_eq!(theme.ping_style("up").fg, Some(Color::Green));
        assert_eq!(theme.ping_style("DOWN").fg, Some(Color::Red));
        assert_eq!(theme.ping_style("degraded"), Style::default());
    }

    #[test]
    fn test_metric_styles_are_distinct() {
        let theme = Theme::light();
        let colors: Vec<_> = Metric::ALL.iter().map(|m| theme.metric_style(*m).fg).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
