//! Geometry for the single-bar risk chart.
//!
//! The vertical axis is the risk severity, `0` (Mild) to `3` (Profound),
//! padded by half a step on each side. The bar rises from the zero line to
//! the predicted level, so a Mild result draws no bar at all.

use serde::Serialize;

use ppd_core::models::risk::RiskLabel;

pub const WIDTH: f64 = 560.0;
pub const HEIGHT: f64 = 400.0;

const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

const Y_MIN: f64 = -0.5;
const Y_MAX: f64 = 3.5;

pub const TITLE: &str = "Predicted PPD Risk Level based on EPDS Score";
pub const Y_LABEL: &str = "Risk Level";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub label: String,
    pub y: f64,
    /// Baseline for the tick label text.
    pub text_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub color: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskChart {
    pub width: f64,
    pub height: f64,
    pub title: &'static str,
    pub y_label: &'static str,
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    pub title_x: f64,
    pub tick_label_x: f64,
    pub bar_label_x: f64,
    pub bar_label_y: f64,
    pub axis_label_y: f64,
    pub ticks: Vec<Tick>,
    pub bar: Bar,
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

/// Pixel row for a severity value.
pub fn y_for(value: f64) -> f64 {
    MARGIN_TOP + (Y_MAX - value) / (Y_MAX - Y_MIN) * plot_height()
}

impl RiskChart {
    pub fn for_label(label: RiskLabel) -> Self {
        let ticks = RiskLabel::ALL
            .iter()
            .map(|l| {
                let y = y_for(f64::from(l.severity()));
                Tick {
                    label: format!("{} ({})", l.as_str(), l.severity()),
                    y,
                    text_y: y + 4.0,
                }
            })
            .collect();

        let top = y_for(f64::from(label.severity()));
        let baseline = y_for(0.0);
        let bar_width = plot_width() * 0.4;
        let bar_x = MARGIN_LEFT + (plot_width() - bar_width) / 2.0;

        Self {
            width: WIDTH,
            height: HEIGHT,
            title: TITLE,
            y_label: Y_LABEL,
            plot_left: MARGIN_LEFT,
            plot_right: WIDTH - MARGIN_RIGHT,
            plot_top: MARGIN_TOP,
            plot_bottom: HEIGHT - MARGIN_BOTTOM,
            title_x: WIDTH / 2.0,
            tick_label_x: MARGIN_LEFT - 8.0,
            bar_label_x: bar_x + bar_width / 2.0,
            bar_label_y: HEIGHT - MARGIN_BOTTOM + 20.0,
            axis_label_y: MARGIN_TOP + plot_height() / 2.0,
            ticks,
            bar: Bar {
                label: label.as_str(),
                color: label.presentation().color,
                x: bar_x,
                y: top,
                width: bar_width,
                height: baseline - top,
            },
        }
    }
}
