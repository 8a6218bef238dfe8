use geo::Severity;

/// Fixed severity color table used for pin markers and the legend.
pub const fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "#22c55e",
        Severity::Medium => "#f97316",
        Severity::High => "#ef4444",
    }
}

/// Fixed severity weight table for the heat layer.
///
/// Low weighs zero so it never contributes; zero-weight samples are
/// excluded from the layer entirely.
pub const fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 0.0,
        Severity::Medium => 6.0,
        Severity::High => 10.0,
    }
}

/// Heat gradient from transparent yellow through solid red.
pub const HEAT_GRADIENT: [&str; 5] = [
    "rgba(255, 255, 0, 0)",
    "rgba(255, 255, 0, 1)",
    "rgba(255, 170, 0, 1)",
    "rgba(255, 85, 0, 1)",
    "rgba(255, 0, 0, 1)",
];

pub const HEAT_RADIUS: f64 = 20.0;
pub const HEAT_OPACITY: f64 = 0.75;
pub const HEAT_MAX_INTENSITY: f64 = 10.0;

/// Full-color vs. desaturated map skin.
///
/// Presentation only: the skin applies to the mapping surface independently
/// of overlay content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SurfaceStyle {
    #[default]
    Colored,
    Monotone,
}

/// One styler rule applied to every feature of the surface skin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Styler {
    pub saturation: i32,
}

const MONOTONE_STYLERS: [Styler; 1] = [Styler { saturation: -100 }];

impl SurfaceStyle {
    pub fn stylers(&self) -> &'static [Styler] {
        match self {
            SurfaceStyle::Colored => &[],
            SurfaceStyle::Monotone => &MONOTONE_STYLERS,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SurfaceStyle::Colored => SurfaceStyle::Monotone,
            SurfaceStyle::Monotone => SurfaceStyle::Colored,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Legend rows shown next to the map.
///
/// Low severity is excluded: it carries zero heat weight and is not worth
/// a legend row.
pub fn legend_entries() -> [LegendEntry; 2] {
    [
        LegendEntry {
            label: "High Severity",
            color: severity_color(Severity::High),
        },
        LegendEntry {
            label: "Medium Severity",
            color: severity_color(Severity::Medium),
        },
    ]
}
