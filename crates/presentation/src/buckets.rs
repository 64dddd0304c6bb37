use serde::Serialize;

/// The discrete color class of a correlation cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorBucket {
    StrongPositive,
    ModeratePositive,
    WeakPositive,
    Neutral,
    WeakNegative,
    ModerateNegative,
    StrongNegative,
    /// Hidden diagonal on a black box.
    Opaque,
    /// Hidden diagonal with no background.
    Transparent,
}

impl ColorBucket {
    /// Lower bounds of the value buckets, strongest first. Every bound is exclusive.
    const THRESHOLDS: [(f64, ColorBucket); 6] = [
        (0.7, ColorBucket::StrongPositive),
        (0.4, ColorBucket::ModeratePositive),
        (0.1, ColorBucket::WeakPositive),
        (-0.1, ColorBucket::Neutral),
        (-0.4, ColorBucket::WeakNegative),
        (-0.7, ColorBucket::ModerateNegative),
    ];

    pub fn for_correlation(correlation: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(bound, _)| correlation > *bound)
            .map(|(_, bucket)| *bucket)
            .unwrap_or(ColorBucket::StrongNegative)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBucket::StrongPositive => "strongPositive",
            ColorBucket::ModeratePositive => "moderatePositive",
            ColorBucket::WeakPositive => "weakPositive",
            ColorBucket::Neutral => "neutral",
            ColorBucket::WeakNegative => "weakNegative",
            ColorBucket::ModerateNegative => "moderateNegative",
            ColorBucket::StrongNegative => "strongNegative",
            ColorBucket::Opaque => "opaque",
            ColorBucket::Transparent => "transparent",
        }
    }
}

/// Foreground contrast for a cell's text against its bucket color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextTone {
    /// White text on a saturated background.
    Light,
    /// Dark text on a near-neutral background.
    Dark,
    Medium,
    /// Nothing is printed in the cell.
    None,
}

impl TextTone {
    pub fn for_correlation(correlation: f64) -> Self {
        let magnitude = correlation.abs();
        if magnitude > 0.4 {
            TextTone::Light
        } else if magnitude <= 0.1 {
            TextTone::Dark
        } else {
            TextTone::Medium
        }
    }
}

/// The color class of a stock's percent change, used for stock row headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceBucket {
    StrongGain,
    Gain,
    SlightGain,
    SlightLoss,
    Loss,
    StrongLoss,
}

impl PerformanceBucket {
    const THRESHOLDS: [(f64, PerformanceBucket); 5] = [
        (5.0, PerformanceBucket::StrongGain),
        (2.0, PerformanceBucket::Gain),
        (0.0, PerformanceBucket::SlightGain),
        (-2.0, PerformanceBucket::SlightLoss),
        (-5.0, PerformanceBucket::Loss),
    ];

    pub fn for_change(change_percent: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(bound, _)| change_percent > *bound)
            .map(|(_, bucket)| *bucket)
            .unwrap_or(PerformanceBucket::StrongLoss)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceBucket::StrongGain => "strongGain",
            PerformanceBucket::Gain => "gain",
            PerformanceBucket::SlightGain => "slightGain",
            PerformanceBucket::SlightLoss => "slightLoss",
            PerformanceBucket::Loss => "loss",
            PerformanceBucket::StrongLoss => "strongLoss",
        }
    }
}

/// One legend swatch: the bucket key and the range it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub bucket: &'static str,
    pub range: String,
}

/// Correlation legend, strongest positive first.
pub fn correlation_legend() -> Vec<LegendEntry> {
    legend(
        ColorBucket::THRESHOLDS.iter().map(|(b, k)| (*b, k.as_str())),
        ColorBucket::StrongNegative.as_str(),
        |v| format!("{v:+.1}"),
    )
}

/// Performance legend for the stocks level, biggest gain first.
pub fn performance_legend() -> Vec<LegendEntry> {
    legend(
        PerformanceBucket::THRESHOLDS.iter().map(|(b, k)| (*b, k.as_str())),
        PerformanceBucket::StrongLoss.as_str(),
        |v| format!("{v:+.0}%"),
    )
}

fn legend(
    bounds: impl Iterator<Item = (f64, &'static str)>,
    floor: &'static str,
    fmt: impl Fn(f64) -> String,
) -> Vec<LegendEntry> {
    let mut entries = Vec::new();
    let mut upper: Option<f64> = None;

    for (bound, bucket) in bounds {
        let range = match upper {
            None => format!("> {}", fmt(bound)),
            Some(upper) => format!("{} .. {}", fmt(bound), fmt(upper)),
        };
        entries.push(LegendEntry { bucket, range });
        upper = Some(bound);
    }

    if let Some(lowest) = upper {
        entries.push(LegendEntry {
            bucket: floor,
            range: format!("<= {}", fmt(lowest)),
        });
    }
    entries
}
