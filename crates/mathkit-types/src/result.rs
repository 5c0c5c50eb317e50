//! Uniform answer structure returned by every calculator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answer produced by a calculator
///
/// `text` is the authoritative, fixed-precision answer. Errors are reported
/// through `text` as well, so it is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Human readable answer
    pub text: String,
    /// Ordered derivation trail; `**heading**` lines mark section headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    /// Optional chart description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_data: Option<PlotSpec>,
}

impl CalculationResult {
    /// Result carrying only answer text
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), steps: None, plot_data: None }
    }

    /// Attach a step trail; an empty trail is dropped
    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = if steps.is_empty() { None } else { Some(steps) };
        self
    }

    /// Attach a plot
    pub fn with_plot(mut self, plot: PlotSpec) -> Self {
        self.plot_data = Some(plot);
        self
    }
}

/// Chart kind understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    /// Connected x/y series
    Line,
    /// Categorical bars
    Bar,
    /// Unconnected x/y points
    Scatter,
    /// Proportions of a whole
    Doughnut,
}

impl PlotType {
    /// Lowercase name, as serialized
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Doughnut => "doughnut",
        }
    }
}

/// One point of a dataset: a bare value for categorical charts, or an x/y pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoint {
    /// x/y pair for line and scatter charts
    Point {
        /// Abscissa
        x: f64,
        /// Ordinate
        y: f64,
    },
    /// Bare value for bar and doughnut charts
    Value(f64),
}

/// A labelled data series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Legend label
    pub label: String,
    /// Series values
    pub data: Vec<DataPoint>,
    /// Per-dataset chart kind, e.g. a scatter overlay on a line chart
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PlotType>,
    /// Passthrough style hints (colors, point radius, ...)
    #[serde(flatten)]
    pub style: BTreeMap<String, serde_json::Value>,
}

impl Dataset {
    /// Empty dataset with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), data: Vec::new(), kind: None, style: BTreeMap::new() }
    }

    /// Replace the data with bare values
    pub fn values(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.data = values.into_iter().map(DataPoint::Value).collect();
        self
    }

    /// Replace the data with x/y pairs
    pub fn points(mut self, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.data = points.into_iter().map(|(x, y)| DataPoint::Point { x, y }).collect();
        self
    }

    /// Override the chart kind for this dataset
    pub fn kind(mut self, kind: PlotType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Add a style hint
    pub fn style(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.style.insert(key.to_string(), value.into());
        self
    }
}

/// Chart description attached to a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    /// Chart kind
    #[serde(rename = "type")]
    pub plot_type: PlotType,
    /// Category labels for bar and doughnut charts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Ordered data series
    pub datasets: Vec<Dataset>,
    /// Optional chart title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PlotSpec {
    /// Empty plot of the given kind
    pub fn new(plot_type: PlotType) -> Self {
        Self { plot_type, labels: None, datasets: Vec::new(), title: None }
    }

    /// Set category labels
    pub fn labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Append a dataset
    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
