//! Growth-rate projection of a single measured execution time.
//!
//! [`project`] is pure: it scales one measurement across the fixed synthetic
//! input sizes `1..=5` according to the reported complexity class. Labels
//! outside the known vocabulary project as constant time.

use serde::Serialize;

/// Synthetic input sizes used for every projection.
pub const INPUT_SIZES: [u32; 5] = [1, 2, 3, 4, 5];

/// Recognized complexity classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityClass {
    Constant,
    Logarithmic,
    Linear,
    Quadratic,
}

impl ComplexityClass {
    /// Parses an exact label (`O(1)`, `O(log n)`, `O(n)`, `O(n^2)`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "O(1)" => Some(ComplexityClass::Constant),
            "O(log n)" => Some(ComplexityClass::Logarithmic),
            "O(n)" => Some(ComplexityClass::Linear),
            "O(n^2)" => Some(ComplexityClass::Quadratic),
            _ => None,
        }
    }

    fn scale(self, size: u32) -> f64 {
        let n = f64::from(size);
        match self {
            ComplexityClass::Constant => 1.0,
            ComplexityClass::Logarithmic => n.log2(),
            ComplexityClass::Linear => n,
            ComplexityClass::Quadratic => n * n,
        }
    }
}

/// One (input size, projected time) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub input_size: u32,
    pub projected_time: f64,
}

/// Projects `measured` seconds across [`INPUT_SIZES`].
pub fn project(label: &str, measured: f64) -> Vec<ProjectionPoint> {
    let class = ComplexityClass::from_label(label).unwrap_or(ComplexityClass::Constant);
    INPUT_SIZES
        .iter()
        .map(|&input_size| ProjectionPoint {
            input_size,
            projected_time: measured * class.scale(input_size),
        })
        .collect()
}

/// Line-chart dataset handed to a [`crate::chart::ChartHost`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub x_values: Vec<u32>,
    pub y_values: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
    pub x_title: String,
    pub y_title: String,
    pub begin_at_zero: bool,
}

impl ChartDataset {
    pub fn from_points(label: &str, points: &[ProjectionPoint]) -> Self {
        ChartDataset {
            label: format!("Time Complexity ({})", label),
            x_values: points.iter().map(|p| p.input_size).collect(),
            y_values: points.iter().map(|p| p.projected_time).collect(),
            border_color: "rgba(75, 192, 192, 1)".to_string(),
            background_color: "rgba(75, 192, 192, 0.2)".to_string(),
            fill: false,
            tension: 0.2,
            x_title: "Input Size".to_string(),
            y_title: "Execution Time (s)".to_string(),
            begin_at_zero: true,
        }
    }
}

/// Everything the complexity panel displays for one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub label: String,
    pub execution_time: f64,
    pub points: Vec<ProjectionPoint>,
    pub summary: String,
    pub dataset: ChartDataset,
}

impl ComplexityReport {
    pub fn new(label: &str, execution_time: f64) -> Self {
        let points = project(label, execution_time);
        let dataset = ChartDataset::from_points(label, &points);
        ComplexityReport {
            label: label.to_string(),
            execution_time,
            summary: format!(
                "Estimated Complexity: {}\nExecution Time: {} sec",
                label, execution_time
            ),
            points,
            dataset,
        }
    }
}
