//! Typed columns and column classification.

use serde::{Deserialize, Serialize};

/// Which family of drift tests applies to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Numeric values: KS, Wasserstein and PSI
    Continuous,
    /// Labels: Chi-square
    Categorical,
}

impl ColumnKind {
    /// Integer and real-valued columns are continuous, everything else categorical.
    pub fn classify(values: &ColumnValues) -> Self {
        match values {
            ColumnValues::Integer(_) | ColumnValues::Float(_) => ColumnKind::Continuous,
            ColumnValues::Boolean(_) | ColumnValues::Text(_) => ColumnKind::Categorical,
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Continuous => write!(f, "continuous"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Column storage. Missing values are `NaN` (floats) or `""` (text).
/// Infinite floats are kept here but count as missing in numeric views.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Boolean(Vec<bool>),
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short type name used in logs and summaries
    pub fn dtype(&self) -> &'static str {
        match self {
            ColumnValues::Integer(_) => "int64",
            ColumnValues::Float(_) => "float64",
            ColumnValues::Boolean(_) => "bool",
            ColumnValues::Text(_) => "text",
        }
    }

    /// Finite values as `f64`, or `None` for non-numeric columns
    pub fn numeric(&self) -> Option<Vec<f64>> {
        match self {
            ColumnValues::Integer(v) => Some(v.iter().map(|&x| x as f64).collect()),
            ColumnValues::Float(v) => Some(v.iter().copied().filter(|x| x.is_finite()).collect()),
            ColumnValues::Boolean(_) | ColumnValues::Text(_) => None,
        }
    }

    /// Non-missing values rendered as category labels
    pub fn categories(&self) -> Vec<String> {
        match self {
            ColumnValues::Integer(v) => v.iter().map(ToString::to_string).collect(),
            ColumnValues::Float(v) => {
                v.iter().filter(|x| !x.is_nan()).map(ToString::to_string).collect()
            }
            ColumnValues::Boolean(v) => v.iter().map(ToString::to_string).collect(),
            ColumnValues::Text(v) => v.iter().filter(|s| !s.is_empty()).cloned().collect(),
        }
    }

    fn slice_from(&self, start: usize) -> Self {
        match self {
            ColumnValues::Integer(v) => ColumnValues::Integer(v[start..].to_vec()),
            ColumnValues::Float(v) => ColumnValues::Float(v[start..].to_vec()),
            ColumnValues::Boolean(v) => ColumnValues::Boolean(v[start..].to_vec()),
            ColumnValues::Text(v) => ColumnValues::Text(v[start..].to_vec()),
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self { name: name.into(), values }
    }

    pub fn integer(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnValues::Integer(values))
    }

    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnValues::Float(values))
    }

    pub fn boolean(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self::new(name, ColumnValues::Boolean(values))
    }

    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, ColumnValues::Text(values.into_iter().map(Into::into).collect()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn kind(&self) -> ColumnKind {
        ColumnKind::classify(&self.values)
    }

    pub(super) fn slice_from(&self, start: usize) -> Self {
        Self { name: self.name.clone(), values: self.values.slice_from(start) }
    }
}
