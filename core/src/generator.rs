use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::fixed::{quantize, Rounding, FIXED_SCALE, I};

/// Angular range the samples are spread over. Sample `i` of `N` sits at
/// `i * (span / N)` degrees, so the end of the range is never reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    FullTurn,
    QuarterTurn,
}

impl Domain {
    pub fn span_degrees(self) -> f64 {
        match self {
            Domain::FullTurn => 360.0,
            Domain::QuarterTurn => 90.0,
        }
    }
}

/// Real-valued function producing one column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Source {
    /// `amplitude * sin(theta)`
    Sin { amplitude: f64 },
    /// `amplitude * cos(theta)`
    Cos { amplitude: f64 },
    /// Same value for every sample.
    Constant { value: f64 },
    /// The sample index itself.
    Index,
    /// Arbitrary function of the angle in radians. Not expressible in JSON.
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Source {
    #[inline]
    pub fn eval(&self, index: u32, radians: f64) -> f64 {
        match *self {
            Source::Sin { amplitude } => amplitude * radians.sin(),
            Source::Cos { amplitude } => amplitude * radians.cos(),
            Source::Constant { value } => value,
            Source::Index => index as f64,
            Source::Custom(f) => f(radians),
        }
    }

    fn check(&self, column: &str) -> Result<()> {
        let (name, v) = match *self {
            Source::Sin { amplitude } | Source::Cos { amplitude } => ("amplitude", amplitude),
            Source::Constant { value } => ("constant", value),
            Source::Index | Source::Custom(_) => return Ok(()),
        };
        if !v.is_finite() {
            return Err(TableError::invalid(
                name,
                format!("column '{}' has non-finite value {}", column, v),
            ));
        }
        Ok(())
    }
}

fn default_scale() -> u32 {
    FIXED_SCALE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub name: String,
    pub source: Source,
    /// Raw units per 1.0. Use 1 for columns that are already raw (indices, angle units).
    #[serde(default = "default_scale")]
    pub scale: u32,
    #[serde(default)]
    pub rounding: Rounding,
}

impl ColumnSpec {
    /// Column at the default Q.8 scale, truncated.
    pub fn new(name: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            source,
            scale: FIXED_SCALE,
            rounding: Rounding::Truncate,
        }
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    pub samples: u32,
    #[serde(default)]
    pub domain: Domain,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, samples: u32, domain: Domain) -> Self {
        Self {
            name: name.into(),
            samples,
            domain,
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(TableError::invalid(
                "samples",
                format!("table '{}' must have at least one sample", self.name),
            ));
        }
        if self.columns.is_empty() {
            return Err(TableError::invalid(
                "columns",
                format!("table '{}' has no columns", self.name),
            ));
        }
        for col in &self.columns {
            if col.scale == 0 {
                return Err(TableError::invalid(
                    "scale",
                    format!("column '{}' has zero scale", col.name),
                ));
            }
            col.source.check(&col.name)?;
        }
        Ok(())
    }
}

/// Quantized table, row-major. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleTable {
    name: String,
    columns: Vec<String>,
    values: Vec<I>,
}

impl SampleTable {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in declared order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.values.len() / self.arity()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[I]> {
        self.rows().nth(index)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, I> {
        self.values.chunks_exact(self.arity())
    }

    /// Values of one column in index order.
    pub fn column(&self, name: &str) -> Option<Vec<I>> {
        let k = self.columns.iter().position(|c| c == name)?;
        Some(self.rows().map(|r| r[k]).collect())
    }

    pub fn values(&self) -> &[I] {
        &self.values
    }
}

/// Sample every column of `spec` at each index in `[0, samples)`.
///
/// The whole table is rejected if any value fails to quantize.
pub fn generate(spec: &TableSpec) -> Result<SampleTable> {
    spec.validate()?;

    let step = spec.domain.span_degrees() / spec.samples as f64;
    let mut values = Vec::with_capacity(spec.samples as usize * spec.columns.len());

    for i in 0..spec.samples {
        let radians = (i as f64 * step).to_radians();
        for col in &spec.columns {
            let real = col.source.eval(i, radians);
            let raw = quantize(real, col.scale, col.rounding).map_err(|e| match e {
                TableError::Overflow { value, .. } => TableError::Overflow {
                    table: spec.name.clone(),
                    column: col.name.clone(),
                    index: i,
                    value,
                },
                other => other,
            })?;
            values.push(raw);
        }
    }

    Ok(SampleTable {
        name: spec.name.clone(),
        columns: spec.columns.iter().map(|c| c.name.clone()).collect(),
        values,
    })
}
