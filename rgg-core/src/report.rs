//! Delimited tabular output of graph properties.
//!
//! A [`Report`] names its columns once and yields one [`ReportValue`] per
//! column for each record. [`TableWriter`] renders headers and rows with a
//! configurable delimiter and decimal precision; every line, the header
//! included, ends with a trailing delimiter.

use std::{
    fmt,
    io::{self, Write},
};

use crate::{average::AverageProperties, graph::GeometricGraph};

/// Default column separator.
pub const DEFAULT_DELIMITER: &str = ";";

/// Default number of decimal places for [`ReportValue::Decimal`].
pub const DEFAULT_PRECISION: usize = 9;

/// A single table cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReportValue {
    /// Rendered without decimals.
    Integer(u64),
    /// Rendered with the writer's fixed precision.
    Decimal(f64),
}

impl ReportValue {
    /// Renders the value with `precision` decimal places for decimals.
    ///
    /// # Examples
    /// ```
    /// use rgg_core::ReportValue;
    ///
    /// assert_eq!(ReportValue::Integer(7).render(3), "7");
    /// assert_eq!(ReportValue::Decimal(0.5).render(3), "0.500");
    /// ```
    #[must_use]
    pub fn render(self, precision: usize) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => format!("{value:.precision$}"),
        }
    }
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PRECISION))
    }
}

/// A record that can be written as one table row.
pub trait Report {
    /// Column names in output order.
    fn fields() -> &'static [&'static str];

    /// Cell values in the order of [`Report::fields`].
    fn values(&self) -> Vec<ReportValue>;
}

/// Writes [`Report`] records as delimited text.
///
/// # Examples
/// ```
/// use rgg_core::{AverageProperties, GeometricGraph, PositionSampler, Report, TableWriter};
///
/// let mut sampler = PositionSampler::seeded(3);
/// let graph = GeometricGraph::new(8, 0.4, 2, &mut sampler)?;
/// let average = AverageProperties::from_trials(&[graph])?;
///
/// let mut table = TableWriter::new(Vec::new()).with_precision(3);
/// table.write_header::<AverageProperties>()?;
/// table.write_row(&average)?;
/// let text = String::from_utf8(table.into_inner()).expect("utf-8 output");
/// let mut lines = text.lines();
/// assert!(lines.next().is_some_and(|header| header.starts_with("Dimensions;Vertices;")));
/// assert!(lines.next().is_some_and(|row| row.starts_with("2;8;0.400;")));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct TableWriter<W: Write> {
    writer: W,
    delimiter: String,
    precision: usize,
}

impl<W: Write> TableWriter<W> {
    /// Wraps `writer` with the default delimiter and precision.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            delimiter: DEFAULT_DELIMITER.to_owned(),
            precision: DEFAULT_PRECISION,
        }
    }

    /// Overrides the column separator.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Overrides the number of decimal places.
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Column separator in use.
    #[rustfmt::skip]
    pub fn delimiter(&self) -> &str { &self.delimiter }

    /// Decimal places in use.
    #[rustfmt::skip]
    pub fn precision(&self) -> usize { self.precision }

    /// Writes the column names of `R`.
    ///
    /// # Errors
    /// Propagates failures from the underlying writer.
    pub fn write_header<R: Report>(&mut self) -> io::Result<()> {
        for field in R::fields() {
            write!(self.writer, "{field}{}", self.delimiter)?;
        }
        writeln!(self.writer)
    }

    /// Writes the values of `record`.
    ///
    /// # Errors
    /// Propagates failures from the underlying writer.
    pub fn write_row<R: Report>(&mut self, record: &R) -> io::Result<()> {
        for value in record.values() {
            write!(self.writer, "{}{}", value.render(self.precision), self.delimiter)?;
        }
        writeln!(self.writer)
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    /// Propagates failures from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

const PROPERTY_FIELDS: &[&str] = &[
    "Dimensions",
    "Vertices",
    "Edge probability",
    "Connectivity prob.",
    "Edges",
    "Expected value of edge count",
    "Average degree",
    "Expected value of degree",
    "Density",
    "Average density",
    "Average path length",
    "Grouping factor",
    "Degree variance",
    "Normalized degree variance",
    "Average difference of vertex probability",
    "Vertex probability difference variance",
    "Components",
];

fn integer(value: usize) -> ReportValue {
    ReportValue::Integer(value as u64)
}

impl Report for AverageProperties {
    fn fields() -> &'static [&'static str] {
        PROPERTY_FIELDS
    }

    fn values(&self) -> Vec<ReportValue> {
        use ReportValue::Decimal;
        vec![
            integer(self.dimensions),
            integer(self.vertex_count),
            Decimal(self.xi),
            Decimal(self.connected_probability),
            Decimal(self.edge_count),
            Decimal(self.approximate.expected_value_of_edge_count),
            Decimal(self.average_degree),
            Decimal(self.approximate.expected_value_of_degree),
            Decimal(self.density),
            Decimal(self.approximate.average_density),
            Decimal(self.average_path_length),
            Decimal(self.grouping_factor),
            Decimal(self.degree_variance),
            Decimal(self.normalized_degree_variance),
            Decimal(self.average_vertex_probability),
            Decimal(self.vertex_probability_variance),
            Decimal(self.component_count),
        ]
    }
}

/// A single realisation reports connectivity as `0` or `1`.
impl Report for GeometricGraph {
    fn fields() -> &'static [&'static str] {
        PROPERTY_FIELDS
    }

    fn values(&self) -> Vec<ReportValue> {
        use ReportValue::Decimal;
        let exact = self.exact_properties();
        let approximate = self.approximate_properties();
        vec![
            integer(self.dimensions()),
            integer(self.vertex_count()),
            Decimal(self.xi()),
            integer(usize::from(exact.is_connected)),
            integer(exact.edge_count),
            Decimal(approximate.expected_value_of_edge_count),
            Decimal(exact.average_degree),
            Decimal(approximate.expected_value_of_degree),
            Decimal(exact.density),
            Decimal(approximate.average_density),
            Decimal(exact.average_path_length),
            Decimal(exact.grouping_factor),
            Decimal(exact.degree_variance),
            Decimal(exact.normalized_degree_variance),
            Decimal(exact.average_vertex_probability),
            Decimal(exact.vertex_probability_variance),
            integer(exact.component_count),
        ]
    }
}
