//! Evaluation services for the calculator table.
//!
//! This module provides the one generic routine every calculator runs
//! through: read the input texts, parse them, apply the formula, format the
//! readings and write them to the output fields. It also provides batch
//! evaluation of CSV rows and the report used for scripted evaluation.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::Serialize;

use super::errors::{DomainError, DomainResult};
use super::format::PLACEHOLDER;
use super::models::{Calculator, Page};
use super::parser::parse_number;
use super::registry::find_calculator;

/// Anything that can supply input text by field id and display results by
/// output id.
pub trait FieldSurface {
    /// Current text of an input field, `None` if the surface has no such field.
    fn read(&self, id: &str) -> Option<&str>;
    /// Replaces the text shown by an output field.
    fn write(&mut self, id: &str, text: String);
}

/// Runs calculators against raw field text.
///
/// # Examples
///
/// ```
/// use quickcalc::domain::{find_calculator, Evaluator};
///
/// let divider = find_calculator("divider").unwrap();
/// let outputs = Evaluator::evaluate(divider, &["5", "1000", "2000"]);
/// assert_eq!(outputs, vec!["3.333", "1.67"]);
/// ```
pub struct Evaluator;

impl Evaluator {
    /// Parses `raw` (one text per input, in table order), applies the
    /// formula and renders one string per output. Missing trailing texts
    /// count as empty fields.
    pub fn evaluate<S: AsRef<str>>(calculator: &Calculator, raw: &[S]) -> Vec<String> {
        let values: Vec<Option<f64>> = (0..calculator.inputs.len())
            .map(|index| raw.get(index).and_then(|text| parse_number(text.as_ref())))
            .collect();

        let readings = (calculator.formula)(&values);
        calculator
            .outputs
            .iter()
            .enumerate()
            .map(|(index, field)| {
                readings
                    .get(index)
                    .map(|reading| reading.render(field.precision))
                    .unwrap_or_else(|| PLACEHOLDER.to_string())
            })
            .collect()
    }

    /// Reads every input of `calculator` from the surface, evaluates it and
    /// writes every output back.
    pub fn recompute(calculator: &Calculator, surface: &mut impl FieldSurface) {
        let raw: Vec<String> = calculator
            .inputs
            .iter()
            .map(|field| surface.read(field.id).unwrap_or("").to_string())
            .collect();

        let results = Self::evaluate(calculator, raw.as_slice());
        log::trace!("recomputed {}: {:?}", calculator.key, results);

        for (field, text) in calculator.outputs.iter().zip(results) {
            surface.write(field.id, text);
        }
    }
}

/// Parses an `id=value` override as given on the command line.
pub fn parse_assignment(text: &str) -> DomainResult<(&str, &str)> {
    match text.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => Ok((id.trim(), value)),
        _ => Err(DomainError::InvalidAssignment(text.to_string())),
    }
}

/// Result of evaluating one calculator from its defaults plus overrides.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub calculator: &'static str,
    pub title: &'static str,
    pub inputs: BTreeMap<&'static str, String>,
    pub outputs: BTreeMap<&'static str, String>,
    #[serde(skip)]
    lines: Vec<String>,
}

impl EvalReport {
    /// Evaluates `key` starting from the default inputs of `page` with
    /// `overrides` (`id=value`) applied in order.
    pub fn build<S: AsRef<str>>(page: &Page, key: &str, overrides: &[S]) -> DomainResult<Self> {
        let calculator =
            find_calculator(key).ok_or_else(|| DomainError::UnknownCalculator(key.to_string()))?;

        let mut raw: Vec<String> = calculator
            .inputs
            .iter()
            .map(|f| page.default_text(f).to_string())
            .collect();
        for text in overrides {
            let (id, value) = parse_assignment(text.as_ref())?;
            let index = calculator.input_index(id).ok_or_else(|| DomainError::UnknownField {
                calculator: key.to_string(),
                field: id.to_string(),
            })?;
            raw[index] = value.to_string();
        }

        let results = Evaluator::evaluate(calculator, raw.as_slice());
        let lines = calculator
            .outputs
            .iter()
            .zip(&results)
            .map(|(field, text)| format!("{}: {} {}", field.label, text, field.unit).trim_end().to_string())
            .collect();

        Ok(Self {
            calculator: calculator.key,
            title: calculator.title,
            inputs: calculator.inputs.iter().map(|f| f.id).zip(raw).collect(),
            outputs: calculator.outputs.iter().map(|f| f.id).zip(results).collect(),
            lines,
        })
    }

    /// Human-readable `label: value unit` lines, in output order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Evaluates a calculator over every row of a CSV table.
pub struct BatchEvaluator;

impl BatchEvaluator {
    /// Reads rows whose header names input ids, and writes the inputs (in
    /// table order) followed by one column per output. Columns missing from
    /// the input behave as empty fields. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Fails on a header naming an unknown field, or on CSV and I/O errors.
    pub fn run<R: Read, W: Write>(calculator: &Calculator, reader: R, writer: W) -> DomainResult<usize> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut columns = Vec::with_capacity(headers.len());
        for name in headers.iter() {
            let index = calculator.input_index(name).ok_or_else(|| DomainError::UnknownField {
                calculator: calculator.key.to_string(),
                field: name.to_string(),
            })?;
            columns.push(index);
        }

        let mut csv_writer = csv::Writer::from_writer(writer);
        let header_row: Vec<&str> = calculator
            .inputs
            .iter()
            .map(|f| f.id)
            .chain(calculator.outputs.iter().map(|f| f.id))
            .collect();
        csv_writer.write_record(&header_row)?;

        let mut rows = 0;
        for record in csv_reader.records() {
            let record = record?;
            let mut raw = vec![String::new(); calculator.inputs.len()];
            for (column, text) in columns.iter().zip(record.iter()) {
                raw[*column] = text.to_string();
            }

            let results = Evaluator::evaluate(calculator, raw.as_slice());
            csv_writer.write_record(raw.iter().chain(results.iter()))?;
            rows += 1;
        }

        csv_writer.flush()?;
        log::info!("evaluated {} rows with {}", rows, calculator.key);
        Ok(rows)
    }
}
