use std::collections::{BTreeMap, HashMap};
use serde::Serialize;

use super::format::{format_number, PLACEHOLDER};
use super::registry::CALCULATORS;
use super::services::{Evaluator, FieldSurface};

/// Outcome of a formula for a single output field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Inputs were invalid or the formula is undefined here
    Missing,
    Value(f64),
    /// Sensor reads as an open circuit (infinite resistance)
    Open,
    /// Sensor reads as a short circuit (zero resistance)
    Short,
}

impl Reading {
    /// Wraps an optional value, mapping `None` to [`Reading::Missing`].
    pub fn from_option(value: Option<f64>) -> Self {
        value.map(Reading::Value).unwrap_or(Reading::Missing)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Renders the reading for display at the given precision.
    pub fn render(&self, precision: Option<usize>) -> String {
        match self {
            Reading::Missing => PLACEHOLDER.to_string(),
            Reading::Value(v) => format_number(Some(*v), precision),
            Reading::Open => "∞".to_string(),
            Reading::Short => "0".to_string(),
        }
    }
}

/// A numeric text input on the page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InputField {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    /// Text the field holds on a fresh page
    pub default: &'static str,
}

/// A display element written by a calculator.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutputField {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    /// Fixed decimal places, or `None` for automatic formatting
    pub precision: Option<usize>,
}

/// Closed-form formula: one optional value per input in, one reading per
/// output back, both in table order.
pub type Formula = fn(&[Option<f64>]) -> Vec<Reading>;

/// One entry of the calculator table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Calculator {
    pub key: &'static str,
    pub title: &'static str,
    pub inputs: &'static [InputField],
    pub outputs: &'static [OutputField],
    #[serde(skip)]
    pub formula: Formula,
}

impl Calculator {
    pub fn input(&self, id: &str) -> Option<&InputField> {
        self.inputs.iter().find(|field| field.id == id)
    }

    pub fn input_index(&self, id: &str) -> Option<usize> {
        self.inputs.iter().position(|field| field.id == id)
    }
}

/// Current text of every input and output field, keyed by field id.
#[derive(Debug, Clone, Default)]
pub struct Page {
    fields: HashMap<String, String>,
    outputs: HashMap<String, String>,
    /// Default text replacing the table's, for the fields listed
    overrides: HashMap<String, String>,
}

impl Page {
    /// Builds a page holding every calculator's default inputs, with all
    /// outputs evaluated once.
    pub fn with_defaults() -> Self {
        Self::with_overrides(&BTreeMap::new())
    }

    /// Like [`Page::with_defaults`], but `overrides` (field id to text)
    /// replace the built-in default of the fields they name. Resets go back
    /// to the overridden text.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut page = Self {
            overrides: overrides.iter().map(|(id, text)| (id.clone(), text.clone())).collect(),
            ..Self::default()
        };
        for field in CALCULATORS.iter().flat_map(|calculator| calculator.inputs) {
            let text = page.default_text(field).to_string();
            page.set_field(field.id, text);
        }
        page.recompute_all();
        page
    }

    /// Text `field` holds on a fresh page or after a reset.
    pub fn default_text(&self, field: &InputField) -> &str {
        self.overrides.get(field.id).map(String::as_str).unwrap_or(field.default)
    }

    pub fn get_field(&self, id: &str) -> &str {
        self.fields.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn set_field(&mut self, id: &str, text: impl Into<String>) {
        self.fields.insert(id.to_string(), text.into());
    }

    pub fn get_output(&self, id: &str) -> &str {
        self.outputs.get(id).map(String::as_str).unwrap_or(PLACEHOLDER)
    }

    /// Restores a calculator's default input text and recomputes it.
    pub fn reset_calculator(&mut self, calculator: &Calculator) {
        for field in calculator.inputs {
            let text = self.default_text(field).to_string();
            self.set_field(field.id, text);
        }
        Evaluator::recompute(calculator, self);
    }

    /// Runs every calculator against the current field text.
    pub fn recompute_all(&mut self) {
        for calculator in CALCULATORS {
            Evaluator::recompute(calculator, self);
        }
    }
}

impl FieldSurface for Page {
    fn read(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    fn write(&mut self, id: &str, text: String) {
        self.outputs.insert(id.to_string(), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::find_calculator;

    #[test]
    fn test_reading_render() {
        assert_eq!(Reading::Missing.render(Some(2)), PLACEHOLDER);
        assert_eq!(Reading::Value(1.5).render(Some(3)), "1.500");
        assert_eq!(Reading::Value(1500.0).render(None), "1.50e+3");
        assert_eq!(Reading::Open.render(Some(0)), "∞");
        assert_eq!(Reading::Short.render(Some(0)), "0");
        assert_eq!(Reading::Value(f64::NAN).render(Some(1)), PLACEHOLDER);
    }

    #[test]
    fn test_reading_from_option() {
        assert_eq!(Reading::from_option(Some(2.0)), Reading::Value(2.0));
        assert_eq!(Reading::from_option(None), Reading::Missing);
        assert_eq!(Reading::Open.value(), None);
    }

    #[test]
    fn test_page_defaults_are_evaluated() {
        let page = Page::with_defaults();
        for calculator in CALCULATORS {
            for field in calculator.inputs {
                assert_eq!(page.get_field(field.id), field.default);
            }
        }
        // Default divider: 5 V across 10k/10k
        assert_eq!(page.get_field("vin"), "5");
        assert_eq!(page.get_output("vout"), "2.500");
        assert_eq!(page.get_output("divider-current"), "0.25");
    }

    #[test]
    fn test_page_unknown_ids() {
        let page = Page::default();
        assert_eq!(page.get_field("nope"), "");
        assert_eq!(page.get_output("nope"), PLACEHOLDER);
    }

    #[test]
    fn test_reset_calculator_restores_defaults() {
        let mut page = Page::with_defaults();
        let divider = find_calculator("divider").unwrap();

        page.set_field("vin", "garbage");
        Evaluator::recompute(divider, &mut page);
        assert_eq!(page.get_output("vout"), PLACEHOLDER);

        page.reset_calculator(divider);
        assert_eq!(page.get_field("vin"), "5");
        assert_eq!(page.get_output("vout"), "2.500");
    }

    #[test]
    fn test_overrides_survive_reset() {
        let overrides = BTreeMap::from([("vin".to_string(), "12".to_string())]);
        let mut page = Page::with_overrides(&overrides);
        let divider = find_calculator("divider").unwrap();
        assert_eq!(page.get_output("vout"), "6.000");
        assert_eq!(page.default_text(&divider.inputs[0]), "12");
        assert_eq!(page.default_text(&divider.inputs[1]), "10000");

        page.set_field("vin", "");
        page.reset_calculator(divider);
        assert_eq!(page.get_field("vin"), "12");
        assert_eq!(page.get_output("vout"), "6.000");
    }
}
