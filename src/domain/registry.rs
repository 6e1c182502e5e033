//! The calculator table.
//!
//! Each calculator is declared once as data: its input fields, its output
//! fields and the formula adapter that maps parsed inputs to readings. The
//! generic [`Evaluator`](super::services::Evaluator) drives every entry the
//! same way, so adding a calculator means adding a row here.

use super::formulas::{
    adc_voltage, battery_runtime, cable_drop, feedback_vout, ohms_law, thermistor,
    voltage_divider, wire_gauge,
};
use super::models::{Calculator, InputField, OutputField, Reading};

const fn input(id: &'static str, label: &'static str, unit: &'static str, default: &'static str) -> InputField {
    InputField { id, label, unit, default }
}

const fn output(id: &'static str, label: &'static str, unit: &'static str, precision: Option<usize>) -> OutputField {
    OutputField { id, label, unit, precision }
}

/// Every calculator, in display order.
pub static CALCULATORS: &[Calculator] = &[
    Calculator {
        key: "divider",
        title: "Voltage Divider",
        inputs: &[
            input("vin", "Input voltage", "V", "5"),
            input("r1", "R1 (top)", "Ω", "10000"),
            input("r2", "R2 (bottom)", "Ω", "10000"),
        ],
        outputs: &[
            output("vout", "Output voltage", "V", Some(3)),
            output("divider-current", "Divider current", "mA", Some(2)),
        ],
        formula: divider_formula,
    },
    Calculator {
        key: "buck",
        title: "Buck Feedback",
        inputs: &[
            input("buck-vref", "Reference voltage", "V", "0.8"),
            input("buck-r1", "R1 (to Vout)", "Ω", "100000"),
            input("buck-r2", "R2 (to GND)", "Ω", "22000"),
        ],
        outputs: &[output("buck-vout-result", "Output voltage", "V", Some(3))],
        formula: feedback_formula,
    },
    Calculator {
        key: "boost",
        title: "Boost Feedback",
        inputs: &[
            input("boost-vref", "Reference voltage", "V", "1.25"),
            input("boost-r1", "R1 (to Vout)", "Ω", "300000"),
            input("boost-r2", "R2 (to GND)", "Ω", "100000"),
        ],
        outputs: &[output("boost-vout-result", "Output voltage", "V", Some(3))],
        formula: feedback_formula,
    },
    Calculator {
        key: "ntc",
        title: "NTC Thermistor",
        inputs: &[
            input("th-vcc", "Divider supply", "V", "3.3"),
            input("th-r-series", "Series resistor", "Ω", "10000"),
            input("th-adc-bits", "ADC resolution", "bit", "12"),
            input("th-adc-value", "ADC reading", "count", "2048"),
            input("th-r0", "R0 at 25 °C", "Ω", "10000"),
            input("th-beta", "Beta", "K", "3950"),
        ],
        outputs: &[
            output("th-r-ntc", "Thermistor resistance", "Ω", Some(0)),
            output("th-temp", "Temperature", "°C", Some(1)),
        ],
        formula: thermistor_formula,
    },
    Calculator {
        key: "battery",
        title: "Battery Runtime",
        inputs: &[
            input("capacity", "Capacity", "mAh", "2000"),
            input("current-draw", "Average current", "mA", "50"),
            input("discharge-factor", "Usable fraction", "", "0.8"),
        ],
        outputs: &[
            output("runtime", "Runtime", "h", Some(2)),
            output("runtime-days", "Runtime", "days", Some(2)),
        ],
        formula: battery_formula,
    },
    Calculator {
        key: "ohm",
        title: "Ohm's Law / Power",
        inputs: &[
            input("v", "Voltage", "V", "12"),
            input("i", "Current", "A", "0.5"),
            input("r", "Resistance", "Ω", ""),
        ],
        outputs: &[
            output("power", "Power", "W", Some(4)),
            output("r-calc", "Resistance", "Ω", Some(2)),
        ],
        formula: ohm_formula,
    },
    Calculator {
        key: "adc",
        title: "ADC Voltage",
        inputs: &[
            input("adc-vref", "Reference voltage", "V", "3.3"),
            input("adc-bits", "Resolution", "bit", "12"),
            input("adc-value", "Reading", "count", "2048"),
            input("adc-scale", "Input divider gain", "×", "1"),
        ],
        outputs: &[
            output("adc-lsb", "LSB size", "mV", None),
            output("adc-pin-voltage", "Pin voltage", "V", Some(3)),
            output("adc-input-voltage", "Input voltage", "V", Some(3)),
        ],
        formula: adc_formula,
    },
    Calculator {
        key: "cable",
        title: "Cable Voltage Drop",
        inputs: &[
            input("cable-supply", "Supply voltage", "V", "12"),
            input("cable-current", "Load current", "A", "5"),
            input("cable-length", "Length (one way)", "m", "10"),
            input("cable-area", "Conductor area", "mm²", "1.5"),
            input("cable-rho", "Resistivity", "Ω·mm²/m", "0.0172"),
        ],
        outputs: &[
            output("cable-resistance", "Loop resistance", "Ω", Some(4)),
            output("cable-drop", "Voltage drop", "V", Some(3)),
            output("cable-drop-percent", "Voltage drop", "%", Some(2)),
            output("cable-load-voltage", "Voltage at load", "V", Some(3)),
        ],
        formula: cable_formula,
    },
    Calculator {
        key: "awg",
        title: "AWG Wire Gauge",
        inputs: &[
            input("awg-gauge", "Gauge (-3 = 0000)", "AWG", "18"),
            input("awg-density", "Current density", "A/mm²", "4"),
        ],
        outputs: &[
            output("awg-diameter", "Diameter", "mm", Some(3)),
            output("awg-area", "Cross-section", "mm²", Some(3)),
            output("awg-resistance", "Copper resistance", "Ω/km", Some(3)),
            output("awg-current", "Max current", "A", Some(2)),
        ],
        formula: awg_formula,
    },
];

/// Looks up a calculator by its key, e.g. `"divider"`.
pub fn find_calculator(key: &str) -> Option<&'static Calculator> {
    CALCULATORS.iter().find(|calculator| calculator.key == key)
}

/// Finds the calculator that owns an input field id.
pub fn find_input(id: &str) -> Option<&'static Calculator> {
    CALCULATORS.iter().find(|calculator| calculator.input(id).is_some())
}

fn arg(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn divider_formula(values: &[Option<f64>]) -> Vec<Reading> {
    let result = voltage_divider(arg(values, 0), arg(values, 1), arg(values, 2));
    vec![result.vout, result.current_ma]
}

fn feedback_formula(values: &[Option<f64>]) -> Vec<Reading> {
    vec![feedback_vout(arg(values, 0), arg(values, 1), arg(values, 2))]
}

fn thermistor_formula(values: &[Option<f64>]) -> Vec<Reading> {
    let result = thermistor(
        arg(values, 0),
        arg(values, 1),
        arg(values, 2),
        arg(values, 3),
        arg(values, 4),
        arg(values, 5),
    );
    vec![result.resistance, result.temperature_c]
}

fn battery_formula(values: &[Option<f64>]) -> Vec<Reading> {
    let result = battery_runtime(arg(values, 0), arg(values, 1), arg(values, 2));
    vec![result.hours, result.days]
}

fn ohm_formula(values: &[Option<f64>]) -> Vec<Reading> {
    let result = ohms_law(arg(values, 0), arg(values, 1), arg(values, 2));
    vec![result.power, result.resistance]
}

fn adc_formula(values: &[Option<f64>]) -> Vec<Reading> {
    let result = adc_voltage(arg(values, 0), arg(values, 1), arg(values, 2), arg(values, 3));
    vec![result.lsb_mv, result.pin_voltage, result.input_voltage]
}

fn cable_formula(values: &[Option<f64>]) -> Vec<Reading> {
    let result = cable_drop(arg(values, 0), arg(values, 1), arg(values, 2), arg(values, 3), arg(values, 4));
    vec![result.resistance, result.drop, result.drop_percent, result.load_voltage]
}

fn awg_formula(values: &[Option<f64>]) -> Vec<Reading> {
    let result = wire_gauge(arg(values, 0), arg(values, 1));
    vec![result.diameter_mm, result.area_mm2, result.resistance_per_km, result.max_current]
}
