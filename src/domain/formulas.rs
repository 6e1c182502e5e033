//! Closed-form engineering formulas behind each calculator.
//!
//! Every function takes its inputs as `Option<f64>` (a field that did not
//! parse is `None`), checks the formula's domain preconditions and returns
//! [`Reading`]s. Nothing here panics or returns an error: an input outside
//! the domain of the formula simply yields [`Reading::Missing`].

use std::f64::consts::PI;

use super::models::Reading;

/// Reference temperature of the Beta equation, 25 °C in kelvin.
pub const BETA_REFERENCE_KELVIN: f64 = 298.15;
pub const KELVIN_OFFSET: f64 = 273.15;

/// Resistivity of annealed copper in Ω·mm²/m.
pub const COPPER_RESISTIVITY: f64 = 0.0172;

/// Gauge number used for 0000 AWG.
pub const AWG_MIN_GAUGE: f64 = -3.0;
pub const AWG_MAX_GAUGE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerResult {
    pub vout: Reading,
    pub current_ma: Reading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermistorResult {
    pub resistance: Reading,
    pub temperature_c: Reading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeResult {
    pub hours: Reading,
    pub days: Reading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhmResult {
    pub power: Reading,
    pub resistance: Reading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcResult {
    pub lsb_mv: Reading,
    pub pin_voltage: Reading,
    pub input_voltage: Reading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableResult {
    pub resistance: Reading,
    pub drop: Reading,
    pub drop_percent: Reading,
    pub load_voltage: Reading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireResult {
    pub diameter_mm: Reading,
    pub area_mm2: Reading,
    pub resistance_per_km: Reading,
    pub max_current: Reading,
}

/// Unloaded voltage divider: `Vout = Vin·R2/(R1+R2)` and the divider current
/// in milliamps.
pub fn voltage_divider(vin: Option<f64>, r1: Option<f64>, r2: Option<f64>) -> DividerResult {
    let missing = DividerResult { vout: Reading::Missing, current_ma: Reading::Missing };
    let (Some(vin), Some(r1), Some(r2)) = (vin, r1, r2) else {
        return missing;
    };
    let total = r1 + r2;
    if r1 < 0.0 || r2 < 0.0 || total <= 0.0 {
        return missing;
    }

    DividerResult {
        vout: Reading::Value(vin * r2 / total),
        current_ma: Reading::Value(vin / total * 1000.0),
    }
}

/// Output voltage set by a regulator's feedback divider:
/// `Vout = Vref·(1 + R1/R2)`. Buck and boost converters share it.
pub fn feedback_vout(vref: Option<f64>, r1: Option<f64>, r2: Option<f64>) -> Reading {
    match (vref, r1, r2) {
        (Some(vref), Some(r1), Some(r2)) if vref >= 0.0 && r1 >= 0.0 && r2 > 0.0 => {
            Reading::Value(vref * (1.0 + r1 / r2))
        }
        _ => Reading::Missing,
    }
}

/// Largest ADC reading for a resolution in bits, `2^bits − 1`.
///
/// The resolution is rounded half up and clamped to 8..=16 bits first.
pub fn full_scale_count(bits: f64) -> f64 {
    let bits = (bits + 0.5).floor().clamp(8.0, 16.0);
    2f64.powf(bits) - 1.0
}

/// NTC thermistor on the low side of a divider, read by an ADC referenced to
/// the divider supply.
///
/// `R_ntc = R_series·adc/(max − adc)` and the Beta equation
/// `1/T = 1/T0 + ln(R/R0)/β` with `T0` = 25 °C.
pub fn thermistor(
    vcc: Option<f64>,
    r_series: Option<f64>,
    adc_bits: Option<f64>,
    adc_value: Option<f64>,
    r0: Option<f64>,
    beta: Option<f64>,
) -> ThermistorResult {
    let missing = ThermistorResult { resistance: Reading::Missing, temperature_c: Reading::Missing };
    let (Some(vcc), Some(r_series), Some(adc_bits), Some(adc_value), Some(r0), Some(beta)) =
        (vcc, r_series, adc_bits, adc_value, r0, beta)
    else {
        return missing;
    };
    if vcc <= 0.0 || r_series <= 0.0 || adc_value < 0.0 || r0 <= 0.0 || beta <= 0.0 {
        return missing;
    }

    let max_count = full_scale_count(adc_bits);
    if adc_value >= max_count {
        return ThermistorResult { resistance: Reading::Open, temperature_c: Reading::Missing };
    }
    if adc_value <= 0.0 {
        return ThermistorResult { resistance: Reading::Short, temperature_c: Reading::Missing };
    }

    let r_ntc = r_series * adc_value / (max_count - adc_value);
    let inv_t = 1.0 / BETA_REFERENCE_KELVIN + (r_ntc / r0).ln() / beta;
    let temperature = if inv_t > 0.0 {
        Some(1.0 / inv_t - KELVIN_OFFSET).filter(|t| t.is_finite())
    } else {
        None
    };

    ThermistorResult {
        resistance: Reading::Value(r_ntc),
        temperature_c: Reading::from_option(temperature),
    }
}

/// Battery runtime in hours and days from capacity (mAh) and average draw
/// (mA). A missing or non-positive discharge factor counts as 1.
pub fn battery_runtime(
    capacity: Option<f64>,
    current_draw: Option<f64>,
    factor: Option<f64>,
) -> RuntimeResult {
    let k = factor.filter(|f| *f > 0.0).unwrap_or(1.0);
    match (capacity, current_draw) {
        (Some(capacity), Some(draw)) if capacity > 0.0 && draw > 0.0 => {
            let hours = capacity * k / draw;
            RuntimeResult { hours: Reading::Value(hours), days: Reading::Value(hours / 24.0) }
        }
        _ => RuntimeResult { hours: Reading::Missing, days: Reading::Missing },
    }
}

/// Power and resistance from whichever of V, I and R are known.
///
/// Power prefers `V·I`, then `I²·R`, then `V²/R`. Resistance is `V/I` when
/// current flows, otherwise the given R.
pub fn ohms_law(v: Option<f64>, i: Option<f64>, r: Option<f64>) -> OhmResult {
    let r_positive = r.filter(|r| *r > 0.0);

    let power = match (v, i, r_positive) {
        (Some(v), Some(i), _) if v >= 0.0 && i >= 0.0 => Some(v * i),
        (_, Some(i), Some(r)) if i >= 0.0 => Some(i * i * r),
        (Some(v), _, Some(r)) => Some(v * v / r),
        _ => None,
    };

    let resistance = match (v, i, r_positive) {
        (Some(v), Some(i), _) if i > 0.0 => Some(v / i),
        (Some(_), _, Some(r)) => Some(r),
        _ => None,
    };

    OhmResult {
        power: Reading::from_option(power),
        resistance: Reading::from_option(resistance),
    }
}

/// Voltage represented by an ADC count, before and after an input divider
/// with gain `scale` (missing or non-positive counts as 1).
pub fn adc_voltage(
    vref: Option<f64>,
    bits: Option<f64>,
    value: Option<f64>,
    scale: Option<f64>,
) -> AdcResult {
    let (Some(vref), Some(bits)) = (vref, bits) else {
        return AdcResult { lsb_mv: Reading::Missing, pin_voltage: Reading::Missing, input_voltage: Reading::Missing };
    };
    if vref <= 0.0 {
        return AdcResult { lsb_mv: Reading::Missing, pin_voltage: Reading::Missing, input_voltage: Reading::Missing };
    }

    let max_count = full_scale_count(bits);
    let scale = scale.filter(|s| *s > 0.0).unwrap_or(1.0);
    let pin = value
        .filter(|v| (0.0..=max_count).contains(v))
        .map(|v| v / max_count * vref);

    AdcResult {
        lsb_mv: Reading::Value(vref / max_count * 1000.0),
        pin_voltage: Reading::from_option(pin),
        input_voltage: Reading::from_option(pin.map(|p| p * scale)),
    }
}

/// Voltage drop over a two-conductor cable run of `length` metres one way.
pub fn cable_drop(
    supply: Option<f64>,
    current: Option<f64>,
    length: Option<f64>,
    area: Option<f64>,
    resistivity: Option<f64>,
) -> CableResult {
    let missing = CableResult {
        resistance: Reading::Missing,
        drop: Reading::Missing,
        drop_percent: Reading::Missing,
        load_voltage: Reading::Missing,
    };
    let (Some(current), Some(length), Some(area), Some(rho)) = (current, length, area, resistivity) else {
        return missing;
    };
    if current < 0.0 || length <= 0.0 || area <= 0.0 || rho <= 0.0 {
        return missing;
    }

    let resistance = rho * 2.0 * length / area;
    let drop = current * resistance;
    let supply = supply.filter(|s| *s > 0.0);

    CableResult {
        resistance: Reading::Value(resistance),
        drop: Reading::Value(drop),
        drop_percent: Reading::from_option(supply.map(|s| drop / s * 100.0)),
        load_voltage: Reading::from_option(supply.map(|s| s - drop)),
    }
}

/// Diameter in millimetres of an AWG gauge, `0.127·92^((36 − n)/39)`.
pub fn awg_diameter_mm(gauge: f64) -> f64 {
    0.127 * 92f64.powf((36.0 - gauge) / 39.0)
}

/// Solid copper wire geometry for an AWG gauge and the current it carries at
/// a given current density (A/mm²).
pub fn wire_gauge(gauge: Option<f64>, density: Option<f64>) -> WireResult {
    let Some(gauge) = gauge.filter(|g| (AWG_MIN_GAUGE..=AWG_MAX_GAUGE).contains(g)) else {
        return WireResult {
            diameter_mm: Reading::Missing,
            area_mm2: Reading::Missing,
            resistance_per_km: Reading::Missing,
            max_current: Reading::Missing,
        };
    };

    let diameter = awg_diameter_mm(gauge);
    let area = PI / 4.0 * diameter * diameter;
    let max_current = density.filter(|d| *d > 0.0).map(|d| area * d);

    WireResult {
        diameter_mm: Reading::Value(diameter),
        area_mm2: Reading::Value(area),
        resistance_per_km: Reading::Value(1000.0 * COPPER_RESISTIVITY / area),
        max_current: Reading::from_option(max_current),
    }
}
