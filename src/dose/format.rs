/// Render a numeric dosage bound with its unit suffix.
///
/// Integral magnitudes keep one decimal place (`1000.0 mg/kg`); fractional
/// ones print their shortest form (`200.5 mg/kg`).
pub fn format_dose(value: f64, unit: &str) -> String {
    if value.fract() == 0.0 {
        format!("{:.1} {}", value, unit)
    } else {
        format!("{} {}", value, unit)
    }
}
