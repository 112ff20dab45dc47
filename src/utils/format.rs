use crate::data_types::ValueFormat;

const BYTE_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Binary-unit byte size, e.g. `1.5 GiB`.
pub fn format_bytes(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let mut v = value.abs();
    let mut unit = 0;
    while v >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    let sign = if value < 0.0 { "-" } else { "" };
    if unit == 0 {
        format!("{}{:.0} {}", sign, v, BYTE_UNITS[unit])
    } else {
        format!("{}{:.1} {}", sign, v, BYTE_UNITS[unit])
    }
}

pub fn format_number(value: f64) -> String {
    if value.abs() < 0.001 && value.abs() > 0.0 {
        format!("{:.4}", value)
    } else if value.abs() > 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn format_value(value: Option<f64>, format: ValueFormat) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return "n/a".to_string();
    };
    match format {
        ValueFormat::Plain => format_number(v),
        ValueFormat::Bytes => format_bytes(v),
        ValueFormat::Mebibytes => format_bytes(v * 1024.0 * 1024.0),
        ValueFormat::Percent => format!("{:.1}%", v),
        ValueFormat::Load => format!("{:.2}", v),
    }
}
