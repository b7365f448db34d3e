/// Formats a float the way the destination loader expects to read it back:
/// shortest round-trip digits, always with a fractional part, switching to
/// scientific notation outside `1e-4 <= |f| < 1e16`.
///
/// ```
/// use mon2sql_engine::table::format_float;
///
/// assert_eq!(format_float(5.0), "5.0");
/// assert_eq!(format_float(1e20), "1e+20");
/// assert_eq!(format_float(f64::NAN), "nan");
/// ```
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = f.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        return scientific(f);
    }

    let fixed = f.to_string();
    if fixed.contains('.') {
        fixed
    } else {
        format!("{fixed}.0")
    }
}

/// `1.5e20` → `1.5e+20`, `1e-5` → `1e-05`.
fn scientific(f: f64) -> String {
    let raw = format!("{f:e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
