//! Number-to-string rules used by `join`, `Display` and `to_locale_string`.

/// Render `value` the way `join` does.
///
/// `NaN`, `Infinity` and `-Infinity` are spelled out, both zeros print as
/// `0`, magnitudes below `1e-6` (or from `1e21`) use exponent form, and
/// everything else is the shortest decimal that round-trips.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < 1e-6 {
        format!("{:e}", value)
    } else if magnitude >= 1e21 {
        format!("{:e}", value).replacen('e', "e+", 1)
    } else {
        value.to_string()
    }
}

/// Render `value` in en-US style: `,` thousands separators and at most three
/// fraction digits, rounded half away from zero.
pub fn format_locale(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_infinite() {
        return format!("{}∞", sign);
    }

    // exact for every binary16 magnitude
    let scaled = (value.abs() * 1000.0 + 0.5).floor() as u128;
    let whole = scaled / 1000;
    let fraction = scaled % 1000;

    let mut out = String::from(sign);
    out.push_str(&group_thousands(whole));
    if fraction != 0 {
        let digits = format!("{:03}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

fn group_thousands(whole: u128) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
