//! Normalization of the magnitude strings the backend reports.
//!
//! Throughput figures are canonicalized to megabytes (base 1024);
//! utilization figures keep their percentage points. Malformed input
//! degrades to `0.0` so a single bad sample costs one chart point,
//! never the polling cycle.

const KB_PER_MB: f64 = 1024.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Parse a single unit-suffixed magnitude ("1.2GB", "512KB", "37.2%") into
/// MB, or percentage points for `%` input. An absent or unrecognized unit
/// means the value is taken as already in MB.
pub fn parse_magnitude(input: &str) -> f64 {
    let input = input.trim();
    if input.is_empty() {
        return 0.0;
    }

    if let Some(percent) = input.strip_suffix('%') {
        return percent.trim().parse().unwrap_or(0.0);
    }

    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(input.len());
    let (literal, unit) = input.split_at(split);

    let value: f64 = match literal.trim().parse() {
        Ok(v) => v,
        Err(_) => return 0.0,
    };

    value * unit_factor(unit.trim())
}

fn unit_factor(unit: &str) -> f64 {
    match unit.to_ascii_uppercase().as_str() {
        "B" => 1.0 / BYTES_PER_MB,
        "KB" => 1.0 / KB_PER_MB,
        "GB" => KB_PER_MB,
        "TB" => KB_PER_MB * KB_PER_MB,
        // "MB", no unit, or anything unrecognized: already in the target unit
        _ => 1.0,
    }
}

/// Parse a compound "`A / B`" pairing (read/rx first, write/tx second, per
/// backend convention). A string without a separator yields its single
/// magnitude in the first slot.
pub fn parse_io_pair(input: &str) -> (f64, f64) {
    match input.split_once('/') {
        Some((read, write)) => (parse_magnitude(read), parse_magnitude(write)),
        None => (parse_magnitude(input), 0.0),
    }
}
