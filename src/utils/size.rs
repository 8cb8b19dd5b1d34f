const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// One decimal, ties rounded away from zero (1.25 -> "1.3").
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Human readable size: bytes below 1 KiB, then KB or MB with one decimal.
pub fn format_file_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < MIB {
        format!("{} KB", one_decimal(b / KIB))
    } else {
        format!("{} MB", one_decimal(b / MIB))
    }
}

/// Size always expressed in kilobytes, as shown in the document header.
pub fn format_kb(bytes: u64) -> String {
    format!("{} KB", one_decimal(bytes as f64 / KIB))
}
