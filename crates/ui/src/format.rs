//! Number formatting for the results panel and chart labels.

/// Format a count with comma thousands separators.
pub fn format_count(n: i64) -> String {
    let negative = n < 0;
    let s = n.unsigned_abs().to_string();
    let bytes = s.as_bytes();
    let len = bytes.len();

    if len <= 3 {
        return if negative { format!("-{}", s) } else { s };
    }

    let mut result = String::with_capacity(len + len / 3);
    if negative {
        result.push('-');
    }

    let first_group = len % 3;
    if first_group > 0 {
        result.push_str(&s[..first_group]);
        if first_group < len {
            result.push(',');
        }
    }

    let remaining = &s[first_group..];
    for (i, ch) in remaining.chars().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}

/// Format a resource quantity: rounded to zero decimal places, thousands
/// separated.
pub fn format_quantity(quantity: f64) -> String {
    format_count(quantity.round() as i64)
}
