//! Number rendering shared by the solvers.

/// Fixed number of decimals, never printing `-0.000`
pub fn fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Shortest round-trip rendering (`8`, `2.5`, `0.30000000000000004`)
pub fn number(value: f64) -> String {
    if value == 0.0 { "0".to_string() } else { value.to_string() }
}

/// Mantissa/exponent rendering with an explicitly signed exponent, e.g. `1.2346e+4`
pub fn exponential(value: f64, decimals: usize) -> String {
    let text = format!("{:.*e}", decimals, value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

/// Exponential notation for magnitudes outside `[1e-3, 1e4)`, fixed decimals otherwise
pub fn adaptive(value: f64, decimals: usize) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-3..1e4).contains(&magnitude) {
        exponential(value, decimals)
    } else {
        fixed(value, decimals)
    }
}

/// Signed term for polynomial-style output: `+ 3` / `- 3`
pub fn signed(value: f64) -> String {
    if value < 0.0 { format!("- {}", number(-value)) } else { format!("+ {}", number(value)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_drops_negative_zero() {
        assert_eq!(fixed(-0.00001, 4), "0.0000");
        assert_eq!(fixed(-1.23456, 2), "-1.23");
        assert_eq!(fixed(4.0, 6), "4.000000");
    }

    #[test]
    fn number_prints_integers_without_fraction() {
        assert_eq!(number(8.0), "8");
        assert_eq!(number(2.5), "2.5");
        assert_eq!(number(-0.0), "0");
    }

    #[test]
    fn exponential_signs_exponent() {
        assert_eq!(exponential(12345.6, 4), "1.2346e+4");
        assert_eq!(exponential(0.00012, 2), "1.20e-4");
    }

    #[test]
    fn adaptive_switches_notation() {
        assert_eq!(adaptive(1.5, 4), "1.5000");
        assert_eq!(adaptive(100000.0, 4), "1.0000e+5");
        assert_eq!(adaptive(0.0001, 4), "1.0000e-4");
        assert_eq!(adaptive(0.0, 4), "0.0000");
    }
}
