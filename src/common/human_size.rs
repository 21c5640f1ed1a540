// HumanSize trait and implementations
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use tracing::debug;

/// Units that sizes are scaled through, in multiples of 1024. Anything that
/// is still 1024 or more after `TB` is shown in `PB`.
const SIZE_UNITS: &[&str] = &[
    "B",
    "KB",
    "MB",
    "GB",
    "TB",
];

const OVERFLOW_UNIT: &str = "PB";

/// `HumanSize` trait.
pub trait HumanSize {
    /// Return `self` as a human friendly size with two decimal places, for
    /// example `3.00 KB`.
    fn humansize(&self) -> String;
}

/// `HumanSize` trait implementation for `u64`.
impl HumanSize for u64 {
    fn humansize(&self) -> String {
        debug!("humansize: size {}", self);

        if *self == 0 {
            return "0 B".into();
        }

        let mut size = *self as f64;

        for unit in SIZE_UNITS {
            if size < 1024.0 {
                return format!("{:.2} {}", size, unit);
            }

            size /= 1024.0;
        }

        format!("{:.2} {}", size, OVERFLOW_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;
    const PB: u64 = TB * 1024;

    #[test]
    fn test_humansize() {
        let tests = vec![
            (0,            "0 B"),
            (1,            "1.00 B"),
            (500,          "500.00 B"),
            (1023,         "1023.00 B"),
            (KB,           "1.00 KB"),
            (1536,         "1.50 KB"),
            (3 * KB,       "3.00 KB"),
            (MB,           "1.00 MB"),
            (5 * GB / 2,   "2.50 GB"),
            (TB,           "1.00 TB"),
            (PB,           "1.00 PB"),
            (2048 * PB,    "2048.00 PB"),
        ];

        for test in tests {
            let size: u64 = test.0;
            let expected  = test.1;

            let ret = size.humansize();

            assert_eq!(ret, expected);
        }
    }

    // The displayed magnitude, scaled back up by its unit, must be within
    // half a hundredth of that unit of the original size.
    #[test]
    fn test_humansize_magnitude() {
        let sizes = vec![
            7,
            1000,
            4095,
            123_456,
            987_654_321,
            3 * TB + 17,
            u64::MAX,
        ];

        for size in sizes {
            let formatted = size.humansize();

            let (magnitude, unit) = formatted.split_once(' ').unwrap();
            let magnitude: f64 = magnitude.parse().unwrap();

            let exponent = SIZE_UNITS
                .iter()
                .chain(std::iter::once(&OVERFLOW_UNIT))
                .position(|u| *u == unit)
                .unwrap();

            let scale = 1024_f64.powi(exponent as i32);
            let error = (magnitude * scale - size as f64).abs();

            assert!(
                error <= 0.005 * scale * (1.0 + f64::EPSILON),
                "{} formatted as {}",
                size,
                formatted,
            );
        }
    }
}
