use crate::error::{Error, ParseReason, Result};

/// A temperature in tenths of a degree: `-15.3` is stored as `-153`.
pub type Tenths = i32;

const SCALE: f64 = 10.0;

/// Parses `-?[0-9]+\.[0-9]` into tenths of a degree.
pub fn parse_temperature(text: &[u8]) -> Result<Tenths> {
    let invalid = || Error::parse(text, ParseReason::InvalidTemperature);

    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };
    let [integer @ .., b'.', fraction] = digits else {
        return Err(invalid());
    };
    if integer.is_empty() || !fraction.is_ascii_digit() {
        return Err(invalid());
    }

    let mut value: Tenths = 0;
    for &byte in integer.iter().chain(std::iter::once(fraction)) {
        if !byte.is_ascii_digit() {
            return Err(invalid());
        }
        value = value
            .checked_mul(10)
            .and_then(|value| value.checked_add(Tenths::from(byte - b'0')))
            .ok_or_else(invalid)?;
    }

    Ok(if negative { -value } else { value })
}

/// Rounds to one decimal place. An exact `.05` midpoint always goes toward
/// positive infinity, so `-10.05` becomes `-10.0`.
pub fn round(x: f64) -> f64 {
    ((x + 0.05) * SCALE).floor() / SCALE
}

/// Renders tenths with exactly one fractional digit.
pub fn format_tenths(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    format!("{}{}.{}", sign, magnitude / 10, magnitude % 10)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    pub min: Tenths,
    pub max: Tenths,
    pub sum: i64,
    pub count: u64,
}

impl Aggregate {
    #[inline]
    pub fn new(temperature: Tenths) -> Self {
        Self {
            min: temperature,
            max: temperature,
            sum: i64::from(temperature),
            count: 1,
        }
    }

    #[inline]
    pub fn add(&mut self, temperature: Tenths) {
        self.min = Tenths::min(self.min, temperature);
        self.max = Tenths::max(self.max, temperature);
        self.sum += i64::from(temperature);
        self.count += 1;
    }

    #[inline]
    pub fn merge(&mut self, other: &Aggregate) {
        self.min = Tenths::min(self.min, other.min);
        self.max = Tenths::max(self.max, other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean in degrees, rounded with [`round`].
    pub fn mean(&self) -> f64 {
        round(self.sum as f64 / (self.count as f64 * SCALE))
    }

    pub fn mean_tenths(&self) -> i64 {
        (self.mean() * SCALE).round() as i64
    }
}
