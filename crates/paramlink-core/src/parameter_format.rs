//! Display conversion for parameter values.
//!
//! Every parameter owns a [`DisplayConverter`]: the function pair that turns a
//! user value into what the UI shows ([`DisplayValue`], a number string plus a
//! unit suffix) and turns typed text back into a user value. The bridge never
//! formats anything itself; it calls the parameter's converter and passes the
//! result through untouched.
//!
//! Two converters ship with the crate:
//!
//! - [`Formatter`] - unit-aware formatting for the common cases (dB, Hz, %...)
//! - [`FnConverter`] - wraps a pair of closures for anything else
//!
//! # Example
//!
//! ```
//! use paramlink_core::{DisplayConverter, Formatter};
//!
//! let percent = Formatter::Percent { precision: 0 };
//! let shown = percent.to_display(0.75);
//! assert_eq!(shown.value, "75");
//! assert_eq!(shown.suffix, "%");
//! assert_eq!(percent.from_display("75%"), Some(0.75));
//!
//! let hz = Formatter::Frequency;
//! assert_eq!(hz.to_display(1500.0).to_string(), "1.50 kHz");
//! ```

use std::fmt;

/// A formatted value split into number text and unit suffix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayValue {
    /// Formatted number (e.g. "-6.0", "L50", "On").
    pub value: String,
    /// Unit suffix (e.g. "dB", "%"), empty when unitless.
    pub suffix: String,
}

impl DisplayValue {
    /// Create a display value with a unit suffix.
    pub fn new(value: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            suffix: suffix.into(),
        }
    }

    /// Create a unitless display value.
    pub fn unitless(value: impl Into<String>) -> Self {
        Self::new(value, "")
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Symbol suffixes ("%", ":1") attach directly, word units get a space
        let attached = self
            .suffix
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if attached {
            write!(f, "{}{}", self.value, self.suffix)
        } else {
            write!(f, "{} {}", self.value, self.suffix)
        }
    }
}

/// Per-parameter conversion between user values and display text.
///
/// Implementations are called from the UI thread only. `from_display`
/// decides on its own what unparseable text means: returning `None` leaves
/// the parameter untouched, returning a fallback value applies it.
pub trait DisplayConverter: Send + Sync {
    /// Format a user value.
    fn to_display(&self, value: f64) -> DisplayValue;

    /// Parse display text into a user value.
    fn from_display(&self, text: &str) -> Option<f64>;
}

/// Unit-aware formatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formatter {
    /// Generic float with configurable precision (e.g. "1.23").
    Float {
        /// Number of decimal places.
        precision: usize,
    },

    /// Decibel formatter where the user value is already in dB.
    ///
    /// Display: "+12.0 dB", "-60.0 dB", "-inf dB" below `min_db`.
    Decibel {
        /// Number of decimal places.
        precision: usize,
        /// Values below this show as "-inf".
        min_db: f64,
    },

    /// Frequency with automatic Hz/kHz scaling.
    ///
    /// Display: "440 Hz", "1.50 kHz"
    Frequency,

    /// Milliseconds. Display: "10.0 ms"
    Milliseconds {
        /// Number of decimal places.
        precision: usize,
    },

    /// Seconds. Display: "1.50 s"
    Seconds {
        /// Number of decimal places.
        precision: usize,
    },

    /// Percentage of a 0.0-1.0 user value. Display: "75%"
    Percent {
        /// Number of decimal places.
        precision: usize,
    },

    /// Stereo position from -1.0 (left) to +1.0 (right).
    ///
    /// Display: "L50", "C", "R50"
    Pan,

    /// Compressor ratio. Display: "4.0:1", "∞:1"
    Ratio {
        /// Number of decimal places.
        precision: usize,
    },

    /// Whole semitones. Display: "+12 st", "-7 st"
    Semitones,

    /// Switch. Display: "On", "Off"
    Boolean,
}

impl Formatter {
    /// Unit suffix reported alongside the formatted number.
    pub fn suffix(&self) -> &'static str {
        match self {
            Formatter::Float { .. } => "",
            Formatter::Decibel { .. } => "dB",
            Formatter::Frequency => "Hz",
            Formatter::Milliseconds { .. } => "ms",
            Formatter::Seconds { .. } => "s",
            Formatter::Percent { .. } => "%",
            Formatter::Pan => "",
            Formatter::Ratio { .. } => ":1",
            Formatter::Semitones => "st",
            Formatter::Boolean => "",
        }
    }

    /// Format a user value.
    pub fn format(&self, value: f64) -> DisplayValue {
        match self {
            Formatter::Float { precision } => {
                DisplayValue::unitless(format!("{:.prec$}", value, prec = *precision))
            }

            Formatter::Decibel { precision, min_db } => {
                // Strict less-than so min_db itself still shows as a number
                let text = if value < *min_db {
                    "-inf".to_string()
                } else if value >= 0.0 {
                    format!("+{:.prec$}", value, prec = *precision)
                } else {
                    format!("{:.prec$}", value, prec = *precision)
                };
                DisplayValue::new(text, "dB")
            }

            Formatter::Frequency => {
                if value >= 1000.0 {
                    DisplayValue::new(format!("{:.2}", value / 1000.0), "kHz")
                } else if value >= 100.0 {
                    DisplayValue::new(format!("{:.0}", value), "Hz")
                } else {
                    DisplayValue::new(format!("{:.1}", value), "Hz")
                }
            }

            Formatter::Milliseconds { precision } => {
                DisplayValue::new(format!("{:.prec$}", value, prec = *precision), "ms")
            }

            Formatter::Seconds { precision } => {
                DisplayValue::new(format!("{:.prec$}", value, prec = *precision), "s")
            }

            Formatter::Percent { precision } => DisplayValue::new(
                format!("{:.prec$}", value * 100.0, prec = *precision),
                "%",
            ),

            Formatter::Pan => {
                let text = if value.abs() < 0.005 {
                    "C".to_string()
                } else if value < 0.0 {
                    format!("L{:.0}", value.abs() * 100.0)
                } else {
                    format!("R{:.0}", value * 100.0)
                };
                DisplayValue::unitless(text)
            }

            Formatter::Ratio { precision } => {
                let text = if value > 100.0 {
                    "∞".to_string()
                } else {
                    format!("{:.prec$}", value, prec = *precision)
                };
                DisplayValue::new(text, ":1")
            }

            Formatter::Semitones => {
                let st = value.round() as i64;
                let text = if st > 0 {
                    format!("+{}", st)
                } else {
                    format!("{}", st)
                };
                DisplayValue::new(text, "st")
            }

            Formatter::Boolean => {
                DisplayValue::unitless(if value > 0.5 { "On" } else { "Off" })
            }
        }
    }

    /// Parse display text, with or without its unit.
    ///
    /// Returns `None` when the text cannot be parsed.
    pub fn parse(&self, s: &str) -> Option<f64> {
        let s = s.trim();

        match self {
            Formatter::Float { .. } => s.parse().ok(),

            Formatter::Decibel { min_db, .. } => {
                let trimmed = s
                    .trim_end_matches(" dB")
                    .trim_end_matches("dB")
                    .trim();

                if trimmed.eq_ignore_ascii_case("-inf")
                    || trimmed == "-∞"
                    || trimmed.eq_ignore_ascii_case("-infinity")
                {
                    return Some(*min_db);
                }

                trimmed.parse().ok()
            }

            Formatter::Frequency => {
                if let Some(khz) = s
                    .strip_suffix("kHz")
                    .or_else(|| s.strip_suffix("khz"))
                {
                    return khz.trim().parse::<f64>().ok().map(|v| v * 1000.0);
                }

                let hz = s
                    .trim_end_matches("Hz")
                    .trim_end_matches("hz")
                    .trim();
                hz.parse().ok()
            }

            Formatter::Milliseconds { .. } => s.strip_suffix("ms").unwrap_or(s).trim().parse().ok(),

            Formatter::Seconds { .. } => s.strip_suffix('s').unwrap_or(s).trim().parse().ok(),

            Formatter::Percent { .. } => {
                let trimmed = s.trim_end_matches('%').trim();
                trimmed.parse::<f64>().ok().map(|v| v / 100.0)
            }

            Formatter::Pan => {
                let upper = s.to_uppercase();
                if upper == "C" || upper == "CENTER" || upper == "0" {
                    return Some(0.0);
                }

                if let Some(left) = upper.strip_prefix('L') {
                    return left.trim().parse::<f64>().ok().map(|v| -v / 100.0);
                }

                if let Some(right) = upper.strip_prefix('R') {
                    return right.trim().parse::<f64>().ok().map(|v| v / 100.0);
                }

                // Raw number: -100..100 or -1..1
                let v = s.parse::<f64>().ok()?;
                if v.abs() > 1.0 {
                    Some(v / 100.0)
                } else {
                    Some(v)
                }
            }

            Formatter::Ratio { .. } => {
                let trimmed = s.trim_end_matches(":1").trim();
                if trimmed == "∞" || trimmed.eq_ignore_ascii_case("inf") {
                    return Some(f64::INFINITY);
                }
                trimmed.parse().ok()
            }

            Formatter::Semitones => {
                let trimmed = s.trim_end_matches("st").trim();
                trimmed.parse().ok()
            }

            Formatter::Boolean => match s.to_lowercase().as_str() {
                "on" | "true" | "yes" | "1" | "enabled" => Some(1.0),
                "off" | "false" | "no" | "0" | "disabled" => Some(0.0),
                _ => None,
            },
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Float { precision: 2 }
    }
}

impl DisplayConverter for Formatter {
    fn to_display(&self, value: f64) -> DisplayValue {
        self.format(value)
    }

    fn from_display(&self, text: &str) -> Option<f64> {
        self.parse(text)
    }
}

/// Converter built from a pair of closures.
///
/// ```
/// use paramlink_core::{DisplayConverter, DisplayValue, FnConverter};
///
/// let octaves = FnConverter::new(
///     |v| DisplayValue::new(format!("{:.1}", v * 8.0), "oct"),
///     |s| s.trim_end_matches("oct").trim().parse::<f64>().ok().map(|v| v / 8.0),
/// );
/// assert_eq!(octaves.to_display(0.5).value, "4.0");
/// assert_eq!(octaves.from_display("2 oct"), Some(0.25));
/// ```
pub struct FnConverter<F, P> {
    format: F,
    parse: P,
}

impl<F, P> FnConverter<F, P>
where
    F: Fn(f64) -> DisplayValue + Send + Sync,
    P: Fn(&str) -> Option<f64> + Send + Sync,
{
    /// Create a converter from a format and a parse function.
    pub fn new(format: F, parse: P) -> Self {
        Self { format, parse }
    }
}

impl<F, P> DisplayConverter for FnConverter<F, P>
where
    F: Fn(f64) -> DisplayValue + Send + Sync,
    P: Fn(&str) -> Option<f64> + Send + Sync,
{
    fn to_display(&self, value: f64) -> DisplayValue {
        (self.format)(value)
    }

    fn from_display(&self, text: &str) -> Option<f64> {
        (self.parse)(text)
    }
}

impl<F, P> fmt::Debug for FnConverter<F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter").finish_non_exhaustive()
    }
}
