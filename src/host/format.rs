use serde::{Deserialize, Serialize};

/// Locale-dependent separators used when the host does not format values
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSettings {
    pub decimal_separator: char,
    pub group_separator: Option<char>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: None,
        }
    }
}

/// Display-unit scaling applied to data labels and tooltip values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayUnits {
    /// Pick the unit from the value's magnitude.
    #[default]
    Auto,
    None,
    Thousands,
    Millions,
    Billions,
    Trillions,
}

impl DisplayUnits {
    /// Decodes the numeric property value used by object bags.
    #[must_use]
    pub fn from_property(value: f64) -> Self {
        match value as i64 {
            1 => DisplayUnits::None,
            1_000 => DisplayUnits::Thousands,
            1_000_000 => DisplayUnits::Millions,
            1_000_000_000 => DisplayUnits::Billions,
            1_000_000_000_000 => DisplayUnits::Trillions,
            _ => DisplayUnits::Auto,
        }
    }

    fn divisor_and_suffix(self, magnitude: f64) -> (f64, &'static str) {
        let resolved = match self {
            DisplayUnits::Auto => {
                if magnitude >= 1.0e12 {
                    DisplayUnits::Trillions
                } else if magnitude >= 1.0e9 {
                    DisplayUnits::Billions
                } else if magnitude >= 1.0e6 {
                    DisplayUnits::Millions
                } else if magnitude >= 1.0e3 {
                    DisplayUnits::Thousands
                } else {
                    DisplayUnits::None
                }
            }
            other => other,
        };
        match resolved {
            DisplayUnits::Thousands => (1.0e3, "K"),
            DisplayUnits::Millions => (1.0e6, "M"),
            DisplayUnits::Billions => (1.0e9, "bn"),
            DisplayUnits::Trillions => (1.0e12, "T"),
            DisplayUnits::Auto | DisplayUnits::None => (1.0, ""),
        }
    }
}

/// Formats measure values for labels and tooltips.
///
/// Precision is the number of decimal places; when unset, values format with
/// up to two decimals and trailing zeros trimmed, so whole numbers read as
/// integers ("100", not "100.00").
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueFormatter {
    pub units: DisplayUnits,
    pub precision: Option<u8>,
    pub locale: LocaleSettings,
}

impl ValueFormatter {
    #[must_use]
    pub fn new(units: DisplayUnits, precision: Option<u8>, locale: LocaleSettings) -> Self {
        Self {
            units,
            precision,
            locale,
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let (divisor, suffix) = self.units.divisor_and_suffix(value.abs());
        let scaled = value / divisor;
        let digits = match self.precision {
            Some(precision) => usize::from(precision),
            None => 2,
        };
        let mut text = format!("{scaled:.digits$}");
        if self.precision.is_none() {
            trim_trailing_zeros(&mut text);
        }
        self.localize_decimal(&mut text);
        text.push_str(suffix);
        text
    }

    /// Formats a ratio as a localized percentage: 3.5 reads "350%".
    #[must_use]
    pub fn format_percent(&self, ratio: f64) -> String {
        let mut text = format!("{:.2}", ratio * 100.0);
        trim_trailing_zeros(&mut text);
        self.localize_decimal(&mut text);
        text.push('%');
        text
    }

    fn localize_decimal(&self, text: &mut String) {
        if self.locale.decimal_separator != '.' && text.contains('.') {
            *text = text.replace('.', &self.locale.decimal_separator.to_string());
        }
    }
}

fn trim_trailing_zeros(text: &mut String) {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
}
