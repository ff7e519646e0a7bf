// Free-form pay strings to annual salary
use regex::Regex;
use std::sync::LazyLock;

static CURRENCY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)ca\$|usd|[$£€]").unwrap());

static PAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:(up to|from)\s*)?",
        r"(\d+(?:\.\d+)?)",
        r"(?:\s*(?:-|–|—|to)\s*(\d+(?:\.\d+)?))?",
        r"\s*/?\s*(?:(?:per|an|a)\s+)?",
        r"(hourly|hour|hr|daily|day|weekly|week|monthly|month|mo|yearly|year|yr|annually|annum)?",
    ))
    .unwrap()
});

/// Fallback unit keywords, checked in this order against the whole string.
const FALLBACK_UNITS: &[&str] = &["hour", "hr", "day", "week", "month", "mo", "year", "yr"];

const HOURS_PER_WEEK: f64 = 40.0;
const DAYS_PER_WEEK: f64 = 5.0;
const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayPeriod {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl PayPeriod {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "hour" | "hr" | "hourly" => Some(Self::Hour),
            "day" | "daily" => Some(Self::Day),
            "week" | "weekly" => Some(Self::Week),
            "month" | "mo" | "monthly" => Some(Self::Month),
            "year" | "yr" | "yearly" | "annually" | "annum" => Some(Self::Year),
            _ => None,
        }
    }

    fn per_year(self) -> f64 {
        match self {
            Self::Hour => HOURS_PER_WEEK * WEEKS_PER_YEAR,
            Self::Day => DAYS_PER_WEEK * WEEKS_PER_YEAR,
            Self::Week => WEEKS_PER_YEAR,
            Self::Month => MONTHS_PER_YEAR,
            Self::Year => 1.0,
        }
    }

    /// Smallest believable minimum amount for this period.
    fn floor(self) -> f64 {
        match self {
            Self::Hour => 5.0,
            Self::Day => 0.0,
            Self::Week => 25.0,
            Self::Month => 100.0,
            Self::Year => 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    UpTo,
    From,
}

/// Amounts and period pulled out of a pay string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPay {
    pub qualifier: Option<Qualifier>,
    pub min: f64,
    pub max: Option<f64>,
    pub period: Option<PayPeriod>,
}

impl ParsedPay {
    pub fn average(&self) -> f64 {
        (self.min + self.max.unwrap_or(self.min)) / 2.0
    }
}

/// Annualizes pay strings.
///
/// With `strict` set, amounts too small for their period (`56 per year`) are
/// rejected instead of being annualized.
#[derive(Debug, Clone, Copy)]
pub struct SalaryNormalizer {
    strict: bool,
}

impl SalaryNormalizer {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn normalize(&self, raw: Option<&str>) -> Option<u64> {
        let parsed = parse_pay(raw?)?;
        let period = parsed.period;

        if self.strict && period.is_some_and(|p| parsed.min < p.floor()) {
            return None;
        }

        let annual = parsed.average() * period.unwrap_or(PayPeriod::Year).per_year();
        // Beyond what the store can hold: treated like any other implausible amount.
        if !annual.is_finite() || annual < 0.0 || annual > i64::MAX as f64 {
            return None;
        }
        Some(annual.round_ties_even() as u64)
    }
}

impl Default for SalaryNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Extracts amounts and pay period, falling back to a keyword scan for the period.
pub fn parse_pay(raw: &str) -> Option<ParsedPay> {
    let cleaned = CURRENCY.replace_all(raw, "").replace(',', "").to_lowercase();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let caps = PAY.captures(cleaned)?;
    let min = caps.get(2)?.as_str().parse::<f64>().ok()?;
    let max = match caps.get(3) {
        Some(m) => Some(m.as_str().parse::<f64>().ok()?),
        None => None,
    };
    let qualifier = caps.get(1).map(|m| match m.as_str() {
        "up to" => Qualifier::UpTo,
        _ => Qualifier::From,
    });

    let period = caps
        .get(4)
        .and_then(|m| PayPeriod::from_token(m.as_str()))
        .or_else(|| {
            FALLBACK_UNITS
                .iter()
                .find(|unit| cleaned.contains(*unit))
                .and_then(|unit| PayPeriod::from_token(unit))
        });

    Some(ParsedPay {
        qualifier,
        min,
        max,
        period,
    })
}
