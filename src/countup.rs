//! Animated number display: counts from 0 up to a target with an ease-out curve.
//!
//! String targets such as `"2,500+"` or `"$1.2"` are split into a prefix, a
//! numeric value and a suffix; the affixes stay fixed while the number moves.

use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_DURATION_MS: u64 = 2000;

static AFFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^0-9.-]*)([\d,.]+)([^0-9]*)$").expect("valid regex"));
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+))").expect("valid regex"));

/// `1 - 2^(-10x)`, pinned to exactly 1 at the end.
pub fn ease_out_expo(x: f64) -> f64 {
    if x >= 1.0 { 1.0 } else { 1.0 - 2f64.powf(-10.0 * x) }
}

/// Group the integer part in threes with commas; keep up to three decimals.
pub fn format_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let mut out = String::new();
    if negative && (grouped != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    raw: String,
    prefix: String,
    suffix: String,
    end: Option<f64>,
}

impl CountUp {
    pub fn parse(target: &str) -> Self {
        let (prefix, end, suffix) = match AFFIXED.captures(target) {
            Some(caps) => {
                let number = caps[2].replace(',', "");
                (caps[1].to_string(), leading_number(&number), caps[3].to_string())
            }
            None => (String::new(), leading_number(&target.replace(',', "")), String::new()),
        };
        Self { raw: target.to_string(), prefix, suffix, end }
    }

    pub fn from_number(end: f64) -> Self {
        Self {
            raw: format_thousands(end),
            prefix: String::new(),
            suffix: String::new(),
            end: Some(end),
        }
    }

    /// Explicit prefix; wins over the detected one when non-empty.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        if !prefix.is_empty() {
            self.prefix = prefix.to_string();
        }
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        if !suffix.is_empty() {
            self.suffix = suffix.to_string();
        }
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    pub fn is_numeric(&self) -> bool {
        self.end.is_some()
    }

    /// Number shown `elapsed_ms` into an animation of `duration_ms`.
    pub fn value_at(&self, elapsed_ms: u64, duration_ms: u64) -> Option<f64> {
        let end = self.end?;
        let progress = if duration_ms == 0 {
            1.0
        } else {
            (elapsed_ms as f64 / duration_ms as f64).min(1.0)
        };
        if progress >= 1.0 {
            Some(end)
        } else {
            Some((ease_out_expo(progress) * end).floor())
        }
    }

    pub fn text_at(&self, elapsed_ms: u64, duration_ms: u64) -> String {
        match self.value_at(elapsed_ms, duration_ms) {
            Some(v) => format!("{}{}{}", self.prefix, format_thousands(v), self.suffix),
            None => format!("{}{}{}", self.prefix, self.raw, self.suffix),
        }
    }

    pub fn start_text(&self) -> String {
        self.text_at(0, DEFAULT_DURATION_MS)
    }

    pub fn final_text(&self) -> String {
        self.text_at(DEFAULT_DURATION_MS, DEFAULT_DURATION_MS)
    }

    /// Every frame of the animation, one per `step_ms`, ending on the final text.
    pub fn frames(&self, duration_ms: u64, step_ms: u64) -> Vec<String> {
        let step = step_ms.max(1);
        let mut frames = Vec::new();
        let mut t = 0;
        while t < duration_ms {
            frames.push(self.text_at(t, duration_ms));
            t += step;
        }
        frames.push(self.text_at(duration_ms, duration_ms));
        frames
    }
}

fn leading_number(s: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(s)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
