//! Client-side filtering of rendered recommendation cards.

/// Leading integer prefix of `raw`, the way browsers read `parseInt` input.
pub fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let digits_start = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[digits_start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..digits_start + digits].parse().ok()
}

/// Leading decimal prefix of `raw`, exponent included, the way browsers read
/// `parseFloat` input. `Infinity` is not recognised.
pub fn leading_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = usize::from(trimmed.starts_with(['+', '-']));
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = bytes[exp..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    trimmed[..end].trim_end_matches('.').parse().ok()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub industry: Option<String>,
    pub min_salary: Option<i64>,
    pub min_match: Option<f64>,
}

impl FilterCriteria {
    /// Empty, unparsable and zero control values all mean "no filter".
    pub fn from_controls(industry: &str, min_salary: &str, min_match: &str) -> Self {
        Self {
            industry: Some(industry.to_string()).filter(|value| !value.is_empty()),
            min_salary: leading_int(min_salary).filter(|value| *value != 0),
            min_match: leading_float(min_match).filter(|value| *value != 0.0),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.industry.is_none() && self.min_salary.is_none() && self.min_match.is_none()
    }

    pub fn matches(&self, card: &CardFacts) -> bool {
        let industry_ok = self
            .industry
            .as_deref()
            .map_or(true, |wanted| card.industry.as_deref() == Some(wanted));
        let salary_ok = self
            .min_salary
            .map_or(true, |min| card.salary.is_some_and(|salary| salary >= min));
        let match_ok = self
            .min_match
            .map_or(true, |min| card.match_score.is_some_and(|score| score >= min));
        industry_ok && salary_ok && match_ok
    }
}

/// Facts read from a card's `data-industry`, `data-salary` and `data-match` attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardFacts {
    pub industry: Option<String>,
    pub salary: Option<i64>,
    pub match_score: Option<f64>,
}

impl CardFacts {
    pub fn from_dataset(industry: Option<&str>, salary: Option<&str>, score: Option<&str>) -> Self {
        Self {
            industry: industry.map(str::to_string),
            salary: salary.and_then(leading_int),
            match_score: score.and_then(leading_float),
        }
    }
}

#[cfg(test)]
#[path = "tests/filters_tests.rs"]
mod tests;
