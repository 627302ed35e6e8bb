use std::str::FromStr;
use std::time::Duration;

/// Shortest gap allowed between two generation cycles.
pub const MIN_INTERVAL: Duration = Duration::from_secs(60);

/// Gap between generation cycles, written as unit-suffixed parts such as
/// `30m`, `6h`, `1d` or `1d12h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval(pub Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        _ => None,
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("interval is empty".to_string());
        }

        let mut total: u64 = 0;
        let mut rest = s;
        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits == 0 {
                return Err(format!("expected a number in {:?}", s));
            }
            let amount: u64 = rest[..digits]
                .parse()
                .map_err(|_| format!("number too large in {:?}", s))?;

            let unit = rest[digits..]
                .chars()
                .next()
                .ok_or_else(|| format!("missing unit after {} (use m, h or d)", amount))?;
            let per_unit = unit_seconds(unit).ok_or_else(|| format!("unknown unit {:?} (use m, h or d)", unit))?;

            total = amount
                .checked_mul(per_unit)
                .and_then(|secs| total.checked_add(secs))
                .ok_or_else(|| format!("interval {:?} is too long", s))?;
            rest = &rest[digits + unit.len_utf8()..];
        }

        let interval = Duration::from_secs(total);
        if interval < MIN_INTERVAL {
            return Err("interval must be at least 1m".to_string());
        }
        Ok(Interval(interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> u64 {
        s.parse::<Interval>().unwrap().0.as_secs()
    }

    #[test]
    fn test_units() {
        assert_eq!(secs("30m"), 1_800);
        assert_eq!(secs("6h"), 21_600);
        assert_eq!(secs("1d"), 86_400);
        assert_eq!(secs("1d12h"), 129_600);
        assert_eq!(secs(" 1h30m "), 5_400);
    }

    #[test]
    fn test_rejects_malformed() {
        for input in ["", "h", "45", "5w", "1h30", "0m", "1 h"] {
            assert!(input.parse::<Interval>().is_err(), "{:?}", input);
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert!("213503982334602d".parse::<Interval>().is_err());
        assert!("99999999999999999999m".parse::<Interval>().is_err());
        assert!(format!("{}d{}d", u64::MAX / 86_400, u64::MAX / 86_400).parse::<Interval>().is_err());
    }
}
