use serde::Serialize;

/// Placeholder shown for counts the provider did not report.
pub const MISSING: &str = "N/A";

/// How counts are rendered for display.
///
/// One report uses one format for every count it shows, measured and
/// theoretical alike, so the two can be compared digit by digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// `3216454`
    Plain,
    /// `3,216,454`
    #[default]
    Grouped,
    /// `32,16,454` (lakh / crore grouping).
    Indian,
    /// `3.22M`, `1.25K`; values below a thousand are shown as is.
    Compact,
}

impl NumberFormat {
    /// Parses a format name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "plain" => Some(Self::Plain),
            "grouped" => Some(Self::Grouped),
            "indian" | "en-IN" => Some(Self::Indian),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    pub fn format(&self, n: u128) -> String {
        match self {
            Self::Plain => n.to_string(),
            Self::Grouped => group(&n.to_string(), 3),
            Self::Indian => {
                let digits = n.to_string();
                if digits.len() <= 3 {
                    return digits;
                }
                let (head, tail) = digits.split_at(digits.len() - 3);
                format!("{},{tail}", group(head, 2))
            }
            Self::Compact => compact(n),
        }
    }

    /// Formats an optional measured count, `N/A` when absent.
    pub fn format_opt(&self, n: Option<u64>) -> String {
        n.map(|n| self.format(n.into()))
            .unwrap_or_else(|| MISSING.to_string())
    }
}

/// Inserts a comma every `width` digits counting from the right.
fn group(digits: &str, width: usize) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / width);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % width == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn compact(n: u128) -> String {
    let f = n as f64;
    if f >= 1e6 {
        format!("{:.2}M", f / 1e6)
    } else if f >= 1e3 {
        format!("{:.2}K", f / 1e3)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain() {
        assert_eq!(NumberFormat::Plain.format(3_216_454), "3216454");
        assert_eq!(NumberFormat::Plain.format(0), "0");
    }

    #[test]
    fn test_grouped() {
        let fmt = NumberFormat::Grouped;
        assert_eq!(fmt.format(0), "0");
        assert_eq!(fmt.format(999), "999");
        assert_eq!(fmt.format(1000), "1,000");
        assert_eq!(fmt.format(3_216_454), "3,216,454");
        assert_eq!(fmt.format(62_914_560), "62,914,560");
    }

    #[test]
    fn test_indian() {
        let fmt = NumberFormat::Indian;
        assert_eq!(fmt.format(70), "70");
        assert_eq!(fmt.format(1000), "1,000");
        assert_eq!(fmt.format(100_000), "1,00,000");
        assert_eq!(fmt.format(3_216_454), "32,16,454");
        assert_eq!(fmt.format(62_914_560), "6,29,14,560");
    }

    #[test]
    fn test_compact() {
        let fmt = NumberFormat::Compact;
        assert_eq!(fmt.format(999), "999");
        assert_eq!(fmt.format(1250), "1.25K");
        assert_eq!(fmt.format(1_250_000), "1.25M");
        assert_eq!(fmt.format(3_216_454), "3.22M");
    }

    #[test]
    fn test_missing() {
        assert_eq!(NumberFormat::Grouped.format_opt(None), "N/A");
        assert_eq!(NumberFormat::Grouped.format_opt(Some(12345)), "12,345");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(NumberFormat::from_name("indian"), Some(NumberFormat::Indian));
        assert_eq!(NumberFormat::from_name("compact"), Some(NumberFormat::Compact));
        assert_eq!(NumberFormat::from_name("fancy"), None);
    }
}
