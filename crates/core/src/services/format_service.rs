/// Formats whole-crown amounts for display.
///
/// The core produces the strings — the frontend just renders them.
pub struct FormatService;

impl FormatService {
    pub fn new() -> Self {
        Self
    }

    /// Format an amount as Czech crowns: thousands grouped with spaces,
    /// "Kč" suffix. Negative amounts keep their sign: "-12 000 Kč".
    #[must_use]
    pub fn format_czk(&self, amount: i64) -> String {
        let negative = amount < 0;
        let digits = amount.unsigned_abs().to_string();

        // Group digits in threes from the right
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(c);
        }

        if negative {
            format!("-{grouped} Kč")
        } else {
            format!("{grouped} Kč")
        }
    }

    /// Compact axis label in millions with one decimal: 7_450_000 → "7.5M".
    #[must_use]
    pub fn format_millions(&self, amount: i64) -> String {
        format!("{:.1}M", amount as f64 / 1_000_000.0)
    }
}

impl Default for FormatService {
    fn default() -> Self {
        Self::new()
    }
}
