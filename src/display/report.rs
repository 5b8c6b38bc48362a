//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by reports and list views.

use crate::models::{Money, TransactionKind};

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", amount.format_grouped(symbol)) // Red for negative
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", amount.format_grouped(symbol)) // Green for positive
    } else {
        amount.format_grouped(symbol)
    }
}

/// Format an amount with a sign derived from the transaction kind
pub fn format_signed(amount: Money, kind: TransactionKind, symbol: &str) -> String {
    match kind {
        TransactionKind::Income => format!("+{}", amount.format_grouped(symbol)),
        TransactionKind::Expense => format!("-{}", amount.format_grouped(symbol)),
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);

        // Over 100% is clamped
        let full = format_bar(250.0, 100.0, 4);
        assert_eq!(full, "████");
        assert_eq!(format_bar(0.0, 100.0, 3), "   ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }

    #[test]
    fn test_format_signed() {
        let amount = Money::from_cents(123456);
        assert_eq!(format_signed(amount, TransactionKind::Income, "$"), "+$1,234.56");
        assert_eq!(format_signed(amount, TransactionKind::Expense, "$"), "-$1,234.56");
    }

    #[test]
    fn test_money_colored() {
        assert!(format_money_colored(Money::from_cents(-100), "$").contains("\x1b[31m"));
        assert!(format_money_colored(Money::from_cents(100), "$").contains("\x1b[32m"));
        assert_eq!(format_money_colored(Money::zero(), "$"), "$0.00");
    }
}
