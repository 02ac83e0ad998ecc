//! Small formatting helpers shared by the command handlers.

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use srmiggy_core::format_inr;

/// Format an optional timestamp for display, returning `"—"` when `None`.
pub(crate) fn fmt_datetime(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(
        || "\u{2014}".to_string(),
        |d| d.format("%Y-%m-%d %H:%M").to_string(),
    )
}

pub(crate) fn fmt_money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "\u{2014}".to_string(), format_inr)
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_owned()
    }
}

/// Asks a yes/no question on stdin. Anything but `y`/`yes` is a no,
/// including a closed stdin.
pub(crate) fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    read_yes(std::io::stdin().lock())
}

fn read_yes(mut input: impl BufRead) -> bool {
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            tracing::warn!(error = %e, "could not read confirmation");
            false
        }
    }
}

/// Reads a password from stdin when one was not passed on the command line.
pub(crate) fn prompt_password(given: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']).to_owned();
    if password.is_empty() {
        anyhow::bail!("a password is required");
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_yes_accepts_only_explicit_yes() {
        assert!(read_yes("y\n".as_bytes()));
        assert!(read_yes("YES\n".as_bytes()));
        assert!(!read_yes("\n".as_bytes()));
        assert!(!read_yes("nope\n".as_bytes()));
        assert!(!read_yes("".as_bytes()));
    }

    #[test]
    fn truncate_marks_long_text() {
        assert_eq!(truncate("Masala Dosa", 20), "Masala Dosa");
        assert_eq!(truncate("Paneer Butter Masala", 6), "Paneer...");
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(fmt_money(None), "\u{2014}");
        assert_eq!(fmt_money(Some(Decimal::from(92))), "₹92");
        assert_eq!(fmt_datetime(None), "\u{2014}");
    }
}
