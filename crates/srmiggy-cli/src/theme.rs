use clap::ValueEnum;

use crate::context::ClientContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
    Toggle,
}

/// Prints the theme, or changes it when a mode is given. The choice is
/// stored immediately and survives logout.
pub(crate) fn run_theme(ctx: &mut ClientContext, mode: Option<ThemeMode>) -> anyhow::Result<()> {
    let dark = match mode {
        None => ctx.preferences.dark_mode(),
        Some(ThemeMode::Toggle) => ctx.preferences.toggle_dark_mode()?,
        Some(ThemeMode::Dark) => {
            ctx.preferences.set_dark_mode(true)?;
            true
        }
        Some(ThemeMode::Light) => {
            ctx.preferences.set_dark_mode(false)?;
            false
        }
    };
    println!("theme: {}", if dark { "dark" } else { "light" });
    Ok(())
}
