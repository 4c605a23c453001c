#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

pub mod component;
pub mod config;
pub mod init;
pub mod menu;
pub mod signal;
pub mod tools;

use anyhow::Result;
use console::{Term, style};

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style(t!("common.pause")).dim());
    term.read_line()?;
    Ok(())
}

/// 切換介面語言
pub fn set_locale(language: config::Language) {
    rust_i18n::set_locale(language.as_str());
}

#[must_use]
pub fn goodbye_message() -> String {
    t!("main_menu.goodbye").to_string()
}

#[must_use]
pub fn error_prefix() -> String {
    t!("common.error_prefix").to_string()
}
