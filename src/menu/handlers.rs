use crate::component::RawDeveloper;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;

pub fn run_add_paths(term: &Term, developer: &mut RawDeveloper) -> Result<()> {
    if let Err(e) = developer.prompt_add_paths() {
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_show_list(term: &Term, developer: &RawDeveloper) -> Result<()> {
    developer.show_list();

    pause(term)?;
    Ok(())
}

pub fn run_develop(term: &Term, developer: &mut RawDeveloper) -> Result<()> {
    if let Err(e) = developer.develop() {
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_clear(term: &Term, developer: &mut RawDeveloper) -> Result<()> {
    developer.clear();

    pause(term)?;
    Ok(())
}

pub fn run_open_location(term: &Term, developer: &RawDeveloper) -> Result<()> {
    if let Err(e) = developer.prompt_open_location() {
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_help(term: &Term, developer: &RawDeveloper) -> Result<()> {
    if let Err(e) = developer.open_help_website() {
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
