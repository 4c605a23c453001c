use crate::component::RawDeveloper;
use crate::config::types::{ExitCodePolicy, Language};
use crate::menu::handlers::{
    run_add_paths, run_clear, run_develop, run_help, run_open_location, run_show_list,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use log::info;
use rust_i18n::t;

pub fn show_main_menu(term: &Term, developer: &mut RawDeveloper) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!(
        "{}",
        style(t!(
            "main_menu.file_count",
            count = developer.collection().len()
        ))
        .dim()
    );
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_add"),
        t!("main_menu.opt_list"),
        t!("main_menu.opt_develop"),
        t!("main_menu.opt_clear"),
        t!("main_menu.opt_open_location"),
        t!("main_menu.opt_settings"),
        t!("main_menu.opt_help"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_add_paths(term, developer)?;
            Ok(true)
        }
        Some(1) => {
            run_show_list(term, developer)?;
            Ok(true)
        }
        Some(2) => {
            run_develop(term, developer)?;
            Ok(true)
        }
        Some(3) => {
            run_clear(term, developer)?;
            Ok(true)
        }
        Some(4) => {
            run_open_location(term, developer)?;
            Ok(true)
        }
        Some(5) => {
            show_settings_menu(term, developer)?;
            Ok(true)
        }
        Some(6) => {
            run_help(term, developer)?;
            Ok(true)
        }
        Some(7) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單，變更只在本次執行有效
fn show_settings_menu(term: &Term, developer: &mut RawDeveloper) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("settings.session_only")).dim());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_exit_code"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_exit_code_menu(term, developer)?,
            Some(1) => show_language_menu(term, developer)?,
            Some(2) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 外部工具結束碼處理方式
fn show_exit_code_menu(term: &Term, developer: &mut RawDeveloper) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.exit_code.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let current = developer.config().settings.exit_code_policy;
    println!(
        "\n{} {}",
        style(t!("settings.exit_code.current")).dim(),
        current
    );
    println!();

    let policies = [ExitCodePolicy::Check, ExitCodePolicy::Ignore];

    let items: Vec<String> = vec![
        t!("settings.exit_code.check").to_string(),
        t!("settings.exit_code.ignore").to_string(),
    ];

    let default_index = policies.iter().position(|&p| p == current).unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.exit_code.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without change
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_policy = policies[selection];

    if selected_policy != current {
        developer.config_mut().settings.exit_code_policy = selected_policy;
        info!("結束碼處理方式變更為 {selected_policy}");
        println!(
            "\n{} {}",
            style(t!("settings.saved")).green(),
            selected_policy
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, developer: &mut RawDeveloper) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::En, Language::Ja];

    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let current = developer.config().settings.language;
    let default_index = languages.iter().position(|&l| l == current).unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without change
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];

    if selected_lang != current {
        developer.config_mut().settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        println!(
            "\n{} {}",
            style(t!("settings.saved")).green(),
            selected_lang
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
