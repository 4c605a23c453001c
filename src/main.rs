use anyhow::Result;
use console::{Term, style};
use log::{info, warn};
use raw_developer::component::RawDeveloper;
use raw_developer::config::Config;
use raw_developer::menu::show_main_menu;
use raw_developer::signal::setup_shutdown_signal;
use raw_developer::{error_prefix, goodbye_message, init, set_locale};
use std::path::PathBuf;

fn main() -> Result<()> {
    init::init();
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal()?;

    let config = Config::new();
    set_locale(config.settings.language);

    let mut developer = RawDeveloper::new(config, shutdown_signal);

    // 拖放到執行檔上的檔案會以參數傳入
    let dropped: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if !dropped.is_empty() {
        developer.add_paths(&dropped);
    }

    loop {
        match show_main_menu(&term, &mut developer) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(goodbye_message()).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style(error_prefix()).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
