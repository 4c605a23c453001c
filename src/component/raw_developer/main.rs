use super::collection::RawFileCollection;
use super::pipeline::ConversionPipeline;
use super::record::{ConversionRecord, ConversionStatus, DevelopBatch, DevelopEvent};
use super::worker::run_batch;
use crate::config::Config;
use crate::tools::ToolRunner;
use anyhow::{Context, Result};
use console::{StyledObject, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 使用說明網頁
pub const HELP_URL: &str =
    "https://www.notion.so/mdkDeveloper-25926830759c80d784aceea922293257?v=1ec26830759c80389793000c4548293e";

/// RAW 顯像元件：管理檔案清單並驅動顯像作業
pub struct RawDeveloper {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
    collection: RawFileCollection,
    /// 最近一次顯像的結果，清單顯示狀態用
    last_batch: Option<DevelopBatch>,
}

impl RawDeveloper {
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
            collection: RawFileCollection::new(),
            last_batch: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    #[must_use]
    pub const fn collection(&self) -> &RawFileCollection {
        &self.collection
    }

    pub fn add_paths(&mut self, paths: &[PathBuf]) -> usize {
        let added = self.collection.add(paths);
        println!(
            "{}",
            style(t!(
                "developer.added",
                added = added,
                total = self.collection.len()
            ))
            .green()
        );
        added
    }

    /// 讀取一行輸入（可直接把檔案拖曳到終端機）並加入清單
    pub fn prompt_add_paths(&mut self) -> Result<()> {
        let input: String = Input::new()
            .with_prompt(t!("developer.add_prompt"))
            .allow_empty(true)
            .interact_text()?;

        let paths = parse_dropped_paths(&input);
        if paths.is_empty() {
            return Ok(());
        }

        self.add_paths(&paths);
        Ok(())
    }

    /// 清單中每個檔案與其狀態，尚未顯像過的檔案為 `Ready`
    #[must_use]
    pub fn list_rows(&self) -> Vec<(PathBuf, ConversionStatus)> {
        self.collection
            .list()
            .into_iter()
            .map(|path| {
                let status = self
                    .last_batch
                    .as_ref()
                    .and_then(|batch| batch.status_of(&path))
                    .unwrap_or(ConversionStatus::Ready);
                (path, status)
            })
            .collect()
    }

    pub fn show_list(&self) {
        println!("{}", style(t!("developer.list_title")).cyan().bold());

        if self.collection.is_empty() {
            println!("{}", style(t!("developer.empty")).yellow());
            return;
        }

        for (index, (path, status)) in self.list_rows().iter().enumerate() {
            println!(
                "  {:>4}. {} {}",
                index + 1,
                status_label(*status),
                path.display()
            );
        }
    }

    pub fn clear(&mut self) {
        self.collection.clear();
        self.last_batch = None;
        println!("{}", style(t!("developer.cleared")).green());
    }

    /// 選擇清單中的檔案，以檔案總管開啟其所在資料夾
    pub fn prompt_open_location(&self) -> Result<()> {
        let rows = self.list_rows();
        if rows.is_empty() {
            println!("{}", style(t!("developer.empty")).yellow());
            return Ok(());
        }

        let items: Vec<String> = rows
            .iter()
            .map(|(path, status)| format!("[{status}] {}", path.display()))
            .collect();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("developer.open_location_prompt"))
            .items(&items)
            .default(0)
            .interact_opt()?;

        // ESC pressed
        let Some(selection) = selection else {
            return Ok(());
        };

        let folder = containing_folder(&rows[selection].0);
        info!("開啟資料夾: {}", folder.display());
        open::that(&folder).with_context(|| format!("無法開啟資料夾: {}", folder.display()))?;
        Ok(())
    }

    pub fn open_help_website(&self) -> Result<()> {
        info!("開啟說明網頁: {HELP_URL}");
        println!("{} {HELP_URL}", style(t!("developer.help_opening")).dim());
        open::that(HELP_URL).context("無法開啟說明網頁")?;
        Ok(())
    }

    pub fn develop(&mut self) -> Result<()> {
        let pipeline =
            ConversionPipeline::with_process_runner(self.config.settings.exit_code_policy);
        self.develop_with(pipeline)
    }

    /// 以指定的 pipeline 顯像清單中所有檔案，結果保留給清單顯示
    pub fn develop_with<R>(&mut self, pipeline: ConversionPipeline<R>) -> Result<()>
    where
        R: ToolRunner + Send + 'static,
    {
        println!("{}", style(t!("developer.develop_title")).cyan().bold());

        if self.collection.is_empty() {
            warn!("沒有可顯像的檔案");
            println!("{}", style(t!("developer.empty")).yellow());
            return Ok(());
        }

        self.shutdown_signal.store(false, Ordering::SeqCst);

        let mut batch = DevelopBatch::from_sources(self.collection.list());

        let progress = ProgressBar::new(batch.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );

        run_batch(
            &mut batch,
            pipeline,
            Arc::clone(&self.shutdown_signal),
            |event, batch| render_event(&progress, event, batch.records()),
        )?;

        progress.finish_and_clear();
        self.print_summary(&batch);
        self.last_batch = Some(batch);

        Ok(())
    }

    fn print_summary(&self, batch: &DevelopBatch) {
        let summary = batch.summary();

        println!();
        println!("{}", style(t!("developer.summary_title")).cyan().bold());
        println!("  {}", t!("developer.summary_total", count = summary.total()));
        println!(
            "  {}",
            style(t!("developer.summary_done", count = summary.done)).green()
        );
        if summary.skipped > 0 {
            println!(
                "  {}",
                style(t!("developer.summary_skipped", count = summary.skipped)).yellow()
            );
        }
        if summary.failed > 0 {
            println!(
                "  {}",
                style(t!("developer.summary_failed", count = summary.failed)).red()
            );
            for record in batch
                .records()
                .iter()
                .filter(|r| r.status == ConversionStatus::Failed)
            {
                println!(
                    "    {} {}",
                    style(record.source_path.display()).red(),
                    record.error_message.as_deref().unwrap_or_default()
                );
            }
        }
        if summary.ready > 0 {
            println!(
                "  {}",
                style(t!("developer.summary_interrupted", count = summary.ready)).yellow()
            );
        }

        info!(
            "顯像作業摘要 - 完成: {}, 略過: {}, 失敗: {}, 未處理: {}",
            summary.done, summary.skipped, summary.failed, summary.ready
        );
    }
}

fn render_event(progress: &ProgressBar, event: &DevelopEvent, records: &[ConversionRecord]) {
    match event {
        DevelopEvent::Started { index } => {
            if let Some(record) = records.get(*index) {
                progress.set_message(file_name(record));
            }
        }
        DevelopEvent::Finished { index, status, .. } => {
            if let Some(record) = records.get(*index) {
                progress.println(format!(
                    "  {} {}",
                    status_label(*status),
                    record.source_path.display()
                ));
            }
            progress.inc(1);
        }
        DevelopEvent::Interrupted => {
            progress.println(format!("  {}", style(t!("developer.interrupted")).yellow()));
        }
    }
}

fn status_label(status: ConversionStatus) -> StyledObject<String> {
    let label = format!("[{status}]");
    match status {
        ConversionStatus::Done => style(label).green(),
        ConversionStatus::Skipped => style(label).yellow(),
        ConversionStatus::Failed => style(label).red(),
        ConversionStatus::Ready => style(label).dim(),
    }
}

/// 檔案所在的資料夾，沒有上層時為目前資料夾
#[must_use]
pub fn containing_folder(path: &Path) -> PathBuf {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn file_name(record: &ConversionRecord) -> String {
    record
        .source_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 拆解終端機拖放產生的路徑字串
///
/// 支援以空白分隔、單雙引號包住的路徑，非 Windows 平台另支援 `\ ` 跳脫。
#[must_use]
pub fn parse_dropped_paths(input: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (c, quote) {
            (q, Some(open)) if q == open => quote = None,
            (_, Some(_)) => current.push(c),
            ('"' | '\'', None) => {
                quote = Some(c);
                in_token = true;
            }
            ('\\', None) if cfg!(not(windows)) => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_token = true;
            }
            (c, None) if c.is_whitespace() => {
                if in_token {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                    in_token = false;
                }
            }
            (c, None) => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        paths.push(PathBuf::from(current));
    }

    paths
}
