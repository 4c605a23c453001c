use super::error::{DevelopError, Result};
use super::record::ConversionStatus;
use crate::config::ExitCodePolicy;
use crate::tools::{
    DecoderCommand, ExifCopyCommand, ProcessRunner, ToolExit, ToolInvocation, ToolRunner,
    destination_path,
};
use log::{error, info, warn};
use std::path::Path;

/// RAW → TIFF 兩階段轉換：dcraw_emu 解碼，再由 exiftool 複製中繼資料
pub struct ConversionPipeline<R = ProcessRunner> {
    runner: R,
    exit_code_policy: ExitCodePolicy,
}

impl ConversionPipeline<ProcessRunner> {
    #[must_use]
    pub const fn with_process_runner(exit_code_policy: ExitCodePolicy) -> Self {
        Self::new(ProcessRunner, exit_code_policy)
    }
}

impl<R: ToolRunner> ConversionPipeline<R> {
    pub const fn new(runner: R, exit_code_policy: ExitCodePolicy) -> Self {
        Self {
            runner,
            exit_code_policy,
        }
    }

    /// 輸出檔已存在時回傳 `Skipped`，不啟動任何程序
    pub fn convert(&self, source_path: &Path) -> Result<ConversionStatus> {
        let destination = destination_path(source_path);
        info!("顯像: {}", source_path.display());

        if destination.try_exists()? {
            warn!("輸出檔案已存在，略過: {}", destination.display());
            return Ok(ConversionStatus::Skipped);
        }

        self.run_stage(&DecoderCommand::new(source_path).build())?;
        self.run_stage(&ExifCopyCommand::new(source_path, &destination).build())?;

        info!("顯像完成: {}", destination.display());
        Ok(ConversionStatus::Done)
    }

    fn run_stage(&self, invocation: &ToolInvocation) -> Result<()> {
        info!("執行: {}", invocation.command_line());

        match (self.runner.run(invocation), self.exit_code_policy) {
            (Ok(exit), _) if exit.success() => {
                info!("{} 結束碼: 0", invocation.tool);
                Ok(())
            }
            (Ok(exit), ExitCodePolicy::Check) => {
                error!("{} 結束碼: {:?}", invocation.tool, exit.code);
                Err(Self::failure(invocation, exit))
            }
            (Ok(exit), ExitCodePolicy::Ignore) => {
                warn!("{} 結束碼: {:?}（忽略）", invocation.tool, exit.code);
                Ok(())
            }
            (Err(e), ExitCodePolicy::Check) => {
                error!("無法啟動 {}: {e}", invocation.tool);
                Err(DevelopError::ToolUnavailable {
                    tool: invocation.tool,
                    source: e,
                })
            }
            (Err(e), ExitCodePolicy::Ignore) => {
                warn!("無法啟動 {}（忽略）: {e}", invocation.tool);
                Ok(())
            }
        }
    }

    fn failure(invocation: &ToolInvocation, exit: ToolExit) -> DevelopError {
        DevelopError::ToolInvocationFailed {
            tool: invocation.tool,
            exit_code: exit.code,
            stderr: exit.stderr,
        }
    }
}
