use crate::tools::Tool;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevelopError {
    #[error("無法啟動 {tool}: {source}")]
    ToolUnavailable {
        tool: Tool,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} 執行失敗 (exit code: {}): {stderr}", describe_exit_code(.exit_code))]
    ToolInvocationFailed {
        tool: Tool,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit_code(exit_code: &Option<i32>) -> String {
    exit_code.map_or_else(|| "signal".to_string(), |code| code.to_string())
}

pub type Result<T> = std::result::Result<T, DevelopError>;
