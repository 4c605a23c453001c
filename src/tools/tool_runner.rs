use crate::tools::ToolInvocation;
use std::io;
use std::process::{Command, Stdio};

#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// 外部程序結束狀態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExit {
    /// 被訊號終止時為 `None`
    pub code: Option<i32>,
    pub stderr: String,
}

impl ToolExit {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// 執行外部工具並等待結束
pub trait ToolRunner {
    fn run(&self, invocation: &ToolInvocation) -> io::Result<ToolExit>;
}

/// 以 `std::process::Command` 實際啟動程序
///
/// 子程序放在獨立的 process group，終端機的 Ctrl-C 不會送到外部工具，
/// 正在寫入的 TIFF 會完整寫完。
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    fn build_command(invocation: &ToolInvocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NEW_PROCESS_GROUP);
        }

        command
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> io::Result<ToolExit> {
        let output = Self::build_command(invocation).output()?;

        Ok(ToolExit {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tool;

    #[test]
    fn test_tool_exit_success() {
        let ok = ToolExit {
            code: Some(0),
            stderr: String::new(),
        };
        let failed = ToolExit {
            code: Some(1),
            stderr: String::new(),
        };
        let killed = ToolExit {
            code: None,
            stderr: String::new(),
        };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let invocation = ToolInvocation::new(
            Tool::Decoder,
            "raw-developer-missing-program-for-test",
            ["-v"],
        );
        let err = ProcessRunner.run(&invocation).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_and_stderr_are_captured() {
        let invocation = ToolInvocation::new(
            Tool::Copier,
            "sh",
            ["-c", "echo ignored; echo broken >&2; exit 3"],
        );
        let exit = ProcessRunner.run(&invocation).unwrap();
        assert_eq!(exit.code, Some(3));
        assert_eq!(exit.stderr, "broken");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_tool_runs_in_its_own_process_group() {
        // /proc/<pid>/stat 第 5 欄為 process group id
        let invocation = ToolInvocation::new(
            Tool::Decoder,
            "sh",
            ["-c", r#"test "$(cut -d' ' -f5 /proc/$$/stat)" = "$$""#],
        );
        let exit = ProcessRunner.run(&invocation).unwrap();
        assert_eq!(exit.code, Some(0));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_tool_is_outside_caller_process_group() {
        // 終端機的 SIGINT 只送到前景 group，工具不在呼叫端的 group 內
        let own_group = std::fs::read_to_string("/proc/self/stat")
            .unwrap()
            .rsplit(") ")
            .next()
            .unwrap()
            .split_whitespace()
            .nth(2)
            .unwrap()
            .to_string();
        let script = format!(r#"test "$(cut -d' ' -f5 /proc/$$/stat)" != "{own_group}""#);
        let invocation = ToolInvocation::new(Tool::Copier, "sh", ["-c", script.as_str()]);
        let exit = ProcessRunner.run(&invocation).unwrap();
        assert_eq!(exit.code, Some(0));
    }
}
