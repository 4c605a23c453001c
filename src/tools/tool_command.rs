use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// LibRaw 的 dcraw 相容解碼器
pub const DECODER_PROGRAM: &str = "dcraw_emu";
pub const COPIER_PROGRAM: &str = "exiftool";

/// verbose、相機白平衡、raw 色彩空間、16-bit、關閉自動亮度、gamma 2.2/0、輸出 TIFF
const DECODER_OPTIONS: [&str; 10] = ["-v", "-w", "-o", "0", "-6", "-W", "-g", "2.2", "0", "-T"];
const COPIER_OPTIONS: [&str; 2] = ["-overwrite_original", "-TagsFromFile"];

const DESTINATION_SUFFIX: &str = ".tiff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Decoder,
    Copier,
}

impl Tool {
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Decoder => DECODER_PROGRAM,
            Self::Copier => COPIER_PROGRAM,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// 一次外部工具呼叫：程式名稱加上完整參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: Tool,
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    pub fn new<I, S>(tool: Tool, program: impl AsRef<OsStr>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            tool,
            program: program.as_ref().to_os_string(),
            args: args.into_iter().map(|a| a.as_ref().to_os_string()).collect(),
        }
    }

    /// 以空白串接的指令字串，僅供日誌使用
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 輸出路徑為來源路徑直接加上 `.tiff`，不取代原副檔名
#[must_use]
pub fn destination_path(source_path: &Path) -> PathBuf {
    let mut destination = source_path.as_os_str().to_os_string();
    destination.push(DESTINATION_SUFFIX);
    PathBuf::from(destination)
}

pub struct DecoderCommand {
    source_path: PathBuf,
}

impl DecoderCommand {
    #[must_use]
    pub fn new(source_path: &Path) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn build(&self) -> ToolInvocation {
        ToolInvocation::new(
            Tool::Decoder,
            DECODER_PROGRAM,
            DECODER_OPTIONS
                .iter()
                .map(OsStr::new)
                .chain(std::iter::once(self.source_path.as_os_str())),
        )
    }
}

pub struct ExifCopyCommand {
    source_path: PathBuf,
    destination_path: PathBuf,
}

impl ExifCopyCommand {
    #[must_use]
    pub fn new(source_path: &Path, destination_path: &Path) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            destination_path: destination_path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn build(&self) -> ToolInvocation {
        ToolInvocation::new(
            Tool::Copier,
            COPIER_PROGRAM,
            COPIER_OPTIONS.iter().map(OsStr::new).chain([
                self.source_path.as_os_str(),
                self.destination_path.as_os_str(),
            ]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_path_appends_suffix() {
        assert_eq!(
            destination_path(Path::new("/a/IMG_0001.CR2")),
            Path::new("/a/IMG_0001.CR2.tiff")
        );
    }

    #[test]
    fn test_destination_path_keeps_dots() {
        assert_eq!(
            destination_path(Path::new("/a/trip.day.1/DSC.0002.arw")),
            Path::new("/a/trip.day.1/DSC.0002.arw.tiff")
        );
    }

    #[test]
    fn test_decoder_command_args() {
        let invocation = DecoderCommand::new(Path::new("/a/IMG_0001.CR2")).build();
        assert_eq!(invocation.tool, Tool::Decoder);
        assert_eq!(invocation.program, "dcraw_emu");
        assert_eq!(
            invocation.args,
            [
                "-v", "-w", "-o", "0", "-6", "-W", "-g", "2.2", "0", "-T",
                "/a/IMG_0001.CR2",
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn test_exif_copy_command_args() {
        let source = Path::new("/a/IMG_0001.CR2");
        let invocation = ExifCopyCommand::new(source, &destination_path(source)).build();
        assert_eq!(invocation.tool, Tool::Copier);
        assert_eq!(invocation.program, "exiftool");
        assert_eq!(
            invocation.args,
            [
                "-overwrite_original",
                "-TagsFromFile",
                "/a/IMG_0001.CR2",
                "/a/IMG_0001.CR2.tiff",
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn test_command_line_for_logging() {
        let invocation = ToolInvocation::new(Tool::Copier, "exiftool", ["-ver"]);
        assert_eq!(invocation.command_line(), "exiftool -ver");
    }
}
