mod raw_scanner;
mod tool_command;
mod tool_runner;

pub use raw_scanner::{RAW_EXTENSIONS, is_raw_file, scan_raw_files};
pub use tool_command::{
    COPIER_PROGRAM, DECODER_PROGRAM, DecoderCommand, ExifCopyCommand, Tool, ToolInvocation,
    destination_path,
};
pub use tool_runner::{ProcessRunner, ToolExit, ToolRunner};
