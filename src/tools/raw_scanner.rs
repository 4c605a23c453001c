use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// RAW 副檔名（小寫比對）
pub const RAW_EXTENSIONS: [&str; 4] = ["cr2", "cr3", "dng", "arw"];

#[must_use]
pub fn is_raw_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RAW_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// 遞迴掃描資料夾下所有 RAW 檔案
///
/// 不進入連結的資料夾，但指向檔案的符號連結會被收進來。
pub fn scan_raw_files(directory: &Path) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter(|entry| is_raw_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}
