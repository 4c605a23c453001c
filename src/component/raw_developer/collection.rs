use crate::tools::{is_raw_file, scan_raw_files};
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// 已加入的 RAW 檔案集合，路徑不重複
#[derive(Debug, Default)]
pub struct RawFileCollection {
    files: BTreeSet<PathBuf>,
}

impl RawFileCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入檔案或資料夾，回傳新加入的檔案數
    ///
    /// 資料夾會遞迴展開；不存在或不是 RAW 的路徑直接略過，不回報錯誤。
    pub fn add<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut added = 0;

        for path in paths {
            let path = path.as_ref();
            info!("加入路徑: {}", path.display());

            let found = if path.is_dir() {
                scan_raw_files(path)
            } else if path.is_file() && is_raw_file(path) {
                vec![path.to_path_buf()]
            } else {
                debug!("略過非 RAW 或不存在的路徑: {}", path.display());
                continue;
            };

            for file in found {
                let file = std::path::absolute(&file).unwrap_or(file);
                if self.files.insert(file) {
                    added += 1;
                }
            }
        }

        info!("新增 {added} 個 RAW 檔案，目前共 {} 個", self.files.len());
        added
    }

    pub fn clear(&mut self) {
        self.files.clear();
        info!("已清除檔案清單");
    }

    /// 依路徑排序
    #[must_use]
    pub fn list(&self) -> Vec<PathBuf> {
        self.files.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
