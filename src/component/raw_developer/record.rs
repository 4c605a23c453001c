use crate::tools::destination_path;
use log::warn;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Ready,
    Skipped,
    Done,
    Failed,
}

impl ConversionStatus {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Ready)
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready"),
            Self::Skipped => write!(f, "Skipped"),
            Self::Done => write!(f, "Done"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversionRecord {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub status: ConversionStatus,
    pub error_message: Option<String>,
}

impl ConversionRecord {
    #[must_use]
    pub fn new(source_path: &Path) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            destination_path: destination_path(source_path),
            status: ConversionStatus::Ready,
            error_message: None,
        }
    }

    /// 只允許 Ready → Skipped / Done / Failed，回傳是否有更新
    pub fn finish(&mut self, status: ConversionStatus, error_message: Option<String>) -> bool {
        if self.status.is_finished() || !status.is_finished() {
            warn!(
                "忽略狀態變更 {} -> {}: {}",
                self.status,
                status,
                self.source_path.display()
            );
            return false;
        }

        self.status = status;
        self.error_message = error_message;
        true
    }
}

/// 背景工作執行緒回報給 UI 執行緒的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevelopEvent {
    Started {
        index: usize,
    },
    Finished {
        index: usize,
        status: ConversionStatus,
        error_message: Option<String>,
    },
    Interrupted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub ready: usize,
    pub skipped: usize,
    pub done: usize,
    pub failed: usize,
}

impl BatchSummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.ready + self.skipped + self.done + self.failed
    }
}

/// 一次顯像作業的所有紀錄，順序即處理順序
#[derive(Debug, Clone, Default)]
pub struct DevelopBatch {
    records: Vec<ConversionRecord>,
}

impl DevelopBatch {
    pub fn from_sources<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            records: sources
                .into_iter()
                .map(|source| ConversionRecord::new(source.as_ref()))
                .collect(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[ConversionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 尚未處理的紀錄：(索引, 來源路徑)
    #[must_use]
    pub fn pending(&self) -> Vec<(usize, PathBuf)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.status == ConversionStatus::Ready)
            .map(|(index, record)| (index, record.source_path.clone()))
            .collect()
    }

    #[must_use]
    pub fn status_of(&self, source_path: &Path) -> Option<ConversionStatus> {
        self.records
            .iter()
            .find(|record| record.source_path == source_path)
            .map(|record| record.status)
    }

    pub fn apply(&mut self, event: &DevelopEvent) {
        if let DevelopEvent::Finished {
            index,
            status,
            error_message,
        } = event
        {
            match self.records.get_mut(*index) {
                Some(record) => {
                    record.finish(*status, error_message.clone());
                }
                None => warn!("收到不存在的紀錄索引: {index}"),
            }
        }
    }

    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        self.records
            .iter()
            .fold(BatchSummary::default(), |mut summary, record| {
                match record.status {
                    ConversionStatus::Ready => summary.ready += 1,
                    ConversionStatus::Skipped => summary.skipped += 1,
                    ConversionStatus::Done => summary.done += 1,
                    ConversionStatus::Failed => summary.failed += 1,
                }
                summary
            })
    }
}
