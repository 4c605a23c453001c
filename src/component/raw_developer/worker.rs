use super::pipeline::ConversionPipeline;
use super::record::{ConversionStatus, DevelopBatch, DevelopEvent};
use crate::tools::ToolRunner;
use anyhow::{Result, anyhow};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;

/// 在背景執行緒依序顯像 batch 中所有 Ready 的紀錄
///
/// 呼叫端執行緒持有 batch，每收到一個事件就套用並呼叫 `on_event`。
/// 中斷訊號只在兩個檔案之間檢查，正在執行的外部程序會跑完。
pub fn run_batch<R, F>(
    batch: &mut DevelopBatch,
    pipeline: ConversionPipeline<R>,
    shutdown_signal: Arc<AtomicBool>,
    mut on_event: F,
) -> Result<()>
where
    R: ToolRunner + Send + 'static,
    F: FnMut(&DevelopEvent, &DevelopBatch),
{
    let pending = batch.pending();
    info!("開始顯像，共 {} 個檔案", pending.len());

    let (sender, receiver) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("develop-worker".to_string())
        .spawn(move || develop_sequentially(&pipeline, pending, &shutdown_signal, &sender))?;

    for event in receiver {
        batch.apply(&event);
        on_event(&event, batch);
    }

    handle.join().map_err(|_| anyhow!("顯像執行緒異常結束"))?;

    info!("顯像作業結束");
    Ok(())
}

fn develop_sequentially<R: ToolRunner>(
    pipeline: &ConversionPipeline<R>,
    pending: Vec<(usize, PathBuf)>,
    shutdown_signal: &AtomicBool,
    sender: &Sender<DevelopEvent>,
) {
    for (index, source_path) in pending {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止顯像");
            let _ = sender.send(DevelopEvent::Interrupted);
            return;
        }

        if sender.send(DevelopEvent::Started { index }).is_err() {
            return;
        }

        let event = match pipeline.convert(&source_path) {
            Ok(status) => DevelopEvent::Finished {
                index,
                status,
                error_message: None,
            },
            Err(e) => {
                error!("顯像失敗 {}: {e}", source_path.display());
                DevelopEvent::Finished {
                    index,
                    status: ConversionStatus::Failed,
                    error_message: Some(e.to_string()),
                }
            }
        };

        if sender.send(event).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::raw_developer::pipeline::tests::RecordingRunner;
    use crate::config::ExitCodePolicy;
    use crate::tools::Tool;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_batch_converts_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("IMG_0001.CR2");
        let second = temp_dir.path().join("IMG_0002.CR2");
        let third = temp_dir.path().join("IMG_0003.CR2");
        fs::write(temp_dir.path().join("IMG_0002.CR2.tiff"), b"tiff").unwrap();

        // 第一個檔案成功；第三個檔案解碼失敗
        let runner = RecordingRunner::with_exit_codes(&[Some(0), Some(0), Some(1)]);
        let pipeline = ConversionPipeline::new(runner.clone(), ExitCodePolicy::Check);
        let mut batch = DevelopBatch::from_sources([&first, &second, &third]);

        let mut events = Vec::new();
        run_batch(
            &mut batch,
            pipeline,
            Arc::new(AtomicBool::new(false)),
            |event, _| events.push(event.clone()),
        )
        .unwrap();

        let statuses: Vec<_> = batch.records().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                ConversionStatus::Done,
                ConversionStatus::Skipped,
                ConversionStatus::Failed,
            ]
        );
        assert!(batch.records()[2].error_message.is_some());

        assert_eq!(events.len(), 6);
        assert_eq!(events[0], DevelopEvent::Started { index: 0 });
        assert_eq!(events[4], DevelopEvent::Started { index: 2 });

        let tools: Vec<_> = runner.calls().iter().map(|c| c.tool).collect();
        assert_eq!(tools, vec![Tool::Decoder, Tool::Copier, Tool::Decoder]);
    }

    #[test]
    fn test_run_batch_stops_on_shutdown() {
        let runner = RecordingRunner::default();
        let pipeline = ConversionPipeline::new(runner.clone(), ExitCodePolicy::Check);
        let mut batch = DevelopBatch::from_sources(["/a/IMG_0001.CR2", "/a/IMG_0002.CR2"]);

        let mut events = Vec::new();
        run_batch(
            &mut batch,
            pipeline,
            Arc::new(AtomicBool::new(true)),
            |event, _| events.push(event.clone()),
        )
        .unwrap();

        assert_eq!(events, vec![DevelopEvent::Interrupted]);
        assert_eq!(batch.summary().ready, 2);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_run_batch_skips_finished_records() {
        let runner = RecordingRunner::default();
        let pipeline = ConversionPipeline::new(runner.clone(), ExitCodePolicy::Check);
        let mut batch = DevelopBatch::from_sources(["/a/IMG_0001.CR2", "/a/IMG_0002.CR2"]);
        batch.apply(&DevelopEvent::Finished {
            index: 0,
            status: ConversionStatus::Done,
            error_message: None,
        });

        run_batch(
            &mut batch,
            pipeline,
            Arc::new(AtomicBool::new(false)),
            |_, _| {},
        )
        .unwrap();

        assert_eq!(batch.summary().done, 2);
        assert_eq!(runner.calls().len(), 2);
    }
}
