// src/downloader/progress.rs

use crate::{
    models::{DownloadOutcome, TargetProgress},
    symbols, ui,
};
use indicatif::{HumanBytes, ProgressBar};

/// 每处理一项前后各调用一次，仅用于展示，不影响下载结果。
pub trait ProgressReporter: Send + Sync {
    fn on_target_start(&self, _item: &TargetProgress) {}
    fn on_target_finish(&self, _item: &TargetProgress, _outcome: &DownloadOutcome) {}
}

/// 不输出任何内容
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {}

/// 终端进度条，并在每项结束后打印一行结果。
pub struct ConsoleProgress {
    pbar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new(total: usize) -> Self {
        Self {
            pbar: ui::new_tasks_progress_bar(total as u64, "下载"),
        }
    }

    pub fn finish(&self) {
        self.pbar.finish_and_clear();
    }
}

impl ProgressReporter for ConsoleProgress {
    fn on_target_start(&self, item: &TargetProgress) {
        self.pbar.set_message(item.status_line());
    }

    fn on_target_finish(&self, item: &TargetProgress, outcome: &DownloadOutcome) {
        let line = match outcome {
            DownloadOutcome::Success { bytes_written } => format!(
                "{} {} ({})",
                *symbols::OK,
                item.status_line(),
                HumanBytes(*bytes_written)
            ),
            DownloadOutcome::Failure { kind, reason } => {
                let (symbol, color_fn, default_msg) = kind.get_display_info();
                format!(
                    "{} {} {}",
                    symbol,
                    item.status_line(),
                    color_fn(format!("失败: {} (详情: {})", default_msg, reason).into())
                )
            }
        };
        self.pbar.println(line);
        self.pbar.inc(1);
    }
}
