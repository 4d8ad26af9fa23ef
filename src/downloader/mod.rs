// src/downloader/mod.rs

mod progress;
pub mod report;

pub use progress::{ConsoleProgress, ProgressReporter, SilentProgress};

use crate::{
    error::AppResult,
    extractor::TargetSet,
    models::{DownloadOutcome, RunSummary, TargetProgress, TargetUrl},
    store::DestinationStore,
    utils,
};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::{collections::HashSet, time::Duration};

/// 获取单个链接内容的能力。登录凭据由实现方自行携带。
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// 完整读取响应体。非成功状态码和传输错误都返回 `Err`。
    async fn fetch(&self, url: &str) -> AppResult<Vec<u8>>;
}

/// 为目标生成文件名：能解析出资源 ID 时按 ID 命名，否则按序号 (从 1 开始) 命名。
pub fn target_filename(target: &TargetUrl, index: usize) -> String {
    match target
        .resource_id()
        .as_deref()
        .and_then(utils::cheque_filename)
    {
        Some(name) => name,
        None => {
            let fallback = utils::fallback_filename(index);
            warn!("无法从链接 '{}' 解析资源 ID，改用文件名 '{}'", target, fallback);
            fallback
        }
    }
}

/// 为整批目标分配文件名，顺序与 `targets` 一致。
///
/// 不同的资源 ID 可能截断成同一个文件名，重复时后出现的目标改用序号命名。
/// 序号文件名中的 "item" 不是合法的资源 ID，因此不会与按 ID 生成的名字冲突。
pub fn plan_filenames(targets: &TargetSet) -> Vec<String> {
    let mut used = HashSet::with_capacity(targets.len());
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let mut name = target_filename(target, i + 1);
            if !used.insert(name.clone()) {
                let fallback = utils::fallback_filename(i + 1);
                warn!(
                    "链接 '{}' 的文件名 '{}' 已被占用，改用文件名 '{}'",
                    target, name, fallback
                );
                used.insert(fallback.clone());
                name = fallback;
            }
            name
        })
        .collect()
}

/// 一次完整的下载过程：逐个下载，互不影响，每两个请求之间固定等待 `delay`。
pub struct DownloadRun<'a> {
    fetcher: &'a dyn Fetcher,
    store: &'a dyn DestinationStore,
    delay: Duration,
}

impl<'a> DownloadRun<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, store: &'a dyn DestinationStore, delay: Duration) -> Self {
        Self {
            fetcher,
            store,
            delay,
        }
    }

    pub async fn run(&self, targets: &TargetSet, progress: &dyn ProgressReporter) -> RunSummary {
        let total = targets.len();
        let mut summary = RunSummary::default();
        info!(
            "开始下载 {} 张小票到 '{}'，请求间隔 {:?}",
            total,
            self.store.display_name(),
            self.delay
        );

        let filenames = plan_filenames(targets);
        for (i, (target, filename)) in targets.iter().zip(filenames).enumerate() {
            if i > 0 && !self.delay.is_zero() {
                debug!("等待 {:?} 后发送下一个请求", self.delay);
                tokio::time::sleep(self.delay).await;
            }

            let item = TargetProgress {
                index: i + 1,
                total,
                filename,
            };
            progress.on_target_start(&item);
            let outcome = self.process(target, &item.filename).await;
            summary.record(&outcome);
            progress.on_target_finish(&item, &outcome);
        }

        info!(
            "下载结束: 成功 {}，失败 {}，共 {}",
            summary.succeeded, summary.failed, total
        );
        summary
    }

    /// 先完整获取响应，再写入保存位置；任何一步失败都只影响当前这一项。
    async fn process(&self, target: &TargetUrl, filename: &str) -> DownloadOutcome {
        let result: AppResult<u64> = async {
            let body = self.fetcher.fetch(target.as_str()).await?;
            self.store.write(filename, &body).await
        }
        .await;

        match result {
            Ok(bytes_written) => {
                debug!("'{}' 下载完成 ({} 字节)", filename, bytes_written);
                DownloadOutcome::Success { bytes_written }
            }
            Err(e) => {
                error!("下载 '{}' ({}) 失败: {}", filename, target, e);
                DownloadOutcome::failure(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_filename_uses_resource_id() {
        let target = TargetUrl::new(
            "https://www.ozon.ru/my/e-check/download?id=a1b2c3-d4e5-f6-00000001&rawdata=1&download=1",
        );
        assert_eq!(target_filename(&target, 7), "ozon_cheque_a1b2c3-d4e5_00000001.pdf");
    }

    #[test]
    fn test_target_filename_falls_back_to_position() {
        let no_id = TargetUrl::new("https://www.ozon.ru/my/e-check/download?rawdata=1&download=1");
        let bad_id = TargetUrl::new("https://www.ozon.ru/my/e-check/download?id=nothex&download=1");
        assert_eq!(target_filename(&no_id, 1), "ozon_cheque_item_001.pdf");
        assert_eq!(target_filename(&bad_id, 2), "ozon_cheque_item_002.pdf");
    }

    #[test]
    fn test_plan_filenames_resolves_truncation_collisions() {
        let targets: TargetSet = [
            "a1b2c3-d4e5-f6-00000001",
            "0a0b0c-1122-ff-0000abcd",
            "a1b2c3-d4e5-f7-00000001",
        ]
        .iter()
        .map(|id| {
            TargetUrl::new(format!(
                "https://www.ozon.ru/my/e-check/download?id={}&rawdata=1&download=1",
                id
            ))
        })
        .collect();

        assert_eq!(
            plan_filenames(&targets),
            vec![
                "ozon_cheque_a1b2c3-d4e5_00000001.pdf",
                "ozon_cheque_0a0b0c-1122_0000abcd.pdf",
                "ozon_cheque_item_003.pdf",
            ]
        );
    }
}
