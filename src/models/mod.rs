// src/models/mod.rs

use crate::error::AppError;
use crate::symbols;
use colored::{ColoredString, Colorize};
use std::fmt;
use url::Url;

/// 经过规范化的电子小票下载链接。
///
/// 两个链接指向同一张小票时，规范化后的字符串必然相等，因此可以直接按字符串比较和去重。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetUrl(String);

impl TargetUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 从查询参数 `id` 中取出资源 ID。链接无法解析或缺少该参数时返回 `None`。
    pub fn resource_id(&self) -> Option<String> {
        let url = Url::parse(&self.0).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty())
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FailureKind {
    HttpStatus,
    Timeout,
    Connection,
    Network,
    Write,
    InvalidName,
    Unexpected,
}

impl FailureKind {
    pub fn get_display_info(
        &self,
    ) -> (
        &'static ColoredString,
        fn(ColoredString) -> ColoredString,
        &'static str,
    ) {
        match self {
            FailureKind::HttpStatus => (&symbols::ERROR, |s| s.red(), "服务器返回错误"),
            FailureKind::Timeout => (&symbols::TIMEOUT, |s| s.yellow(), "网络连接超时"),
            FailureKind::Connection => (&symbols::ERROR, |s| s.red(), "无法建立连接"),
            FailureKind::Network => (&symbols::ERROR, |s| s.red(), "网络请求失败"),
            FailureKind::Write => (&symbols::ERROR, |s| s.red(), "本地文件写入失败"),
            FailureKind::InvalidName => (&symbols::ERROR, |s| s.red(), "文件名不合法"),
            FailureKind::Unexpected => (&symbols::ERROR, |s| s.red(), "发生未预期的程序错误"),
        }
    }
}

impl From<&AppError> for FailureKind {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::HttpStatus(_) => FailureKind::HttpStatus,
            AppError::Network(err) => {
                if err.is_timeout() {
                    FailureKind::Timeout
                } else if err.is_connect() {
                    FailureKind::Connection
                } else if err.is_status() {
                    FailureKind::HttpStatus
                } else {
                    FailureKind::Network
                }
            }
            AppError::Io(_) | AppError::TempFilePersist(_) => FailureKind::Write,
            AppError::InvalidFilename(_) => FailureKind::InvalidName,
            _ => FailureKind::Unexpected,
        }
    }
}

/// 单个小票的处理结果，仅用于更新计数和输出进度。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success { bytes_written: u64 },
    Failure { kind: FailureKind, reason: String },
}

impl DownloadOutcome {
    pub fn failure(error: &AppError) -> Self {
        DownloadOutcome::Failure {
            kind: FailureKind::from(error),
            reason: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// 进度通道中传递的单项信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProgress {
    /// 从 1 开始
    pub index: usize,
    pub total: usize,
    pub filename: String,
}

impl TargetProgress {
    pub fn status_line(&self) -> String {
        format!("{}/{}: {}", self.index, self.total, self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_from_query() {
        let url = TargetUrl::new(
            "https://www.ozon.ru/my/e-check/download?id=a1b2c3-d4e5-f6-00000001&rawdata=1&download=1",
        );
        assert_eq!(url.resource_id().as_deref(), Some("a1b2c3-d4e5-f6-00000001"));

        // 缺少 id 参数、id 为空、或根本不是合法 URL
        assert_eq!(TargetUrl::new("https://www.ozon.ru/my/e-check/download?rawdata=1").resource_id(), None);
        assert_eq!(TargetUrl::new("https://www.ozon.ru/my/e-check/download?id=&download=1").resource_id(), None);
        assert_eq!(TargetUrl::new("not a url").resource_id(), None);
    }

    #[test]
    fn test_run_summary_counts_every_outcome() {
        let mut summary = RunSummary::default();
        summary.record(&DownloadOutcome::Success { bytes_written: 10 });
        summary.record(&DownloadOutcome::Failure {
            kind: FailureKind::HttpStatus,
            reason: "404".to_string(),
        });
        summary.record(&DownloadOutcome::Success { bytes_written: 0 });
        assert_eq!(summary, RunSummary { succeeded: 2, failed: 1 });
        assert_eq!(summary.processed(), 3);
    }

    #[test]
    fn test_failure_kind_from_error() {
        let status = AppError::HttpStatus(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(FailureKind::from(&status), FailureKind::HttpStatus);

        let io = AppError::Io(std::io::Error::other("disk full"));
        assert_eq!(FailureKind::from(&io), FailureKind::Write);

        let name = AppError::InvalidFilename("../x.pdf".to_string());
        assert_eq!(FailureKind::from(&name), FailureKind::InvalidName);
    }

    #[test]
    fn test_status_line_format() {
        let progress = TargetProgress {
            index: 3,
            total: 12,
            filename: "ozon_cheque_a1b2c3-d4e5_00000001.pdf".to_string(),
        };
        assert_eq!(progress.status_line(), "3/12: ozon_cheque_a1b2c3-d4e5_00000001.pdf");
    }
}
