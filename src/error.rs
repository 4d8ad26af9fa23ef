// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("用户取消了保存位置授权")]
    UserCancelledGrant,
    #[error("页面中未找到任何电子小票下载链接")]
    NoTargetsFound,
    #[error("服务器返回错误状态码: {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("临时文件持久化失败: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("非法的文件名: {0}")]
    InvalidFilename(String),
    #[error("{failed}/{total} 个小票下载失败")]
    RunIncomplete { failed: usize, total: usize },
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    UserInputError(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;
