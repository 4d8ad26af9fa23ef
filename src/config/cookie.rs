// src/config/cookie.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub(super) fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("无法获取用户主目录")))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

pub(crate) fn load_or_create_external_config() -> AppResult<ExternalConfig> {
    load_or_create_at(&get_config_path()?)
}

pub(super) fn load_or_create_at(config_path: &Path) -> AppResult<ExternalConfig> {
    if config_path.is_file() {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("读取配置文件 '{}' 失败", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 '{}' 失败", config_path.display()))
            .map_err(AppError::from)
    } else {
        info!("配置文件 {:?} 不存在，将创建默认配置。", config_path);
        let config = ExternalConfig::default();

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(config_path, json_content)?;

        Ok(config)
    }
}

/// 按 命令行参数 > 环境变量 > 配置文件 的顺序查找会话 Cookie，同时返回来源说明。
pub fn resolve_cookie(
    cli_cookie: Option<&str>,
    file_cookie: Option<&str>,
) -> (Option<String>, String) {
    if let Some(cookie) = cli_cookie.map(str::trim) && !cookie.is_empty() {
        debug!("使用来自命令行参数的 Cookie");
        return (Some(cookie.to_string()), "命令行参数".to_string());
    }
    if let Ok(cookie) = std::env::var(constants::COOKIE_ENV_VAR) && !cookie.trim().is_empty() {
        debug!("使用来自环境变量 {} 的 Cookie", constants::COOKIE_ENV_VAR);
        return (
            Some(cookie.trim().to_string()),
            format!("环境变量 ({})", constants::COOKIE_ENV_VAR),
        );
    }
    if let Some(cookie) = file_cookie.map(str::trim) && !cookie.is_empty() {
        debug!("使用来自本地配置文件的 Cookie");
        return (Some(cookie.to_string()), "本地配置文件".to_string());
    }
    debug!("未在任何位置找到可用的 Cookie");
    (None, "未找到".to_string())
}
