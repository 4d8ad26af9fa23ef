// src/client.rs

use crate::{config::AppConfig, downloader::Fetcher, error::*};
use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{
    IntoUrl, StatusCode,
    header::{self, HeaderMap, HeaderValue},
};
use std::sync::Arc;

/// 带会话 Cookie 的 HTTP 客户端。不做自动重试，超时由配置决定。
#[derive(Clone)]
pub struct RobustClient {
    pub client: reqwest::Client,
}

impl RobustClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.cookie.as_deref() {
            let mut value = HeaderValue::from_str(cookie)
                .context("Cookie 中包含无法放入请求头的字符")?;
            value.set_sensitive(true);
            headers.insert(header::COOKIE, value);
        } else {
            warn!("未配置 Cookie，请求将不携带登录会话");
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }

    /// 发送一次 GET 请求并完整读取响应体。非 2xx 状态码视为失败。
    pub async fn get_bytes<T: IntoUrl>(&self, url: T) -> AppResult<Vec<u8>> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                warn!("服务器拒绝访问 ({})，Cookie 可能已失效", status);
            }
            return Err(AppError::HttpStatus(status));
        }
        let body = res.bytes().await?;
        debug!("响应读取完成: {} 字节", body.len());
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Fetcher for RobustClient {
    async fn fetch(&self, url: &str) -> AppResult<Vec<u8>> {
        self.get_bytes(url).await
    }
}
