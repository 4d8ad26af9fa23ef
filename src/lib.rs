// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod models;
pub mod store;
pub mod symbols;
pub mod ui;
pub mod utils;
mod workflows;

use crate::{cli::Cli, error::AppResult};
use colored::*;
use log::debug;
use std::sync::Arc;

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    if args.cookie_help {
        ui::box_message(
            "获取登录 Cookie 指南",
            constants::HELP_COOKIE_GUIDE
                .lines()
                .collect::<Vec<_>>()
                .as_slice(),
            |s| s.cyan(),
        );
        println!(
            "\n{} 安全提醒: Cookie 等同于登录状态，请妥善保管，不要分享给他人。",
            *symbols::INFO
        );
        return Ok(());
    }

    if args.list {
        workflows::run_list(&args)
    } else {
        workflows::run_download(&args).await
    }
}
