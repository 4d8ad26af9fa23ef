// src/cli.rs

use crate::constants;
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["html", "stdin", "cookie_help"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 从保存的订单页面 HTML 文件中提取小票链接
    #[arg(long, value_name = "FILE", help_heading = "Mode")]
    pub html: Option<PathBuf>,
    /// 从标准输入读取页面源码
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub stdin: bool,
    /// 显示如何获取登录 Cookie 的指南并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub cookie_help: bool,

    // --- 下载选项 (Options) ---
    /// 设置小票保存目录
    #[arg(short, long, value_name = "DIR", default_value_os_t = PathBuf::from(constants::DEFAULT_SAVE_DIR), help_heading = "Options")]
    pub output: PathBuf,
    /// 两次请求之间的间隔 (毫秒)，0 表示不等待
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64), help_heading = "Options")]
    pub delay_ms: Option<u64>,
    /// 提供登录会话 Cookie，优先级最高
    #[arg(long, help_heading = "Options")]
    pub cookie: Option<String>,
    /// 只列出找到的小票，不下载
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub list: bool,
    /// 不询问，直接使用保存目录
    #[arg(short = 'y', long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub yes: bool,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
