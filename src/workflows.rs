// src/workflows.rs

use crate::{
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    downloader::{ConsoleProgress, DownloadRun, report},
    error::{AppError, AppResult},
    extractor::{self, TargetSet},
    store::{DestinationStore, DirectoryStore},
    symbols, ui,
};
use anyhow::Context;
use log::{debug, info, warn};
use std::{
    fs,
    io::{self, Read},
    path::Path,
    sync::Arc,
};

/// 读取页面源码，只在提取期间使用。
pub(crate) fn read_markup(args: &Cli) -> AppResult<String> {
    if let Some(path) = &args.html {
        let bytes = fs::read(path)
            .with_context(|| format!("读取页面文件 '{}' 失败", path.display()))?;
        debug!("已读取页面文件 '{}' ({} 字节)", path.display(), bytes.len());
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    if args.stdin {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        debug!("已从标准输入读取 {} 字节", buffer.len());
        return Ok(String::from_utf8_lossy(&buffer).into_owned());
    }
    Err(AppError::UserInputError(
        "请通过 --html 或 --stdin 提供页面源码。".to_string(),
    ))
}

pub(crate) fn load_targets(args: &Cli) -> AppResult<TargetSet> {
    let markup = read_markup(args)?;
    extractor::extract_targets(&markup)
}

/// 询问用户是否允许写入保存目录。使用 `-y` 或非交互终端时视为同意。
pub(crate) fn grant_destination(args: &Cli) -> AppResult<DirectoryStore> {
    let ask = !args.yes && ui::is_interactive();
    open_destination(&args.output, |question| !ask || ui::confirm(question, true))
}

/// 得到用户同意后创建并打开保存目录。只有在这里才会创建目录。
fn open_destination<F>(output: &Path, confirm: F) -> AppResult<DirectoryStore>
where
    F: FnOnce(&str) -> bool,
{
    let question = format!("小票将保存到目录 \"{}\"，是否继续?", output.display());
    if !confirm(&question) {
        info!("用户拒绝了保存目录 '{}'", output.display());
        return Err(AppError::UserCancelledGrant);
    }
    fs::create_dir_all(output)
        .with_context(|| format!("无法创建保存目录 '{}'", output.display()))?;
    DirectoryStore::open(output)
}

/// 没有找到 Cookie 且处于交互终端时，让用户当场输入一次。
fn ask_for_cookie(config: &mut AppConfig) {
    if config.cookie.is_some() || !ui::is_interactive() {
        return;
    }
    ui::warn("未找到登录 Cookie，下载很可能会被服务器拒绝。");
    match ui::prompt_hidden("请粘贴 Cookie (直接回车跳过)") {
        Ok(cookie) if !cookie.trim().is_empty() => {
            info!("使用用户手动输入的 Cookie");
            config.cookie = Some(cookie.trim().to_string());
        }
        Ok(_) => warn!("用户跳过了 Cookie 输入"),
        Err(e) => warn!("读取 Cookie 失败: {}", e),
    }
}

pub(crate) fn run_list(args: &Cli) -> AppResult<()> {
    let targets = load_targets(args)?;
    report::print_target_list(&targets);
    Ok(())
}

pub(crate) async fn run_download(args: &Cli) -> AppResult<()> {
    let targets = load_targets(args)?;
    ui::info(&format!("在页面中找到 {} 张小票。", targets.len()));

    let mut config = AppConfig::new(args)?;
    debug!("加载的应用配置: delay={:?}, timeout={:?}", config.delay, config.timeout);

    let store = grant_destination(args)?;
    ui::info(&format!("文件将保存到目录: \"{}\"", store.display_name()));

    ask_for_cookie(&mut config);
    let delay = config.delay;
    let client = RobustClient::new(Arc::new(config))?;

    let progress = ConsoleProgress::new(targets.len());
    let summary = DownloadRun::new(&client, &store, delay)
        .run(&targets, &progress)
        .await;
    progress.finish();

    report::print_summary(&summary, &store.display_name());
    if summary.failed > 0 {
        println!(
            "{} 失败的小票可以稍后重新运行本程序下载，已保存的文件会被覆盖。",
            *symbols::WARN
        );
        return Err(AppError::RunIncomplete {
            failed: summary.failed,
            total: targets.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declined_grant_cancels_without_creating_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cheques");

        let mut asked = None;
        let result = open_destination(&output, |question| {
            asked = Some(question.to_string());
            false
        });

        assert!(matches!(result, Err(AppError::UserCancelledGrant)));
        assert!(asked.unwrap().contains("cheques"));
        assert!(!output.exists());
    }

    #[test]
    fn test_accepted_grant_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("a").join("b");

        let store = open_destination(&output, |_| true).unwrap();

        assert!(output.is_dir());
        assert_eq!(
            store.display_name(),
            dunce::canonicalize(&output).unwrap().display().to_string()
        );
    }
}
