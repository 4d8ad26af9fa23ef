// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{TempDir, tempdir};

const PAGE_WITH_DUPLICATES: &str = concat!(
    "<html><body>",
    "<script>window.__STATE__={\"url\":\"https:\\u002F\\u002Fwww.ozon.ru\\u002Fmy\\u002Fe-check\\u002Fdownload?id=a1b2c3-d4e5-f6-00000001&rawdata=1&download=1\"}</script>",
    "<a href=\"https://ozon.ru/my/e-check/download?id=a1b2c3-d4e5-f6-00000001&amp;amp;rawdata=1&amp;amp;download=1\">Чек</a>",
    "<a href=\"https://www.ozon.ru/my/e-check/download?id=0a0b0c-1122-ff-0000abcd&amp;rawdata=1&amp;download=1\">Чек</a>",
    "</body></html>",
);

// 每个测试使用独立的 HOME，避免读写真实的配置文件
fn main_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home.path()).env_remove("OZON_COOKIE");
    cmd
}

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"));
}

#[test]
fn test_cookie_help_command() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--cookie-help")
        .assert()
        .success()
        .stdout(predicate::str::contains("获取登录 Cookie 指南"));
}

#[test]
fn test_missing_mode_shows_usage() {
    let home = tempdir().unwrap();
    main_command(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: ozon-cheque-dl"));
}

#[test]
fn test_list_mode_deduplicates_targets() {
    let home = tempdir().unwrap();
    let page = home.path().join("orders.html");
    fs::write(&page, PAGE_WITH_DUPLICATES).unwrap();

    main_command(&home)
        .arg("--html")
        .arg(&page)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("找到 2 张小票"))
        .stdout(predicate::str::contains("ozon_cheque_a1b2c3-d4e5_00000001.pdf"))
        .stdout(predicate::str::contains("ozon_cheque_0a0b0c-1122_0000abcd.pdf"))
        .stdout(predicate::str::contains("共 2 个不同的订单"));
}

#[test]
fn test_list_mode_reads_stdin() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--stdin")
        .arg("--list")
        .write_stdin(PAGE_WITH_DUPLICATES)
        .assert()
        .success()
        .stdout(predicate::str::contains("找到 2 张小票"));
}

#[test]
fn test_page_without_cheques_aborts_before_downloading() {
    let home = tempdir().unwrap();
    let page = home.path().join("empty.html");
    fs::write(&page, "<html><body>У вас пока нет заказов</body></html>").unwrap();
    let output = home.path().join("out");

    main_command(&home)
        .arg("--html")
        .arg(&page)
        .arg("-o")
        .arg(&output)
        .arg("-y")
        .assert()
        .failure()
        .stderr(predicate::str::contains("页面中未找到任何电子小票下载链接"));

    // 没有任何目标时不会创建保存目录，也不会生成配置文件
    assert!(!output.exists());
    assert!(!home.path().join(".ozon-cheque-dl").join("config.json").exists());
}

#[test]
fn test_missing_html_file_is_reported() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--html")
        .arg(home.path().join("nope.html"))
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("读取页面文件"));
}
