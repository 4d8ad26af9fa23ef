// src/downloader/report.rs

use crate::{
    constants,
    downloader::plan_filenames,
    extractor::TargetSet,
    models::RunSummary,
    symbols, ui, utils,
};
use colored::*;
use itertools::Itertools;
use log::info;

/// 汇总一行：成功数、失败数和保存位置
pub fn summary_line(summary: &RunSummary, destination: &str) -> String {
    format!(
        "成功: {} | 失败: {} | 保存位置: {}",
        summary.succeeded, summary.failed, destination
    )
}

pub fn print_summary(summary: &RunSummary, destination: &str) {
    info!("下载报告: {}", summary_line(summary, destination));
    ui::print_sub_header("任务总结");
    if summary.failed == 0 {
        println!(
            "{} 所有 {} 张小票均已保存到: {}",
            *symbols::OK,
            summary.succeeded,
            destination
        );
    } else {
        println!(
            "{} | {} | 保存位置: {}",
            format!("成功: {}", summary.succeeded).green(),
            format!("失败: {}", summary.failed).red(),
            destination
        );
    }
}

/// 列出所有目标，不发起任何请求。返回其中不同订单号的数量。
pub fn print_target_list(targets: &TargetSet) -> usize {
    let filenames = plan_filenames(targets);
    let unique_orders = filenames
        .iter()
        .filter_map(|name| utils::order_number(name))
        .unique()
        .count();

    ui::print_header(&format!("找到 {} 张小票", targets.len()));
    let pad = targets.len().to_string().len();
    for (i, (target, filename)) in targets.iter().zip(&filenames).enumerate() {
        let order = utils::order_number(filename).unwrap_or("-");
        println!(
            "  [{}] {} {}",
            format!("{:>pad$}", i + 1, pad = pad).yellow(),
            filename,
            format!("(订单 {})", order).dimmed()
        );
        println!(
            "  {:pad$}  {}",
            "",
            utils::truncate_text(target.as_str(), constants::URL_TRUNCATE_LENGTH).dimmed(),
            pad = pad + 2
        );
    }
    println!("\n{} 共 {} 个不同的订单。", *symbols::INFO, unique_orders);
    unique_orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TargetUrl;

    #[test]
    fn test_summary_line_contains_counts_and_destination() {
        let summary = RunSummary { succeeded: 5, failed: 2 };
        assert_eq!(
            summary_line(&summary, "/home/user/cheques"),
            "成功: 5 | 失败: 2 | 保存位置: /home/user/cheques"
        );
    }

    #[test]
    fn test_print_target_list_counts_unique_orders() {
        let targets: TargetSet = [
            "https://www.ozon.ru/my/e-check/download?id=a1b2c3-d4e5-f6-00000001&rawdata=1&download=1",
            "https://www.ozon.ru/my/e-check/download?id=a1b2c3-d4e5-f6-00000002&rawdata=1&download=1",
            "https://www.ozon.ru/my/e-check/download?id=0a0b0c-1122-ff-0000abcd&rawdata=1&download=1",
            "https://www.ozon.ru/my/e-check/download?rawdata=1&download=1",
        ]
        .into_iter()
        .map(TargetUrl::new)
        .collect();
        assert_eq!(print_target_list(&targets), 2);
    }
}
