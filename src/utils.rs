// src/utils.rs

use crate::{
    constants::cheque,
    error::{AppError, AppResult},
};
use anyhow::Context;
use regex::Regex;
use std::{
    path::{Component, Path, PathBuf},
    sync::LazyLock,
};

/// 资源 ID 只允许小写十六进制字符和连字符
pub static RESOURCE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f-]+$").unwrap());
static ORDER_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{}([0-9a-f]+-[0-9a-f]+)_",
        regex::escape(cheque::FILENAME_PREFIX)
    ))
    .unwrap()
});

pub fn is_resource_id(text: &str) -> bool {
    RESOURCE_ID_PATTERN.is_match(text)
}

/// 根据资源 ID 生成确定的文件名：`ozon_cheque_<前两段>_<末8位>.pdf`。
///
/// ID 缺失或格式不符时返回 `None`，由调用方改用按序号命名的后备文件名。
pub fn cheque_filename(resource_id: &str) -> Option<String> {
    if !is_resource_id(resource_id) || resource_id.len() < cheque::SUFFIX_LEN {
        return None;
    }
    let mut segments = resource_id.split('-');
    let (first, second) = (segments.next()?, segments.next()?);
    if first.is_empty() || second.is_empty() {
        return None;
    }
    let suffix = &resource_id[resource_id.len() - cheque::SUFFIX_LEN..];
    Some(format!(
        "{}{}-{}_{}.{}",
        cheque::FILENAME_PREFIX,
        first,
        second,
        suffix,
        cheque::FILENAME_EXT
    ))
}

/// 后备文件名，`index` 从 1 开始。
pub fn fallback_filename(index: usize) -> String {
    format!(
        "{}{}_{:03}.{}",
        cheque::FILENAME_PREFIX,
        cheque::FALLBACK_STEM,
        index,
        cheque::FILENAME_EXT
    )
}

/// 从生成的文件名中取回订单号 (即 ID 的前两段)
pub fn order_number(filename: &str) -> Option<&str> {
    ORDER_NUMBER_RE
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}

/// 将文件名拼接到目标目录下，拒绝任何带目录成分的名字。
pub fn secure_join_filename(base_dir: &Path, filename: &str) -> AppResult<PathBuf> {
    let resolved_base = dunce::canonicalize(base_dir)
        .with_context(|| format!("保存目录 '{}' 不存在或无法访问", base_dir.display()))?;
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == filename => Ok(resolved_base.join(part)),
        _ => Err(AppError::InvalidFilename(filename.to_string())),
    }
}
