// src/extractor/mod.rs

mod normalize;

pub use normalize::normalize_link;

use crate::{
    constants::cheque,
    error::{AppError, AppResult},
    models::TargetUrl,
};
use indexmap::IndexSet;
use log::{debug, info};
use regex::Regex;
use std::sync::LazyLock;

/// 同时覆盖两种转义方式的下载链接模式，一次扫描即可找出所有候选。
static CHEQUE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    let path: String = cheque::DOWNLOAD_PATH
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("{}{}", normalize::SLASH, regex::escape(segment)))
        .collect();
    Regex::new(&format!(
        r"https?:{slash}{slash}(?:{canonical}|{apex}){path}\?id=[0-9a-f-]+{amp}rawdata=1{amp}download=1\b",
        slash = normalize::SLASH,
        amp = normalize::AMPERSAND,
        canonical = regex::escape(cheque::CANONICAL_HOST),
        apex = regex::escape(cheque::APEX_HOST),
        path = path,
    ))
    .unwrap()
});

/// 按首次出现顺序保存、不含重复项的下载目标集合。
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    urls: IndexSet<TargetUrl>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一个链接，已存在时返回 `false` 且不改变顺序。
    pub fn insert(&mut self, url: TargetUrl) -> bool {
        self.urls.insert(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TargetUrl> {
        self.urls.get_index(index)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, TargetUrl> {
        self.urls.iter()
    }
}

impl FromIterator<TargetUrl> for TargetSet {
    fn from_iter<I: IntoIterator<Item = TargetUrl>>(iter: I) -> Self {
        Self {
            urls: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a TargetUrl;
    type IntoIter = indexmap::set::Iter<'a, TargetUrl>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}

/// 从页面源码中提取所有电子小票链接。
///
/// 纯函数：不会失败，找不到任何链接时返回空集合。
pub fn extract(markup: &str) -> TargetSet {
    let mut raw_matches = 0usize;
    let mut targets = TargetSet::new();
    for found in CHEQUE_LINK_RE.find_iter(markup) {
        raw_matches += 1;
        let url = TargetUrl::new(normalize_link(found.as_str()));
        if !targets.insert(url) {
            debug!("忽略重复链接: {}", found.as_str());
        }
    }
    debug!(
        "页面源码 {} 字节，匹配 {} 处，去重后 {} 个链接",
        markup.len(),
        raw_matches,
        targets.len()
    );
    targets
}

/// 同 [`extract`]，但把空结果变成 [`AppError::NoTargetsFound`]，便于调用方提前终止。
pub fn extract_targets(markup: &str) -> AppResult<TargetSet> {
    let targets = extract(markup);
    if targets.is_empty() {
        return Err(AppError::NoTargetsFound);
    }
    info!("从页面中提取到 {} 个小票链接", targets.len());
    Ok(targets)
}
