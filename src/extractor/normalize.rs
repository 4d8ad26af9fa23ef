// src/extractor/normalize.rs

use crate::constants::cheque;
use regex::Regex;
use std::sync::LazyLock;

/// JSON 中对 `/` 的转义，十六进制大小写均可
pub(super) const SLASH: &str = r"(?:/|\\u002[fF])";
/// `&`、`&amp;`、多重转义的 `&amp;amp;` 以及 JSON 转义
pub(super) const AMPERSAND: &str = r"(?:&(?:amp;)*|\\u0026)";

static ESCAPED_SLASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\u002[fF]").unwrap());
static ESCAPED_AMPERSAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:amp;)+|\\u0026").unwrap());
static ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^https?://(?:{}|{})/",
        regex::escape(cheque::CANONICAL_HOST),
        regex::escape(cheque::APEX_HOST)
    ))
    .unwrap()
});

/// 把页面中匹配到的原始片段还原成规范链接：
/// 还原斜杠转义，折叠 `&` 实体，并统一为 `https://www.ozon.ru/`。
pub fn normalize_link(raw: &str) -> String {
    let unescaped = ESCAPED_SLASH_RE.replace_all(raw, "/");
    let collapsed = ESCAPED_AMPERSAND_RE.replace_all(&unescaped, "&");
    let canonical_origin = format!("https://{}/", cheque::CANONICAL_HOST);
    ORIGIN_RE
        .replace(&collapsed, canonical_origin.as_str())
        .into_owned()
}
