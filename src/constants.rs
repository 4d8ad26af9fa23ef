// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const URL_TRUNCATE_LENGTH: usize = 72;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_SAVE_DIR: &str = "cheques";
pub const DEFAULT_DELAY_MS: u64 = 1000;
pub const COOKIE_ENV_VAR: &str = "OZON_COOKIE";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const HELP_COOKIE_GUIDE: &str = r#"
1. 登录 Ozon: 使用 Chrome / Edge / Firefox 浏览器登录。
   (订单页面: https://www.ozon.ru/my/orderlist)
2. 将订单列表页面完整滚动到底部，确保所有订单都已加载。
3. 按 Ctrl+S (macOS: Cmd+S) 将页面保存为 "网页，完整" 或 "仅 HTML"。
4. 打开开发者工具 (F12)，切换到 "网络" (Network) 标签页并刷新页面。
5. 选中任意一个发往 www.ozon.ru 的请求，在 "请求标头" 中复制 Cookie 的完整值。
6. 运行:
----------------------------------------------
ozon-cheque-dl --html orders.html --cookie "<复制的 Cookie>"
----------------------------------------------
也可以把 Cookie 写入环境变量 OZON_COOKIE 或配置文件中的 "cookie" 字段。"#;

pub mod cheque {
    /// 电子小票下载链接的规范主机名
    pub const CANONICAL_HOST: &str = "www.ozon.ru";
    /// 页面中可能出现的裸域名写法
    pub const APEX_HOST: &str = "ozon.ru";
    pub const DOWNLOAD_PATH: &str = "/my/e-check/download";
    pub const FILENAME_PREFIX: &str = "ozon_cheque_";
    pub const FILENAME_EXT: &str = "pdf";
    pub const FALLBACK_STEM: &str = "item";
    pub const SUFFIX_LEN: usize = 8;
}
