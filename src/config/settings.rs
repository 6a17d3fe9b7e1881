// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含抓取范围、HTTP请求、图片过滤和存储等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 抓取配置
    pub crawl: CrawlSettings,
    /// HTTP请求配置
    pub http: HttpSettings,
    /// 图片过滤配置
    pub filter: FilterSettings,
    /// 存储配置
    pub storage: StorageSettings,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 起始文章编号
    pub start: u64,
    /// 结束文章编号（含）
    pub end: u64,
    /// 文章页面基础URL，编号直接拼接在末尾
    pub base_url: String,
    /// 两次请求之间的礼貌延迟（秒）
    pub delay_secs: u64,
    /// 进度汇总间隔（每处理多少篇文章输出一次）
    pub report_interval: u64,
}

/// HTTP请求配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// User-Agent请求头
    pub user_agent: String,
    /// Accept请求头
    pub accept: String,
    /// Accept-Language请求头
    pub accept_language: String,
    /// Referer请求头
    pub referer: String,
    /// 页面请求超时时间（秒）
    pub page_timeout_secs: u64,
    /// 图片请求超时时间（秒）
    pub image_timeout_secs: u64,
}

/// 图片过滤配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FilterSettings {
    /// URL子串黑名单，命中即跳过（广告、图标、UI元素等）
    pub ignore_patterns: Vec<String>,
    /// 图片最小字节数，低于该值视为噪声
    pub min_image_bytes: usize,
    /// 声明宽高的最小像素值
    pub min_dimension: i64,
    /// 正文文本长度阈值（字符数）
    pub min_text_len: usize,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储根目录
    pub root: String,
    /// 图片保存目录（相对根目录）
    pub image_dir: String,
    /// 调试日志目录（相对根目录）
    pub debug_dir: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、可选配置文件和环境变量加载配置
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default crawl range and target board
            .set_default("crawl.start", 1791000)?
            .set_default("crawl.end", 1791867)?
            .set_default(
                "crawl.base_url",
                "https://www.fomos.kr/talk/article_view?bbs_id=5&indexno=",
            )?
            .set_default("crawl.delay_secs", 1)?
            .set_default("crawl.report_interval", 10)?
            // Default request headers
            .set_default(
                "http.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            )?
            .set_default(
                "http.accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )?
            .set_default("http.accept_language", "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7")?
            .set_default("http.referer", "https://www.fomos.kr/")?
            .set_default("http.page_timeout_secs", 15)?
            .set_default("http.image_timeout_secs", 10)?
            // Default filter settings
            .set_default(
                "filter.ignore_patterns",
                vec![
                    "banner", "logo", "icon", "button", "header", "footer", "nav", "avatar",
                    "bg_", "background", "ad_", "ads_", "emoji", "emoticon", "thumbnail",
                ],
            )?
            .set_default("filter.min_image_bytes", 5000)?
            .set_default("filter.min_dimension", 100)?
            .set_default("filter.min_text_len", 200)?
            // Default storage settings
            .set_default("storage.root", ".")?
            .set_default("storage.image_dir", "fomos_images")?
            .set_default("storage.debug_dir", "fomos_logs")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("IMGCRAWLRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
