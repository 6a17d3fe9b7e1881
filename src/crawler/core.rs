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

use crate::config::settings::Settings;
use crate::crawler::downloader::{DownloadOutcome, ImageDownloader};
use crate::crawler::image_filter::IgnoreList;
use crate::crawler::page::{self, ArticlePage};
use crate::crawler::stats::CrawlStats;
use crate::infrastructure::storage::StorageRepository;
use crate::utils::errors::CrawlError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// 内容爬虫
///
/// 持有整个运行期间的全部可变状态：HTTP客户端、URL黑名单、
/// 内容哈希注册表和统计计数器。单线程顺序执行，无需同步
pub struct Crawler<S: StorageRepository> {
    client: Client,
    settings: Settings,
    storage: Arc<S>,
    ignore_list: IgnoreList,
    downloader: ImageDownloader<S>,
    stats: CrawlStats,
}

impl<S: StorageRepository> Crawler<S> {
    /// 创建新的爬虫实例
    ///
    /// 按配置构建带固定请求头的HTTP客户端
    ///
    /// # 返回值
    ///
    /// * `Ok(Crawler)` - 新的爬虫实例
    /// * `Err(CrawlError)` - 请求头非法或客户端构建失败
    pub fn new(settings: Settings, storage: S) -> Result<Self, CrawlError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&settings.http.accept)
                .map_err(|e| CrawlError::Client(e.to_string()))?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&settings.http.accept_language)
                .map_err(|e| CrawlError::Client(e.to_string()))?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&settings.http.referer)
                .map_err(|e| CrawlError::Client(e.to_string()))?,
        );

        let client = Client::builder()
            .user_agent(&settings.http.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| CrawlError::Client(e.to_string()))?;

        let storage = Arc::new(storage);
        let downloader = ImageDownloader::new(client.clone(), settings.clone(), storage.clone());
        let ignore_list = IgnoreList::new(settings.filter.ignore_patterns.clone());

        Ok(Self {
            client,
            settings,
            storage,
            ignore_list,
            downloader,
            stats: CrawlStats::default(),
        })
    }

    /// 当前统计信息
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// 运行主循环
    ///
    /// 按编号从`start`到`end`（含）逐篇处理文章，文章之间
    /// 等待礼貌延迟，按配置间隔输出进度汇总
    pub async fn run(&mut self) {
        let start = self.settings.crawl.start;
        let end = self.settings.crawl.end;
        let delay = self.settings.crawl.delay_secs;
        let interval = self.settings.crawl.report_interval;

        info!(start, end, "starting image crawl");

        for id in start..=end {
            self.process_article(id).await;

            let processed = id - start + 1;
            if (interval > 0 && processed % interval == 0) || id == end {
                info!(stats = %self.stats, "crawl progress");
            }

            // 过度请求防护，固定延迟而非限流反馈
            if id != end {
                sleep(Duration::from_secs(delay)).await;
            }
        }

        info!(stats = %self.stats, "crawl finished");
        info!(
            image_dir = %self.settings.storage.image_dir,
            debug_dir = %self.settings.storage.debug_dir,
            "output directories"
        );
    }

    /// 处理单篇文章
    ///
    /// 抓取 → 定位正文 → 过滤图片 → 去重下载，任一环节失败
    /// 只计入统计并跳过，绝不中止整个运行
    ///
    /// # 参数
    ///
    /// * `id` - 文章编号
    ///
    /// # 返回值
    ///
    /// 本篇文章新下载（非重复）的图片数
    pub async fn process_article(&mut self, id: u64) -> u32 {
        self.stats.total_articles += 1;

        let page_url_str = format!("{}{}", self.settings.crawl.base_url, id);
        info!(article = id, url = %page_url_str, "processing article");

        let page_url = match Url::parse(&page_url_str) {
            Ok(url) => url,
            Err(e) => {
                warn!(article = id, error = %e, "invalid article url");
                self.stats.errors += 1;
                return 0;
            }
        };

        let body = match self.fetch_page(page_url.clone()).await {
            Ok(body) => body,
            Err(e) => {
                warn!(article = id, error = %e, "failed to fetch article page");
                self.stats.errors += 1;
                return 0;
            }
        };

        // 解析阶段完全同步，Html不跨await点持有
        let page = {
            let document = Html::parse_document(&body);
            page::extract(
                &document,
                &page_url,
                &self.settings.filter,
                &mut self.ignore_list,
            )
        };

        self.save_debug_dump(id, &page).await;

        match &page.content_area {
            Some(desc) => debug!(article = id, area = %desc, "content area identified"),
            None => warn!(
                article = id,
                "content area not identified, scanning whole document"
            ),
        }

        self.stats.total_images_found += page.images_found as u64;
        debug!(
            article = id,
            found = page.images_found,
            candidates = page.candidates.len(),
            "image candidates collected"
        );

        let mut downloaded = 0u32;
        for (i, candidate) in page.candidates.iter().enumerate() {
            match self
                .downloader
                .download(&candidate.url, id, i + 1, &mut self.ignore_list)
                .await
            {
                Ok(DownloadOutcome::Saved { filename, size }) => {
                    info!(
                        article = id,
                        file = %filename,
                        kb = size as f64 / 1024.0,
                        "image saved"
                    );
                    self.stats.unique_images_downloaded += 1;
                    downloaded += 1;
                }
                Ok(DownloadOutcome::Duplicate) => {
                    debug!(article = id, url = %candidate.url, "duplicate image skipped");
                    self.stats.duplicates_skipped += 1;
                }
                Ok(DownloadOutcome::Skipped(reason)) => {
                    debug!(article = id, url = %candidate.url, ?reason, "image skipped");
                }
                Err(e) => {
                    warn!(article = id, url = %candidate.url, error = %e, "image download error");
                    self.stats.errors += 1;
                }
            }
        }

        if downloaded > 0 {
            self.stats.articles_with_images += 1;
            info!(article = id, downloaded, "article images downloaded");
        }

        downloaded
    }

    /// 抓取文章页面正文
    async fn fetch_page(&self, url: Url) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.settings.http.page_timeout_secs))
            .send()
            .await
            .map_err(|e| CrawlError::Fetch(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(CrawlError::Fetch(format!("unexpected status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| CrawlError::Parse(e.to_string()))
    }

    /// 写入页面结构调试报告，失败只记录日志
    async fn save_debug_dump(&self, id: u64, page: &ArticlePage) {
        let key = format!("{}/debug_{}.txt", self.settings.storage.debug_dir, id);
        if let Err(e) = self.storage.save(&key, page.debug_report.as_bytes()).await {
            warn!(article = id, error = %e, "failed to write debug dump");
        }
    }
}
