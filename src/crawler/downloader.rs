// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::crawler::image_filter::IgnoreList;
use crate::infrastructure::storage::StorageRepository;
use crate::utils::errors::CrawlError;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// 单次图片下载的结果
#[derive(Debug)]
pub enum DownloadOutcome {
    /// 新图片已写入存储
    Saved {
        /// 存储文件名，形如`{文章编号}_{图片序号}.{扩展名}`
        filename: String,
        /// 图片字节数
        size: usize,
    },
    /// 内容哈希与已下载图片重复
    Duplicate,
    /// 未发起或未完成下载
    Skipped(SkipReason),
}

/// 跳过下载的原因
#[derive(Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// URL命中黑名单，未发起网络请求
    IgnoredUrl,
    /// 响应状态码非200
    BadStatus(u16),
    /// Content-Type不是图片
    NotImage(String),
    /// 图片字节数低于噪声阈值
    TooSmall(usize),
}

/// 图片下载器
///
/// 持有内容哈希注册表，保证相同字节的图片在一次运行中只落盘一次。
/// 注册表不跨运行持久化，重启后可能重复下载已在磁盘上的图片
pub struct ImageDownloader<S: StorageRepository> {
    client: Client,
    settings: Settings,
    storage: Arc<S>,
    image_hashes: HashSet<String>,
}

impl<S: StorageRepository> ImageDownloader<S> {
    /// 创建新的下载器实例
    pub fn new(client: Client, settings: Settings, storage: Arc<S>) -> Self {
        Self {
            client,
            settings,
            storage,
            image_hashes: HashSet::new(),
        }
    }

    /// 下载单张图片并执行去重
    ///
    /// # 参数
    ///
    /// * `img_url` - 规范化后的图片URL
    /// * `article_id` - 所属文章编号
    /// * `image_index` - 图片在该文章候选列表中的序号（从1开始）
    /// * `ignore` - URL黑名单
    ///
    /// # 返回值
    ///
    /// * `Ok(DownloadOutcome)` - 下载结果（保存、重复或跳过）
    /// * `Err(CrawlError)` - 传输失败或存储失败
    pub async fn download(
        &mut self,
        img_url: &Url,
        article_id: u64,
        image_index: usize,
        ignore: &mut IgnoreList,
    ) -> Result<DownloadOutcome, CrawlError> {
        // Re-check the deny list so direct callers get the same guarantee
        if ignore.should_ignore(img_url.as_str()) {
            return Ok(DownloadOutcome::Skipped(SkipReason::IgnoredUrl));
        }

        let response = self
            .client
            .get(img_url.clone())
            .timeout(Duration::from_secs(self.settings.http.image_timeout_secs))
            .send()
            .await
            .map_err(|e| CrawlError::Download(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Ok(DownloadOutcome::Skipped(SkipReason::BadStatus(status)));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("image") {
            return Ok(DownloadOutcome::Skipped(SkipReason::NotImage(content_type)));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| CrawlError::Download(e.to_string()))?;

        // Spacer gifs and tracking pixels fall under this floor
        if data.len() < self.settings.filter.min_image_bytes {
            return Ok(DownloadOutcome::Skipped(SkipReason::TooSmall(data.len())));
        }

        let digest = hex::encode(Sha256::digest(&data));
        if !self.image_hashes.insert(digest) {
            return Ok(DownloadOutcome::Duplicate);
        }

        let ext = extension_for(&content_type);
        let filename = format!("{}_{}.{}", article_id, image_index, ext);
        let key = format!("{}/{}", self.settings.storage.image_dir, filename);
        self.storage
            .save(&key, &data)
            .await
            .map_err(|e| CrawlError::Storage(e.to_string()))?;

        Ok(DownloadOutcome::Saved {
            filename,
            size: data.len(),
        })
    }

    /// 注册表中已记录的内容哈希数
    pub fn unique_hashes(&self) -> usize {
        self.image_hashes.len()
    }
}

/// 根据Content-Type推断文件扩展名，未知类型回退为jpg
fn extension_for(content_type: &str) -> &'static str {
    if content_type.contains("png") {
        "png"
    } else if content_type.contains("gif") {
        "gif"
    } else {
        "jpg"
    }
}
