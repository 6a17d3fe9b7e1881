// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 爬虫模块
///
/// 按文章编号顺序抓取页面，启发式定位正文区域，
/// 过滤装饰性图片并按内容哈希去重下载
pub mod content_area;
pub mod core;
pub mod debug_dump;
pub mod downloader;
pub mod image_filter;
pub mod page;
pub mod stats;

pub use self::core::Crawler;
pub use downloader::{DownloadOutcome, SkipReason};
pub use stats::CrawlStats;
