// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 爬虫错误类型
///
/// 所有变体在运行循环内就地恢复并计数，不会中止整个抓取
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("页面抓取失败: {0}")]
    Fetch(String),

    #[error("HTML解析失败: {0}")]
    Parse(String),

    #[error("图片下载失败: {0}")]
    Download(String),

    #[error("存储错误: {0}")]
    Storage(String),

    #[error("HTTP客户端构建失败: {0}")]
    Client(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}
