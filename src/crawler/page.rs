// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::FilterSettings;
use crate::crawler::content_area;
use crate::crawler::debug_dump;
use crate::crawler::image_filter::{self, IgnoreList};
use crate::utils::url_utils;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// 候选图片
///
/// 已通过URL规范化、黑名单和正文过滤，等待下载
#[derive(Debug, Clone)]
pub struct CandidateImage {
    /// 解析后的绝对URL
    pub url: Url,
    /// alt文本（如有）
    pub alt: Option<String>,
}

/// 单篇文章页面的提取结果
///
/// 解析阶段完全同步，`Html`不跨await点持有
#[derive(Debug)]
pub struct ArticlePage {
    /// 选中的正文区域描述，`None`表示回退到全文搜索
    pub content_area: Option<String>,
    /// 搜索范围内发现的图片数
    pub images_found: usize,
    /// 过滤后按文档顺序排列的候选图片
    pub candidates: Vec<CandidateImage>,
    /// 页面结构调试报告
    pub debug_report: String,
}

/// 从解析后的文档提取候选图片
pub fn extract(
    document: &Html,
    page_url: &Url,
    filter: &FilterSettings,
    ignore: &mut IgnoreList,
) -> ArticlePage {
    let debug_report = debug_dump::build_report(document, filter.min_text_len);

    let area = content_area::find_content_area(document, filter.min_text_len);
    let content_area_desc = area.map(content_area::describe);

    let img_selector = match Selector::parse("img") {
        Ok(s) => s,
        Err(_) => {
            return ArticlePage {
                content_area: content_area_desc,
                images_found: 0,
                candidates: Vec::new(),
                debug_report,
            }
        }
    };

    let images: Vec<ElementRef<'_>> = match area {
        Some(element) => element.select(&img_selector).collect(),
        None => document.select(&img_selector).collect(),
    };
    let images_found = images.len();

    let mut candidates = Vec::new();
    for img in images {
        let raw = match img.value().attr("src").or_else(|| img.value().attr("data-src")) {
            Some(raw) => raw,
            None => continue,
        };
        let url = match url_utils::normalize_url(page_url, raw) {
            Some(url) => url,
            None => continue,
        };
        // 黑名单先于正文过滤，命中的URL不再进入后续判断
        if ignore.should_ignore(url.as_str()) {
            continue;
        }
        if !image_filter::is_content_image(&img, filter.min_dimension) {
            continue;
        }
        candidates.push(CandidateImage {
            url,
            alt: img.value().attr("alt").map(str::to_string),
        });
    }

    ArticlePage {
        content_area: content_area_desc,
        images_found,
        candidates,
        debug_report,
    }
}
