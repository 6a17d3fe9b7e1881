// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{ElementRef, Html, Selector};

/// 常见的正文区域类名，按优先级精确匹配
const COMMON_CONTENT_CLASSES: &[&str] = &[
    "view_content",
    "article_content",
    "content",
    "board_content",
    "post_content",
    "entry_content",
    "article-content",
    "post-content",
];

/// 类名/ID中提示正文的关键词
const CONTENT_KEYWORDS: &[&str] = &["content", "article", "post"];

/// 查找文章的正文区域
///
/// 按固定优先级依次尝试各策略，命中即返回：
/// 1. 已知正文类名的精确匹配
/// 2. 类名包含关键词且文本足够长或含图片的元素
/// 3. ID包含关键词的元素（不区分大小写）
/// 4. 文本最多且超过阈值的div（最后手段）
///
/// 全部未命中时返回`None`，调用方在整个文档范围内搜索图片
pub fn find_content_area(document: &Html, min_text_len: usize) -> Option<ElementRef<'_>> {
    by_known_class(document)
        .or_else(|| by_class_keyword(document, min_text_len))
        .or_else(|| by_id_keyword(document))
        .or_else(|| by_longest_div(document, min_text_len))
}

/// 元素的简短描述，用于日志输出，如`div (class: view_content)`
pub fn describe(element: ElementRef<'_>) -> String {
    let classes: Vec<&str> = element.value().classes().collect();
    if classes.is_empty() {
        element.value().name().to_string()
    } else {
        format!("{} (class: {})", element.value().name(), classes.join(" "))
    }
}

/// 元素去除首尾空白后的可见文本长度（字符数）
pub fn text_len(element: ElementRef<'_>) -> usize {
    let text: String = element.text().collect();
    text.trim().chars().count()
}

fn contains_image(element: ElementRef<'_>) -> bool {
    match Selector::parse("img") {
        Ok(selector) => element.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

fn by_known_class(document: &Html) -> Option<ElementRef<'_>> {
    for class_name in COMMON_CONTENT_CLASSES {
        let selector_str = format!(
            "div.{cls}, article.{cls}, section.{cls}",
            cls = class_name
        );
        if let Some(selector) = Selector::parse(&selector_str).ok() {
            if let Some(element) = document.select(&selector).next() {
                return Some(element);
            }
        }
    }
    None
}

fn by_class_keyword(document: &Html, min_text_len: usize) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("div[class], article[class], section[class]").ok()?;

    for element in document.select(&selector) {
        let class_names = element
            .value()
            .classes()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if !CONTENT_KEYWORDS.iter().any(|kw| class_names.contains(kw)) {
            continue;
        }
        // 只接受文本足够长或确实包含图片的候选
        if text_len(element) > min_text_len || contains_image(element) {
            return Some(element);
        }
    }
    None
}

fn by_id_keyword(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("[id]").ok()?;

    for keyword in CONTENT_KEYWORDS {
        for element in document.select(&selector) {
            if let Some(id) = element.value().id() {
                if id.to_lowercase().contains(keyword) {
                    return Some(element);
                }
            }
        }
    }
    None
}

fn by_longest_div(document: &Html, min_text_len: usize) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("div").ok()?;

    document
        .select(&selector)
        .max_by_key(|element| text_len(*element))
        .filter(|element| text_len(*element) > min_text_len)
}
