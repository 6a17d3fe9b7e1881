// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::ElementRef;
use std::collections::HashSet;

/// alt文本中提示装饰性图片的词
const DECORATIVE_ALT_WORDS: &[&str] = &["logo", "icon", "banner"];

/// 图片自身类名中提示正文图片的词（精确匹配）
const IMAGE_CLASS_HINTS: &[&str] = &["content", "article", "post", "image"];

/// 父元素类名中提示正文图片的词（精确匹配）
const PARENT_CLASS_HINTS: &[&str] = &["content", "article", "post", "text"];

/// 图片URL黑名单
///
/// 按子串匹配拒绝广告、图标等装饰性资源；
/// 命中过的URL被记住，相同URL后续直接拒绝而不再匹配
pub struct IgnoreList {
    patterns: Vec<String>,
    ignored_urls: HashSet<String>,
}

impl IgnoreList {
    /// 创建新的黑名单实例
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns: patterns.into_iter().map(|p| p.to_lowercase()).collect(),
            ignored_urls: HashSet::new(),
        }
    }

    /// 检查URL是否应被忽略
    pub fn should_ignore(&mut self, url: &str) -> bool {
        if self.ignored_urls.contains(url) {
            return true;
        }

        let url_lower = url.to_lowercase();
        if self.patterns.iter().any(|p| url_lower.contains(p.as_str())) {
            self.ignored_urls.insert(url.to_string());
            return true;
        }

        false
    }

    /// 已记住的被忽略URL数量
    pub fn ignored_count(&self) -> usize {
        self.ignored_urls.len()
    }
}

/// 判断图片是否属于正文内容
///
/// 四条规则任一满足即通过：
/// 1. alt文本超过5个字符且不含装饰性词
/// 2. 声明的宽高均超过阈值（解析失败时该条不成立）
/// 3. 图片自身类名命中正文提示词
/// 4. 父元素类名命中正文提示词
pub fn is_content_image(img: &ElementRef<'_>, min_dimension: i64) -> bool {
    // 1. alt text usually means a real content image
    if let Some(alt) = img.value().attr("alt") {
        let alt_lower = alt.to_lowercase();
        if alt.chars().count() > 5
            && !DECORATIVE_ALT_WORDS.iter().any(|w| alt_lower.contains(w))
        {
            return true;
        }
    }

    // 2. declared dimensions
    let width = img.value().attr("width").and_then(|w| w.parse::<i64>().ok());
    let height = img.value().attr("height").and_then(|h| h.parse::<i64>().ok());
    if let (Some(w), Some(h)) = (width, height) {
        if w > min_dimension && h > min_dimension {
            return true;
        }
    }

    // 3. own class list
    if img
        .value()
        .classes()
        .any(|c| IMAGE_CLASS_HINTS.contains(&c.to_lowercase().as_str()))
    {
        return true;
    }

    // 4. parent class list
    if let Some(parent) = img.parent().and_then(ElementRef::wrap) {
        if parent
            .value()
            .classes()
            .any(|c| PARENT_CLASS_HINTS.contains(&c.to_lowercase().as_str()))
        {
            return true;
        }
    }

    false
}
