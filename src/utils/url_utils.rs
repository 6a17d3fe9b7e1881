// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 规范化图片URL
///
/// 排除空URL、`javascript:`伪链接和裸`#`片段，
/// 并将相对路径解析为基于页面URL的绝对URL
pub fn normalize_url(base: &Url, raw: &str) -> Option<Url> {
    if raw.is_empty() || raw == "#" || raw.starts_with("javascript:") {
        return None;
    }

    base.join(raw).ok()
}
