// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::crawler::content_area::text_len;
use scraper::{ElementRef, Html, Selector};
use std::fmt::Write;

/// 生成页面结构调试报告
///
/// 包含页面标题、疑似正文区域的div统计以及全部图片标签的属性，
/// 用于排查正文识别和图片过滤的误判
pub fn build_report(document: &Html, min_text_len: usize) -> String {
    let mut report = String::new();

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .map(|t| t.text().collect::<String>().trim().to_string())
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "(no title)".to_string());
    let _ = writeln!(report, "page title: {}\n", title);

    let _ = writeln!(report, "=== candidate content areas ===");
    if let Ok(sel) = Selector::parse("div[class]") {
        let img_sel = Selector::parse("img").ok();
        for div in document.select(&sel) {
            let class_name = div.value().classes().collect::<Vec<_>>().join(" ");
            let img_count = img_sel
                .as_ref()
                .map(|s| div.select(s).count())
                .unwrap_or(0);
            let len = text_len(div);
            // 只记录有图片或文本较多的div
            if img_count > 0 || len > min_text_len {
                let _ = writeln!(
                    report,
                    "class: {}, images: {}, text length: {}",
                    class_name, img_count, len
                );
            }
        }
    }

    let _ = writeln!(report, "\n=== image tags ===");
    if let Ok(sel) = Selector::parse("img") {
        for (i, img) in document.select(&sel).enumerate() {
            let src = img
                .value()
                .attr("src")
                .or_else(|| img.value().attr("data-src"))
                .unwrap_or("(none)");
            let alt = img.value().attr("alt").unwrap_or("(none)");
            let width = img.value().attr("width").unwrap_or("(none)");
            let height = img.value().attr("height").unwrap_or("(none)");
            let (parent_name, parent_class) = parent_info(&img);

            let _ = writeln!(report, "image #{}:", i + 1);
            let _ = writeln!(report, "  src: {}", src);
            let _ = writeln!(report, "  alt: {}", alt);
            let _ = writeln!(report, "  size: {}x{}", width, height);
            let _ = writeln!(
                report,
                "  parent: {}, class: {}\n",
                parent_name, parent_class
            );
        }
    }

    report
}

fn parent_info(img: &ElementRef<'_>) -> (String, String) {
    match img.parent().and_then(ElementRef::wrap) {
        Some(parent) => {
            let classes: Vec<&str> = parent.value().classes().collect();
            let class_str = if classes.is_empty() {
                "(none)".to_string()
            } else {
                classes.join(" ")
            };
            (parent.value().name().to_string(), class_str)
        }
        None => ("(none)".to_string(), "(none)".to_string()),
    }
}
