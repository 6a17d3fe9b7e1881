// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 抓取运行统计信息
///
/// 计数器只在单一抓取线程中单调递增，整个运行期间存活
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    /// 处理过的文章数
    pub total_articles: u64,
    /// 至少下载到一张图片的文章数
    pub articles_with_images: u64,
    /// 在正文范围内发现的图片总数
    pub total_images_found: u64,
    /// 下载的去重后图片数
    pub unique_images_downloaded: u64,
    /// 因内容哈希重复而跳过的图片数
    pub duplicates_skipped: u64,
    /// 错误次数
    pub errors: u64,
}

impl fmt::Display for CrawlStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "articles={} with_images={} images_found={} downloaded={} duplicates={} errors={}",
            self.total_articles,
            self.articles_with_images,
            self.total_images_found,
            self.unique_images_downloaded,
            self.duplicates_skipped,
            self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_display() {
        let stats = CrawlStats {
            total_articles: 10,
            articles_with_images: 3,
            total_images_found: 12,
            unique_images_downloaded: 5,
            duplicates_skipped: 2,
            errors: 1,
        };

        assert_eq!(
            stats.to_string(),
            "articles=10 with_images=3 images_found=12 downloaded=5 duplicates=2 errors=1"
        );
    }
}
