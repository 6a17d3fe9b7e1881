// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use imgcrawlrs::config::settings::{
    CrawlSettings, FilterSettings, HttpSettings, Settings, StorageSettings,
};
use imgcrawlrs::crawler::Crawler;
use imgcrawlrs::infrastructure::storage::{InMemoryStorage, LocalStorage};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_settings(server_uri: &str) -> Settings {
    Settings {
        crawl: CrawlSettings {
            start: 5,
            end: 5,
            base_url: format!("{}/talk/article_view?indexno=", server_uri),
            delay_secs: 0,
            report_interval: 10,
        },
        http: HttpSettings {
            user_agent: "imgcrawlrs-test".to_string(),
            accept: "text/html,*/*;q=0.8".to_string(),
            accept_language: "ko-KR,ko;q=0.9".to_string(),
            referer: server_uri.to_string(),
            page_timeout_secs: 15,
            image_timeout_secs: 10,
        },
        filter: FilterSettings {
            ignore_patterns: vec![
                "banner", "logo", "icon", "button", "header", "footer", "nav", "avatar", "bg_",
                "background", "ad_", "ads_", "emoji", "emoticon", "thumbnail",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_image_bytes: 5000,
            min_dimension: 100,
            min_text_len: 200,
        },
        storage: StorageSettings {
            root: ".".to_string(),
            image_dir: "fomos_images".to_string(),
            debug_dir: "fomos_logs".to_string(),
        },
    }
}

async fn mount_article(server: &MockServer, id: &str, html: String) {
    Mock::given(method("GET"))
        .and(path("/talk/article_view"))
        .and(query_param("indexno", id))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(html.into_bytes(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, url_path: &str, body: Vec<u8>, content_type: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_single_article() {
    let server = MockServer::start().await;

    let html = r#"
        <html><head><title>fomos article</title></head><body>
            <div class="view_content">
                <img src="/ad_banner.png" alt="interesting large graphic">
                <img src="/photo.png" alt="diagram of pipeline">
            </div>
        </body></html>
    "#;
    mount_article(&server, "5", html.to_string()).await;
    mount_image(&server, "/photo.png", vec![0xAB; 5300], "image/png").await;

    // 黑名单命中的URL绝不发起内容请求
    Mock::given(method("GET"))
        .and(path("/ad_banner.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().to_string_lossy().to_string());
    let mut crawler = Crawler::new(test_settings(&server.uri()), storage).unwrap();

    let downloaded = crawler.process_article(5).await;

    assert_eq!(downloaded, 1);
    let image_path = dir.path().join("fomos_images").join("5_1.png");
    assert!(image_path.exists());
    assert_eq!(std::fs::read(&image_path).unwrap().len(), 5300);
    assert!(dir.path().join("fomos_logs").join("debug_5.txt").exists());

    let stats = crawler.stats();
    assert_eq!(stats.total_articles, 1);
    assert_eq!(stats.articles_with_images, 1);
    assert_eq!(stats.total_images_found, 2);
    assert_eq!(stats.unique_images_downloaded, 1);
    assert_eq!(stats.duplicates_skipped, 0);
    assert_eq!(stats.errors, 0);
}

#[tokio::test]
async fn test_rerun_skips_duplicate_content() {
    let server = MockServer::start().await;

    let html = r#"
        <html><body>
            <div class="view_content"><img src="/photo.jpg" alt="diagram of pipeline"></div>
        </body></html>
    "#;
    mount_article(&server, "5", html.to_string()).await;
    mount_image(&server, "/photo.jpg", vec![0x11; 6000], "image/jpeg").await;

    let storage = InMemoryStorage::new();
    let files = storage.clone();
    let mut crawler = Crawler::new(test_settings(&server.uri()), storage).unwrap();

    assert_eq!(crawler.process_article(5).await, 1);
    // 同一进程内重复处理同一文章，内容哈希已注册
    assert_eq!(crawler.process_article(5).await, 0);

    let stats = crawler.stats();
    assert_eq!(stats.unique_images_downloaded, 1);
    assert_eq!(stats.duplicates_skipped, 1);
    assert_eq!(stats.errors, 0);

    let keys = files.keys().await;
    let image_keys: Vec<&String> = keys
        .iter()
        .filter(|k| k.starts_with("fomos_images/"))
        .collect();
    assert_eq!(image_keys, vec!["fomos_images/5_1.jpg"]);
}

#[tokio::test]
async fn test_identical_bytes_from_different_urls_deduplicated() {
    let server = MockServer::start().await;

    let html = r#"
        <html><body>
            <div class="view_content">
                <img src="/one.png" alt="diagram of pipeline">
                <img src="/two.png" alt="another real photo">
            </div>
        </body></html>
    "#;
    mount_article(&server, "5", html.to_string()).await;
    let body = vec![0x42; 8000];
    mount_image(&server, "/one.png", body.clone(), "image/png").await;
    mount_image(&server, "/two.png", body, "image/png").await;

    let storage = InMemoryStorage::new();
    let files = storage.clone();
    let mut crawler = Crawler::new(test_settings(&server.uri()), storage).unwrap();

    let downloaded = crawler.process_article(5).await;

    assert_eq!(downloaded, 1);
    assert_eq!(crawler.stats().duplicates_skipped, 1);

    let keys = files.keys().await;
    assert!(keys.contains(&"fomos_images/5_1.png".to_string()));
    assert!(!keys.iter().any(|k| k.ends_with("5_2.png")));
}

#[tokio::test]
async fn test_size_floor_boundary() {
    let server = MockServer::start().await;

    let html = r#"
        <html><body>
            <div class="view_content">
                <img src="/tiny.gif" alt="diagram of pipeline">
                <img src="/exact.gif" alt="another real photo">
            </div>
        </body></html>
    "#;
    mount_article(&server, "5", html.to_string()).await;
    // 4999字节拒绝，5000字节接受（边界含在接受侧）
    mount_image(&server, "/tiny.gif", vec![0u8; 4999], "image/gif").await;
    mount_image(&server, "/exact.gif", vec![0u8; 5000], "image/gif").await;

    let storage = InMemoryStorage::new();
    let files = storage.clone();
    let mut crawler = Crawler::new(test_settings(&server.uri()), storage).unwrap();

    let downloaded = crawler.process_article(5).await;

    assert_eq!(downloaded, 1);
    assert_eq!(crawler.stats().errors, 0);

    let keys = files.keys().await;
    assert!(!keys.iter().any(|k| k.ends_with("5_1.gif")));
    assert!(keys.contains(&"fomos_images/5_2.gif".to_string()));
}

#[tokio::test]
async fn test_non_image_content_type_rejected() {
    let server = MockServer::start().await;

    let html = r#"
        <html><body>
            <div class="view_content"><img src="/fake.png" alt="diagram of pipeline"></div>
        </body></html>
    "#;
    mount_article(&server, "5", html.to_string()).await;
    mount_image(&server, "/fake.png", vec![0u8; 9000], "text/html").await;

    let storage = InMemoryStorage::new();
    let files = storage.clone();
    let mut crawler = Crawler::new(test_settings(&server.uri()), storage).unwrap();

    let downloaded = crawler.process_article(5).await;

    assert_eq!(downloaded, 0);
    assert_eq!(crawler.stats().errors, 0);
    assert!(!files.keys().await.iter().any(|k| k.starts_with("fomos_images/")));
}

#[tokio::test]
async fn test_article_fetch_failure_is_swallowed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/talk/article_view"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let storage = InMemoryStorage::new();
    let mut crawler = Crawler::new(test_settings(&server.uri()), storage).unwrap();

    let downloaded = crawler.process_article(5).await;

    assert_eq!(downloaded, 0);
    let stats = crawler.stats();
    assert_eq!(stats.total_articles, 1);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.articles_with_images, 0);
}

#[tokio::test]
async fn test_run_loop_processes_whole_range() {
    let server = MockServer::start().await;

    for id in 5..=7 {
        let html = format!(
            r#"<html><body><div class="view_content"><img src="/img_{}.png" alt="diagram of pipeline"></div></body></html>"#,
            id
        );
        mount_article(&server, &id.to_string(), html).await;
        mount_image(
            &server,
            &format!("/img_{}.png", id),
            vec![id as u8; 6000],
            "image/png",
        )
        .await;
    }

    let mut settings = test_settings(&server.uri());
    settings.crawl.start = 5;
    settings.crawl.end = 7;

    let storage = InMemoryStorage::new();
    let files = storage.clone();
    let mut crawler = Crawler::new(settings, storage).unwrap();

    crawler.run().await;

    let stats = crawler.stats();
    assert_eq!(stats.total_articles, 3);
    assert_eq!(stats.articles_with_images, 3);
    assert_eq!(stats.unique_images_downloaded, 3);
    assert_eq!(stats.errors, 0);

    let keys = files.keys().await;
    for id in 5..=7 {
        assert!(keys.contains(&format!("fomos_images/{}_1.png", id)));
        assert!(keys.contains(&format!("fomos_logs/debug_{}.txt", id)));
    }
}
