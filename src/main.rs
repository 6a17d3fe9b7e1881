// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use imgcrawlrs::config::settings::Settings;
use imgcrawlrs::crawler::Crawler;
use imgcrawlrs::infrastructure::storage::LocalStorage;
use imgcrawlrs::utils::telemetry;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，加载配置并顺序抓取配置的文章编号区间
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting imgcrawlrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Initialize storage and crawler
    let storage = LocalStorage::new(settings.storage.root.clone());
    let mut crawler = Crawler::new(settings, storage)?;

    // 4. Run the crawl loop to the end of the configured range
    crawler.run().await;

    Ok(())
}
