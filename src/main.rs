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

use axum::Extension;
use solvrs::config::settings::Settings;
use solvrs::domain::services::answer_service::AnswerDeriver;
use solvrs::domain::services::solve_service::SolveService;
use solvrs::engines::browser_engine::BrowserEngine;
use solvrs::infrastructure::oracle::GeminiOracle;
use solvrs::infrastructure::submit_client::SubmitClient;
use solvrs::presentation::routes;
use solvrs::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting solvrs...");

    // 2. Load configuration (fails fast on missing secret / oracle key,
    //    before any I/O happens)
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Initialize pipeline components
    let engine = BrowserEngine::new(settings.pipeline.settle());
    let oracle = GeminiOracle::new(&settings.oracle)?;
    let deriver = AnswerDeriver::new(
        oracle,
        settings.pipeline.excerpt_chars,
        settings.pipeline.oracle_timeout(),
    );
    let submitter = SubmitClient::new(settings.pipeline.submit_timeout())?;
    let service = Arc::new(SolveService::new(
        engine,
        deriver,
        submitter,
        settings.pipeline.render_timeout(),
    ));
    info!("Solve pipeline initialized");

    // 4. Start HTTP server
    let app = routes::routes::<GeminiOracle>()
        .layer(TraceLayer::new_for_http())
        .layer(Extension(service))
        .layer(Extension(settings.clone()));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
