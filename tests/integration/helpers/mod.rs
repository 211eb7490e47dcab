// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::Extension;
use axum_test::TestServer;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use solvrs::config::settings::{
    AuthSettings, OracleSettings, PipelineSettings, ServerSettings, Settings,
};
use solvrs::domain::services::answer_service::AnswerDeriver;
use solvrs::domain::services::solve_service::SolveService;
use solvrs::engines::browser_engine::BrowserEngine;
use solvrs::engines::traits::ExtractedContent;
use solvrs::infrastructure::oracle::{AnswerOracle, OracleError};
use solvrs::infrastructure::submit_client::SubmitClient;
use solvrs::presentation::routes;
use solvrs::utils::deadline::Budget;

/// 脚本化预言机
///
/// 返回固定文本，并记录调用次数和收到的提示，
/// 供测试断言预言机层是否被触达。
pub struct ScriptedOracle {
    pub reply: String,
    pub calls: Arc<AtomicUsize>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedOracle {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl AnswerOracle for ScriptedOracle {
    async fn answer(&self, prompt: &str, _timeout: Duration) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// 构造一套测试用配置
pub fn test_settings(secret: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        auth: AuthSettings {
            secret: secret.to_string(),
        },
        pipeline: PipelineSettings {
            total_budget_secs: 170,
            budget_floor_secs: 5,
            render_timeout_secs: 60,
            settle_ms: 0,
            oracle_timeout_secs: 60,
            submit_timeout_secs: 30,
            excerpt_chars: 4000,
        },
        oracle: OracleSettings {
            endpoint: "http://127.0.0.1:0".to_string(),
            model: "test-model".to_string(),
            api_key: "test-key".to_string(),
        },
    }
}

/// 构造接入脚本化预言机的求解管线
///
/// 返回服务实例以及预言机的调用计数和提示记录
pub fn build_service(
    oracle_reply: &str,
) -> (
    SolveService<ScriptedOracle>,
    Arc<AtomicUsize>,
    Arc<Mutex<Vec<String>>>,
) {
    let oracle = ScriptedOracle::new(oracle_reply);
    let calls = oracle.calls.clone();
    let prompts = oracle.prompts.clone();

    let service = SolveService::new(
        BrowserEngine::new(Duration::from_millis(0)),
        AnswerDeriver::new(oracle, 4000, Duration::from_secs(60)),
        SubmitClient::new(Duration::from_secs(30)).unwrap(),
        Duration::from_secs(60),
    );
    (service, calls, prompts)
}

/// 构造提取结果
pub fn extracted(
    raw_pre: Option<&str>,
    page_data: Option<Value>,
    body_html: &str,
) -> ExtractedContent {
    ExtractedContent {
        raw_pre: raw_pre.map(str::to_owned),
        page_data,
        body_html: body_html.to_string(),
    }
}

/// 构造测试预算
pub fn budget() -> Budget {
    Budget::start(Duration::from_secs(170), Duration::from_secs(5))
}

/// 测试应用
pub struct TestApp {
    pub server: TestServer,
    pub oracle_calls: Arc<AtomicUsize>,
}

/// 构造完整的测试应用（HTTP入口 + 脚本化预言机管线）
pub async fn create_test_app(secret: &str) -> TestApp {
    let (service, calls, _) = build_service(r#"{"answer": "demo"}"#);
    let settings = Arc::new(test_settings(secret));

    let app = routes::routes::<ScriptedOracle>()
        .layer(Extension(Arc::new(service)))
        .layer(Extension(settings));

    TestApp {
        server: TestServer::new(app).unwrap(),
        oracle_calls: calls,
    }
}
