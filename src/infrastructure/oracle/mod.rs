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

use crate::config::settings::OracleSettings;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// 预言机错误类型
#[derive(Error, Debug)]
pub enum OracleError {
    /// 请求失败
    #[error("Oracle request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// 远端返回非成功状态
    #[error("Oracle returned status {0}")]
    RemoteStatus(u16),
    /// 响应缺少候选文本
    #[error("Oracle reply carried no candidate text")]
    MalformedReply,
}

/// 答案预言机
///
/// 外部答案生成服务的边界：输入一段自然语言提示，
/// 输出原始文本响应。其内部推理不在本系统范围内，
/// 作为可替换依赖注入到答案推导服务。
#[async_trait]
pub trait AnswerOracle: Send + Sync {
    /// 查询预言机
    ///
    /// # 参数
    ///
    /// * `prompt` - 自然语言提示
    /// * `timeout` - 本次查询的硬超时
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 原始文本响应（可能是JSON）
    /// * `Err(OracleError)` - 查询失败
    async fn answer(&self, prompt: &str, timeout: Duration) -> Result<String, OracleError>;
}

/// 基于Gemini generateContent接口的预言机实现
pub struct GeminiOracle {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiOracle {
    /// 创建新的预言机客户端
    ///
    /// # 参数
    ///
    /// * `settings` - 预言机配置
    pub fn new(settings: &OracleSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; solvrs/1.0)")
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl AnswerOracle for GeminiOracle {
    async fn answer(&self, prompt: &str, timeout: Duration) -> Result<String, OracleError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "oracle query rejected");
            return Err(OracleError::RemoteStatus(status.as_u16()));
        }

        let reply: Value = response.json().await?;
        reply
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(OracleError::MalformedReply)
    }
}
