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

use crate::domain::models::quiz::{SubmissionResult, SubmissionTarget};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// 提交错误类型
#[derive(Error, Debug)]
pub enum SubmitError {
    /// 请求失败
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// 远端返回非成功状态
    #[error("Remote returned status {status}: {body}")]
    RemoteStatus {
        /// HTTP状态码
        status: u16,
        /// 远端响应体
        body: String,
    },
    /// 成功响应体不是JSON
    #[error("Remote response was not JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),
}

/// 答案提交客户端
///
/// 把推导出的答案合并到原始请求的透传字段之上后，
/// 以JSON请求体POST到解析出的提交地址。
/// 超时是独立于管线预算的固定保守值；不设重试。
pub struct SubmitClient {
    client: reqwest::Client,
}

impl SubmitClient {
    /// 创建新的提交客户端
    ///
    /// # 参数
    ///
    /// * `timeout` - 提交请求的固定超时
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; solvrs/1.0)")
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// 提交答案
    ///
    /// 键冲突时答案字段覆盖透传字段。
    /// 非成功状态是本阶段的硬失败，原样带出远端状态和响应体。
    ///
    /// # 参数
    ///
    /// * `target` - 提交地址
    /// * `answer` - 答案载荷
    /// * `passthrough` - 原始请求的透传字段
    ///
    /// # 返回值
    ///
    /// * `Ok(SubmissionResult)` - 远端JSON响应
    /// * `Err(SubmitError)` - 提交过程中出现的错误
    pub async fn submit(
        &self,
        target: &SubmissionTarget,
        answer: Map<String, Value>,
        passthrough: &Map<String, Value>,
    ) -> Result<SubmissionResult, SubmitError> {
        let mut body = passthrough.clone();
        for (key, value) in answer {
            body.insert(key, value);
        }

        let response = self
            .client
            .post(&target.url)
            .json(&Value::Object(body))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SubmitError::RemoteStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let result: Value = serde_json::from_str(&text).map_err(SubmitError::InvalidBody)?;

        Ok(SubmissionResult {
            submitted_to: target.url.clone(),
            result,
        })
    }
}
