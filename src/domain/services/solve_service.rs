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

use crate::domain::models::quiz::SubmissionResult;
use crate::domain::services::answer_service::AnswerDeriver;
use crate::domain::services::resolve_service;
use crate::engines::browser_engine::BrowserEngine;
use crate::engines::traits::{EngineError, ExtractedContent};
use crate::infrastructure::oracle::{AnswerOracle, OracleError};
use crate::infrastructure::submit_client::{SubmitClient, SubmitError};
use crate::utils::deadline::Budget;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// 求解管线错误类型
///
/// 按失败的阶段分类，便于调用方诊断
#[derive(thiserror::Error, Debug)]
pub enum SolveError {
    /// 渲染阶段失败
    #[error("Render stage failed: {0}")]
    Render(#[from] EngineError),
    /// 预言机查询失败
    #[error("Oracle stage failed: {0}")]
    Oracle(#[from] OracleError),
    /// 提交阶段失败
    #[error("Submission stage failed: {0}")]
    Submission(#[from] SubmitError),
}

/// 求解管线服务
///
/// 在共享时间预算下顺序执行渲染、推导、解析和提交。
/// 每个阻塞阶段调用前重新计算剩余预算；任何阶段不重试，
/// 首个失败的阶段即终止管线，不返回部分结果。
pub struct SolveService<O: AnswerOracle> {
    /// 浏览器渲染引擎
    engine: BrowserEngine,
    /// 答案推导服务
    deriver: AnswerDeriver<O>,
    /// 答案提交客户端
    submitter: SubmitClient,
    /// 渲染阶段的超时上限
    render_cap: Duration,
}

impl<O: AnswerOracle> SolveService<O> {
    /// 创建新的求解管线服务实例
    ///
    /// # 参数
    ///
    /// * `engine` - 渲染引擎
    /// * `deriver` - 答案推导服务
    /// * `submitter` - 提交客户端
    /// * `render_cap` - 渲染阶段超时上限
    pub fn new(
        engine: BrowserEngine,
        deriver: AnswerDeriver<O>,
        submitter: SubmitClient,
        render_cap: Duration,
    ) -> Self {
        Self {
            engine,
            deriver,
            submitter,
            render_cap,
        }
    }

    /// 执行完整求解管线
    ///
    /// # 参数
    ///
    /// * `url` - 测验页面URL
    /// * `passthrough` - 原始请求的透传字段
    /// * `budget` - 本请求的时间预算
    ///
    /// # 返回值
    ///
    /// * `Ok(SubmissionResult)` - 提交结果
    /// * `Err(SolveError)` - 首个失败阶段的错误
    pub async fn solve(
        &self,
        url: &str,
        passthrough: &Map<String, Value>,
        budget: &Budget,
    ) -> Result<SubmissionResult, SolveError> {
        let job_id = Uuid::new_v4();
        let nav_timeout = budget.stage_timeout(self.render_cap);
        info!(%job_id, url, timeout_s = nav_timeout.as_secs(), "rendering quiz page");
        let extracted = self.engine.render_and_extract(url, nav_timeout).await?;
        self.finish(job_id, url, passthrough, extracted, budget)
            .await
    }

    /// 对已有提取结果执行管线的后半段（推导、解析、提交）
    pub async fn solve_extracted(
        &self,
        url: &str,
        passthrough: &Map<String, Value>,
        extracted: ExtractedContent,
        budget: &Budget,
    ) -> Result<SubmissionResult, SolveError> {
        self.finish(Uuid::new_v4(), url, passthrough, extracted, budget)
            .await
    }

    async fn finish(
        &self,
        job_id: Uuid,
        url: &str,
        passthrough: &Map<String, Value>,
        extracted: ExtractedContent,
        budget: &Budget,
    ) -> Result<SubmissionResult, SolveError> {
        let answer = self.deriver.derive(&extracted, budget.remaining()).await?;
        let target = resolve_service::resolve(&extracted, url);
        info!(%job_id, target = %target.url, source = ?target.source, "submitting answer");
        let outcome = self.submitter.submit(&target, answer, passthrough).await?;
        info!(%job_id, "submission accepted");
        Ok(outcome)
    }
}
