// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, ExtractedContent};
use crate::utils::validators;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use serde_json::Value;
use std::time::Duration;

/// 浏览器渲染引擎
///
/// 基于chromiumoxide实现的页面渲染与内容提取引擎。
/// 每个请求独享一个浏览器会话：进入时启动，任何退出路径上关闭，
/// 不跨请求复用或池化。
pub struct BrowserEngine {
    /// 页面load事件后的静默等待时间，用于吸收迟到的XHR
    settle: Duration,
}

impl BrowserEngine {
    /// 创建新的渲染引擎实例
    ///
    /// # 参数
    ///
    /// * `settle` - load事件后的静默等待时间
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }

    /// 渲染页面并提取结构化候选内容
    ///
    /// 导航、静默等待和提取整体受`timeout`硬上限约束；
    /// 超时即渲染失败，绝不降级为空内容成功。
    ///
    /// # 参数
    ///
    /// * `url` - 测验页面URL
    /// * `timeout` - 本阶段硬超时
    ///
    /// # 返回值
    ///
    /// * `Ok(ExtractedContent)` - 提取结果
    /// * `Err(EngineError)` - 渲染过程中出现的错误
    pub async fn render_and_extract(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<ExtractedContent, EngineError> {
        // SSRF protection
        validators::validate_target_url(url)
            .await
            .map_err(|e| EngineError::Other(format!("SSRF protection: {}", e)))?;

        let config = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(EngineError::Other)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::Other(e.to_string()))?;

        // Drive browser events until the session ends
        let events = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let outcome = tokio::time::timeout(timeout, self.navigate_and_probe(&browser, url)).await;

        // Session is request-scoped: tear down on every exit path,
        // including timeout and partial strategy failure.
        let _ = browser.close().await;
        let _ = browser.wait().await;
        events.abort();

        match outcome {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout),
        }
    }

    async fn navigate_and_probe(
        &self,
        browser: &Browser,
        url: &str,
    ) -> Result<ExtractedContent, EngineError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| EngineError::Other(e.to_string()))?;

        page.goto(url)
            .await
            .map_err(|e| EngineError::Navigation(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| EngineError::Navigation(e.to_string()))?;

        // Grace period for late network activity after the load event
        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }

        let raw_pre = Self::probe_pre_block(&page).await;
        let page_data = Self::probe_page_data(&page).await;

        // The rendered markup is the fallback substrate for destination
        // discovery and oracle queries, so failing to read it fails the stage.
        let body_html = page
            .content()
            .await
            .map_err(|e| EngineError::Navigation(e.to_string()))?;

        tracing::debug!(
            has_pre = raw_pre.is_some(),
            has_page_data = page_data.is_some(),
            html_len = body_html.len(),
            "page extraction finished"
        );

        Ok(ExtractedContent {
            raw_pre,
            page_data,
            body_html,
        })
    }

    /// 读取首个预格式化文本块的原文
    ///
    /// 文本原样保留（含首尾空白），裁剪推迟到答案推导阶段。
    async fn probe_pre_block(page: &Page) -> Option<String> {
        match page.find_element("pre").await {
            Ok(element) => element.inner_text().await.ok().flatten(),
            Err(_) => None,
        }
    }

    /// 读取页面内约定的全局测验数据对象
    ///
    /// 对象缺失记录为None，而不是错误。
    async fn probe_page_data(page: &Page) -> Option<Value> {
        page.evaluate("window.__QUIZ_DATA__ || null")
            .await
            .ok()
            .and_then(|result| result.into_value::<Value>().ok())
            .filter(|value| !value.is_null())
    }
}
