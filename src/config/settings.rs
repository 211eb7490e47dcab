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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、鉴权、求解管线和预言机等所有配置项。
/// 进程启动时构造一次，之后以引用方式传入管线。
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 鉴权配置
    pub auth: AuthSettings,
    /// 求解管线配置
    pub pipeline: PipelineSettings,
    /// 预言机配置
    pub oracle: OracleSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 鉴权配置设置
#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    /// 请求体中须匹配的静态密钥
    pub secret: String,
}

/// 求解管线配置设置
#[derive(Debug, Deserialize)]
pub struct PipelineSettings {
    /// 单请求总时限（秒），保守地低于平台硬超时
    pub total_budget_secs: u64,
    /// 剩余预算下限（秒）
    pub budget_floor_secs: u64,
    /// 渲染阶段超时上限（秒）
    pub render_timeout_secs: u64,
    /// 页面load事件后的静默等待（毫秒）
    pub settle_ms: u64,
    /// 预言机查询超时上限（秒）
    pub oracle_timeout_secs: u64,
    /// 提交请求固定超时（秒）
    pub submit_timeout_secs: u64,
    /// 送入预言机的标记摘录字符数上限
    pub excerpt_chars: usize,
}

impl PipelineSettings {
    /// 单请求总时限
    pub fn total_budget(&self) -> Duration {
        Duration::from_secs(self.total_budget_secs)
    }

    /// 剩余预算下限
    pub fn budget_floor(&self) -> Duration {
        Duration::from_secs(self.budget_floor_secs)
    }

    /// 渲染阶段超时上限
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// 页面load事件后的静默等待
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// 预言机查询超时上限
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// 提交请求固定超时
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

/// 预言机配置设置
#[derive(Debug, Deserialize)]
pub struct OracleSettings {
    /// 预言机服务端点
    pub endpoint: String,
    /// 模型名称
    pub model: String,
    /// API密钥
    pub api_key: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值。
    /// `auth.secret`和`oracle.api_key`没有默认值，
    /// 缺失时在任何I/O发生之前即失败。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Default pipeline budgets: 170s total vs a 180s platform
            // deadline, 60s navigation cap, 30s submission timeout
            .set_default("pipeline.total_budget_secs", 170)?
            .set_default("pipeline.budget_floor_secs", 5)?
            .set_default("pipeline.render_timeout_secs", 60)?
            .set_default("pipeline.settle_ms", 500)?
            .set_default("pipeline.oracle_timeout_secs", 60)?
            .set_default("pipeline.submit_timeout_secs", 30)?
            .set_default("pipeline.excerpt_chars", 4000)?
            // Default Oracle settings (api_key stays required)
            .set_default("oracle.endpoint", "https://generativelanguage.googleapis.com")?
            .set_default("oracle.model", "gemini-2.0-flash")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SOLVRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
