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

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 页面导航失败
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 渲染页面提取结果
///
/// 每个请求由渲染引擎产出一次，之后不可变；
/// 仅由答案推导和提交地址解析消费。
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedContent {
    /// 页面中首个预格式化文本块的原文（未裁剪）
    pub raw_pre: Option<String>,
    /// 页面内全局测验数据对象（若存在）
    pub page_data: Option<Value>,
    /// 渲染完成后的完整文档标记
    pub body_html: String,
}

impl ExtractedContent {
    /// 构造一个仅含文档标记的提取结果
    pub fn from_html(body_html: impl Into<String>) -> Self {
        Self {
            raw_pre: None,
            page_data: None,
            body_html: body_html.into(),
        }
    }
}
