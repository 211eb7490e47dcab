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

/// 提交地址来源
///
/// 按发现优先级排序的出处标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    /// 从渲染后的文档标记中用正则发现
    Markup,
    /// 页面内全局数据对象声明
    PageData,
    /// 回退到原始请求URL
    RequestUrl,
}

/// 解析出的答案提交地址
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionTarget {
    /// 提交URL
    pub url: String,
    /// 地址出处
    pub source: TargetSource,
}

/// 答案提交结果
///
/// 管线的终态产物，直接返回给调用方，不做持久化。
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    /// 实际使用的提交URL
    pub submitted_to: String,
    /// 远端响应体（原样透传）
    pub result: Value,
}
