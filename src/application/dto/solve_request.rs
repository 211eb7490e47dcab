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

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// 求解请求数据传输对象
///
/// 封装调用方发起的测验求解请求。已知字段之外的
/// 内容全部收进`extra`，作为透传字段原样进入最终提交体。
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SolveRequestDto {
    /// 调用方身份邮箱
    #[validate(email)]
    pub email: String,
    /// 静态鉴权密钥
    #[validate(length(min = 1))]
    pub secret: String,
    /// 测验页面URL
    #[validate(url)]
    pub url: String,
    /// 其余未知字段（接受但不解释）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
