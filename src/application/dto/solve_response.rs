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

/// 求解响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct SolveResponseDto {
    /// 是否成功
    pub ok: bool,
    /// 实际使用的提交URL
    pub submitted_to: String,
    /// 远端提交结果（原样透传）
    pub result: Value,
}
