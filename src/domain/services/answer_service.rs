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

use crate::engines::traits::ExtractedContent;
use crate::infrastructure::oracle::{AnswerOracle, OracleError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// 答案推导服务
///
/// 把提取到的页面候选内容转换为提交载荷。
/// 两级策略按严格顺序求值，先成功者胜：
/// 先尝试确定性解码，失败或缺失时回退到预言机查询。
pub struct AnswerDeriver<O: AnswerOracle> {
    /// 预言机依赖
    oracle: O,
    /// 送入预言机的标记摘录字符数上限
    excerpt_chars: usize,
    /// 单次预言机查询的超时上限
    oracle_timeout: Duration,
}

impl<O: AnswerOracle> AnswerDeriver<O> {
    /// 创建新的答案推导服务实例
    ///
    /// # 参数
    ///
    /// * `oracle` - 预言机实例
    /// * `excerpt_chars` - 摘录字符数上限
    /// * `oracle_timeout` - 预言机查询超时上限
    pub fn new(oracle: O, excerpt_chars: usize, oracle_timeout: Duration) -> Self {
        Self {
            oracle,
            excerpt_chars,
            oracle_timeout,
        }
    }

    /// 从提取内容推导答案载荷
    ///
    /// 确定性层：预格式化文本块经base64解码并解析为JSON后，
    /// 包装在`answer`键下立即返回，完全跳过预言机。
    /// 预言机层：用文档标记摘录构造提示并查询预言机；
    /// 响应若是JSON对象则直接使用，否则包装在`answer_text`键下。
    /// 解码/解析失败只会降级到下一层，绝不向上传播。
    ///
    /// # 参数
    ///
    /// * `extracted` - 渲染提取结果
    /// * `remaining` - 管线剩余时间预算
    ///
    /// # 返回值
    ///
    /// * `Ok(Map)` - 答案载荷
    /// * `Err(OracleError)` - 预言机查询本身失败（传输或超时）
    pub async fn derive(
        &self,
        extracted: &ExtractedContent,
        remaining: Duration,
    ) -> Result<Map<String, Value>, OracleError> {
        if let Some(raw) = &extracted.raw_pre {
            if let Some(candidate) = decode_embedded_answer(raw) {
                debug!("answer decoded from pre block, oracle skipped");
                let mut payload = Map::new();
                payload.insert("answer".to_string(), candidate);
                return Ok(payload);
            }
        }

        let excerpt: String = extracted
            .body_html
            .chars()
            .take(self.excerpt_chars)
            .collect();
        let prompt = format!(
            "You are given this HTML/text (truncated if large). \
             Identify the quiz submit JSON payload needed based on page instructions. \
             Page content:\n\n{}",
            excerpt
        );

        let timeout = self.oracle_timeout.min(remaining);
        let reply = self.oracle.answer(&prompt, timeout).await?;
        debug!(reply_len = reply.len(), "oracle reply received");
        Ok(wrap_oracle_reply(reply))
    }
}

/// 尝试把预格式化文本块解码为内嵌答案
///
/// 裁剪后经标准base64解码、UTF-8还原、JSON解析；
/// 任一步失败即返回None。
fn decode_embedded_answer(raw: &str) -> Option<Value> {
    let bytes = BASE64.decode(raw.trim().as_bytes()).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    serde_json::from_str(&decoded).ok()
}

/// 把预言机的文本响应包装成答案载荷
///
/// JSON对象直接作为载荷；其余一切（非对象JSON、纯文本）
/// 原样挂在`answer_text`键下，让调用方仍能检视。
fn wrap_oracle_reply(reply: String) -> Map<String, Value> {
    match serde_json::from_str::<Value>(&reply) {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut payload = Map::new();
            payload.insert("answer_text".to_string(), Value::String(reply));
            payload
        }
    }
}
