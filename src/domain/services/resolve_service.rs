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

use crate::domain::models::quiz::{SubmissionTarget, TargetSource};
use crate::engines::traits::ExtractedContent;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SUBMIT_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s'"<>]+/submit[^\s'"<>]*"#).unwrap());

/// 页面数据对象中声明提交端点的已知键名，按优先级排列
const PAGE_DATA_KEYS: [&str; 2] = ["submit_url", "url"];

/// 解析答案提交地址
///
/// 发现策略按优先级排列，先命中者胜：
/// 1. 在渲染后的文档标记中从左到右扫描首个以`/submit`收尾的URL；
/// 2. 页面内全局数据对象的`submit_url`或`url`字段；
/// 3. 回退到原始请求URL——页面被认为在其来源地址接受提交。
/// 回退保证本函数永不失败。
///
/// # 参数
///
/// * `extracted` - 渲染提取结果
/// * `request_url` - 原始请求URL
///
/// # 返回值
///
/// 带出处标记的提交地址
pub fn resolve(extracted: &ExtractedContent, request_url: &str) -> SubmissionTarget {
    if let Some(found) = SUBMIT_URL_RE.find(&extracted.body_html) {
        return SubmissionTarget {
            url: found.as_str().to_string(),
            source: TargetSource::Markup,
        };
    }

    if let Some(data) = &extracted.page_data {
        for key in PAGE_DATA_KEYS {
            if let Some(url) = data.get(key).and_then(Value::as_str) {
                return SubmissionTarget {
                    url: url.to_string(),
                    source: TargetSource::PageData,
                };
            }
        }
    }

    SubmissionTarget {
        url: request_url.to_string(),
        source: TargetSource::RequestUrl,
    }
}
