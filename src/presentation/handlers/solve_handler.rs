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

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, warn};
use validator::Validate;

use crate::{
    application::dto::{solve_request::SolveRequestDto, solve_response::SolveResponseDto},
    config::settings::Settings,
    domain::services::solve_service::SolveService,
    infrastructure::oracle::AnswerOracle,
    presentation::errors::PipelineError,
    utils::deadline::Budget,
};

/// 接收求解请求并执行完整管线
///
/// 时间预算从进入处理器的瞬间开始计量。
/// 密钥校验和载荷验证都发生在任何管线I/O之前。
pub async fn solve_quiz<O: AnswerOracle + 'static>(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(service): Extension<Arc<SolveService<O>>>,
    Json(body): Json<Value>,
) -> Response {
    let budget = Budget::start(
        settings.pipeline.total_budget(),
        settings.pipeline.budget_floor(),
    );

    let dto: SolveRequestDto = match serde_json::from_value(body.clone()) {
        Ok(dto) => dto,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "success": false,
                    "error": format!("Invalid payload: {}", e)
                })),
            )
                .into_response();
        }
    };

    if let Err(e) = dto.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "success": false,
                "error": format!("Invalid payload: {}", e)
            })),
        )
            .into_response();
    }

    if settings.auth.secret.is_empty() {
        error!("auth secret is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": "Server misconfigured: auth secret not set"
            })),
        )
            .into_response();
    }

    if dto.secret != settings.auth.secret {
        warn!("solve request rejected: invalid secret");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "success": false,
                "error": "Invalid secret"
            })),
        )
            .into_response();
    }

    // The full inbound object is forwarded into the submission body;
    // derived answer keys override on collision.
    let passthrough = body.as_object().cloned().unwrap_or_default();

    match service.solve(&dto.url, &passthrough, &budget).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SolveResponseDto {
                ok: true,
                submitted_to: outcome.submitted_to,
                result: outcome.result,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("solve pipeline failed: {}", e);
            PipelineError::from(e).into_response()
        }
    }
}
