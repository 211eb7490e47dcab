// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::services::solve_service::SolveError;
use crate::engines::traits::EngineError;

/// 管线错误的HTTP包装
///
/// 把求解管线的阶段错误映射为统一的错误响应，
/// 带上失败阶段和底层原因供调用方诊断
#[derive(Debug)]
pub struct PipelineError(SolveError);

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let (status, stage) = match &self.0 {
            SolveError::Render(EngineError::Timeout) => (StatusCode::GATEWAY_TIMEOUT, "render"),
            SolveError::Render(_) => (StatusCode::BAD_GATEWAY, "render"),
            SolveError::Oracle(_) => (StatusCode::BAD_GATEWAY, "derive"),
            SolveError::Submission(_) => (StatusCode::BAD_GATEWAY, "submit"),
        };

        let body = Json(json!({
            "success": false,
            "stage": stage,
            "error": self.0.to_string()
        }));
        (status, body).into_response()
    }
}

impl From<SolveError> for PipelineError {
    fn from(err: SolveError) -> Self {
        Self(err)
    }
}
