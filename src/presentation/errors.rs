// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::search_service::SearchServiceError;
use crate::presentation::views;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 应用错误类型
///
/// 封装表示层可能遇到的错误，并统一映射为 HTTP 状态码
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验失败
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Search(#[from] SearchServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Search(SearchServiceError::UnknownCategory(_)) => StatusCode::BAD_REQUEST,
            AppError::Search(SearchServiceError::Provider(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Invalid input",
            AppError::Search(SearchServiceError::UnknownCategory(_)) => "Unsupported search type",
            AppError::Search(SearchServiceError::Provider(_)) => "Search failed",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

/// 以 HTML 页面呈现的 [`AppError`]，供浏览器界面使用
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let page = views::render_error_page(self.0.title(), &self.0.to_string());
        (self.0.status(), Html(page)).into_response()
    }
}

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<SearchServiceError> for HtmlError {
    fn from(err: SearchServiceError) -> Self {
        Self(AppError::Search(err))
    }
}
