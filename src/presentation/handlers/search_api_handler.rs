// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::{
    application::{
        dto::search_request::{SearchRequestDto, SearchResponseDto, SUBMIT_A_QUERY},
        use_cases::search_use_case::SearchUseCase,
    },
    presentation::errors::AppError,
};

/// 处理 JSON 搜索请求
///
/// # 错误
///
/// - 类别或查询为空：422
/// - 未知类别：400
/// - 提供方失败：502
pub async fn search(
    Extension(search): Extension<Arc<SearchUseCase>>,
    Json(payload): Json<SearchRequestDto>,
) -> Result<Json<SearchResponseDto>, AppError> {
    if let Err(errors) = payload.validate() {
        debug!(%errors, "Rejected search request");
        return Err(AppError::Validation(SUBMIT_A_QUERY.to_string()));
    }

    let (category, results) = search.execute(&payload.category, &payload.query).await?;

    Ok(Json(SearchResponseDto {
        category: category.as_str().to_string(),
        query: payload.query,
        results,
    }))
}
