// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Form, Query},
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    application::{
        dto::search_request::{PageQueryDto, SearchFormDto},
        use_cases::search_use_case::SearchUseCase,
    },
    infrastructure::session::session_store::{SessionState, SessionStore},
    presentation::{
        errors::HtmlError,
        extractors::session_id::SessionId,
        views::{render_page, PageContext},
    },
};

fn with_session_cookie(mut response: Response, session: &SessionId) -> Response {
    if session.is_new {
        if let Some(cookie) = session.set_cookie() {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
    }
    response
}

/// 渲染搜索页面
///
/// 每次渲染都从会话状态重新生成结果区域，不会触发搜索
pub async fn index(
    Extension(sessions): Extension<Arc<SessionStore>>,
    session: SessionId,
    Query(page): Query<PageQueryDto>,
) -> Response {
    let state = if session.is_new {
        None
    } else {
        sessions.get(&session.id)
    };
    let ctx = PageContext::from_session(state.as_ref(), page.show_operators());
    with_session_cookie(Html(render_page(&ctx)).into_response(), &session)
}

/// 处理表单提交
///
/// # 返回值
///
/// - 查询为空或未选类别：422 页面并显示校验提示，不调用提供方，会话不变
/// - 未知类别：400 错误页面
/// - 提供方失败：502 错误页面
/// - 成功：覆盖会话状态并以 303 重定向回首页
pub async fn submit(
    Extension(search): Extension<Arc<SearchUseCase>>,
    Extension(sessions): Extension<Arc<SessionStore>>,
    session: SessionId,
    Form(form): Form<SearchFormDto>,
) -> Result<Response, HtmlError> {
    let show_operators = form.show_operators();
    let submitted_category = form.category.clone();
    let submitted_query = form.query.clone().unwrap_or_default();

    let (tag, query) = match form.into_submission() {
        Ok(submission) => submission,
        Err(message) => {
            debug!(session = %session.id, "Rejected empty search submission");
            let previous = if session.is_new {
                None
            } else {
                sessions.get(&session.id)
            };
            let ctx = PageContext {
                selected: submitted_category.as_deref(),
                query: &submitted_query,
                show_operators,
                error: Some(message),
                session: previous.as_ref(),
            };
            let response = (StatusCode::UNPROCESSABLE_ENTITY, Html(render_page(&ctx)));
            return Ok(with_session_cookie(response.into_response(), &session));
        }
    };

    let (category, results) = search.execute(&tag, &query).await?;
    info!(
        session = %session.id,
        category = %category,
        results = results.len(),
        "Stored search results in session"
    );
    sessions.replace(
        session.id,
        SessionState {
            category,
            query,
            results,
        },
    );

    let location = if show_operators { "/?operators=on" } else { "/" };
    Ok(with_session_cookie(
        Redirect::to(location).into_response(),
        &session,
    ))
}
