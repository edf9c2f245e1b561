// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_COOKIE_NAME: &str = "ddgs_session";

/// 浏览器会话标识
///
/// 从会话 Cookie 中读取；缺失或无法解析时分配新的 v4 UUID，
/// 由处理器在响应中写回 Cookie
#[derive(Debug, Clone)]
pub struct SessionId {
    pub id: Uuid,
    pub is_new: bool,
    pub cookie_name: String,
}

impl SessionId {
    /// 生成 `Set-Cookie` 头的值
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name, self.id
        ))
        .ok()
    }
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie_name = parts
            .extensions
            .get::<Arc<Settings>>()
            .map(|settings| settings.session.cookie_name.clone())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let existing = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| cookie_value(header, &cookie_name))
            .and_then(|raw| Uuid::parse_str(raw).ok());

        Ok(match existing {
            Some(id) => SessionId {
                id,
                is_new: false,
                cookie_name,
            },
            None => SessionId {
                id: Uuid::new_v4(),
                is_new: true,
                cookie_name,
            },
        })
    }
}
