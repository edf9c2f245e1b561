// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::ResultRecord;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 页面上显示的统一校验提示
pub const SUBMIT_A_QUERY: &str = "Submit a query";

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(SUBMIT_A_QUERY.into());
        return Err(err);
    }
    Ok(())
}

/// 搜索表单提交
///
/// 类别和查询均可能缺失，校验失败时不触发任何搜索
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchFormDto {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    /// 操作符帮助表开关（复选框）
    #[serde(default)]
    pub operators: Option<String>,
}

impl SearchFormDto {
    /// 校验后返回 (类别标签, 查询)
    pub fn into_submission(self) -> Result<(String, String), &'static str> {
        match (self.category, self.query) {
            (Some(category), Some(query))
                if not_blank(&category).is_ok() && not_blank(&query).is_ok() =>
            {
                Ok((category, query))
            }
            _ => Err(SUBMIT_A_QUERY),
        }
    }

    pub fn show_operators(&self) -> bool {
        is_checked(self.operators.as_deref())
    }
}

/// 页面查询参数
#[derive(Debug, Default, Deserialize)]
pub struct PageQueryDto {
    #[serde(default)]
    pub operators: Option<String>,
}

impl PageQueryDto {
    pub fn show_operators(&self) -> bool {
        is_checked(self.operators.as_deref())
    }
}

fn is_checked(value: Option<&str>) -> bool {
    matches!(value, Some("on" | "true" | "1"))
}

/// JSON 搜索请求；缺失字段按空串处理，交由校验统一拒绝
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct SearchRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponseDto {
    pub category: String,
    pub query: String,
    pub results: Vec<ResultRecord>,
}
