// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Unhandled search type: {0:?}")]
    Unknown(String),
}

/// 搜索类别
///
/// 用户在表单中选择的搜索模式，顺序即下拉框中的显示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Text,
    Answers,
    News,
    Images,
    Videos,
    Maps,
    Translate,
    Suggestions,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Text,
        Category::Answers,
        Category::News,
        Category::Images,
        Category::Videos,
        Category::Maps,
        Category::Translate,
        Category::Suggestions,
    ];

    /// 表单和 API 中使用的小写标签
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::Answers => "answers",
            Category::News => "news",
            Category::Images => "images",
            Category::Videos => "videos",
            Category::Maps => "maps",
            Category::Translate => "translate",
            Category::Suggestions => "suggestions",
        }
    }

    /// 结果标题中使用的首字母大写名称
    pub fn label(&self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::Answers => "Answers",
            Category::News => "News",
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Maps => "Maps",
            Category::Translate => "Translate",
            Category::Suggestions => "Suggestions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}
