// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索提供方集成
///
/// DuckDuckGo 的 HTTP 客户端及其响应解析
pub mod duckduckgo;
pub mod parsers;

pub use duckduckgo::DuckDuckGoClient;
