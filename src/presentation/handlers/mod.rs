// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 页面处理器服务浏览器界面，`/v1` 处理器服务 JSON 客户端
pub mod metrics_handler;
pub mod search_api_handler;
pub mod search_page_handler;
