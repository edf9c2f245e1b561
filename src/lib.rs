// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含搜索用例与请求/响应 DTO
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含搜索类别、结果记录、搜索提供方接口和查询分发服务
pub mod domain;

/// 基础设施模块
///
/// 提供外部服务集成：DuckDuckGo 客户端、结果缓存、会话存储和指标
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和页面渲染
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
