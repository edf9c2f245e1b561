// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 查询分发：把类别映射到搜索提供方的具体调用
pub mod search_service;
