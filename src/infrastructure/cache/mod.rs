// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 按 (类别, 查询) 缓存搜索结果
pub mod result_cache;
