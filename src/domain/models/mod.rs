// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 搜索类别与提供方返回的结果记录
pub mod category;
pub mod search_result;
