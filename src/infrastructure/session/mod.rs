// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 会话模块
///
/// 保存每个浏览器会话最近一次提交的类别、查询和结果
pub mod session_store;
