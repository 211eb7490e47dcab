// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型
///
/// 包含核心业务实体
pub mod models;

/// 领域服务
///
/// 包含答案推导、提交地址解析和求解管线编排
pub mod services;
