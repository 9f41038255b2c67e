//! LMS - 教学管理系统后端服务
//!
//! 基于 Actix Web 构建，核心是按分类加权的成绩计算与 GPA 统计。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: 成绩计算引擎（纯函数）
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
