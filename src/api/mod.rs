// API 模块
// models: 与后端交互的数据结构
// operations: 各资源的接口调用

pub mod models;
pub mod operations;

pub use operations::*;
