//! SeaORM 实体定义
//!
//! 所有集合共用一张 `documents` 表，Storage 层将其转换为文档模型。

pub mod prelude;

pub mod documents;
