//! 编译模块：将名称过滤正则分解为精确集合或 LIKE 片段
pub mod decision;
pub mod compiler;

pub use self::decision::Decision;
pub use self::compiler::PatternCompiler;
