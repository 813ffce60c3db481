//! 条件模块：分解结论 → 谓词组 → SQL / 内存匹配
pub mod builder;
pub mod matcher;
pub mod predicate;
pub mod sql;

pub use self::builder::ConditionBuilder;
pub use self::matcher::GroupMatcher;
pub use self::predicate::{Predicate, PredicateGroup};
pub use self::sql::{BindCounter, SqlArg, SqlFragment};
