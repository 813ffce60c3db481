//! repofilter - 仓库名称正则过滤的可索引分解
//! 把正则分解为精确集合或 LIKE 片段，无法分解时回退原正则

// 导出全局错误类型
pub use self::error::{FilterError, FilterResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, DecomposeLimits, FilterConfig};

// 导出语法树适配层
pub use self::syntax::{parse_pattern, RegexNode};

// 导出分析与编译核心接口
pub use self::analyzer::{AnalysisResult, NodeAnalyzer};
pub use self::compiler::{Decision, PatternCompiler};

// 导出条件构建接口
pub use self::condition::{
    BindCounter, ConditionBuilder, GroupMatcher, Predicate, PredicateGroup, SqlArg, SqlFragment,
};

// 导出名称过滤器
pub use self::filter::{FilterMatcher, NameFilter, NameFilterOptions};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod syntax;
pub mod analyzer;
pub mod compiler;
pub mod condition;
pub mod filter;
pub mod utils;
