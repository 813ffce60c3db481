//! 谓词模型：一个谓词组内 OR 连接，多个谓词组由上层 AND 连接
use serde::{Deserialize, Serialize};

/// 单个名称谓词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Predicate {
    /// 恒真（`^$` / 空模式）
    Always,
    /// 名称等于其中之一，渲染为 `= ANY`
    NameIn(Vec<String>),
    /// LIKE 模式（已转义）
    NameLike(String),
    /// 原正则
    NameRegex(String),
    /// 排除正则
    NameNotRegex(String),
}

impl Predicate {
    pub fn op_name(&self) -> &'static str {
        match self {
            Predicate::Always => "always",
            Predicate::NameIn(_) => "name_in",
            Predicate::NameLike(_) => "name_like",
            Predicate::NameRegex(_) => "name_regex",
            Predicate::NameNotRegex(_) => "name_not_regex",
        }
    }
}

/// OR 连接的谓词组，携带渲染所需的列名与大小写设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateGroup {
    pub column: String,
    pub case_sensitive: bool,
    pub predicates: Vec<Predicate>,
}

impl PredicateGroup {
    pub fn is_always(&self) -> bool {
        self.predicates.iter().any(|p| *p == Predicate::Always)
    }
}
