//! 分解结果模型
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::utils::preview_list;

/// 模式分解结论，三者取一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Decision {
    /// 正则语言的完整枚举；仅含空串时表示不做约束
    Exact(Vec<String>),
    /// LIKE 模式列表（OR 关系），是预过滤而非等价判定
    Fragments(Vec<String>),
    /// 无法分解，调用方需直接使用原正则
    Unsupported(String),
}

impl Decision {
    /// `Exact([""])`：由 `^$` 或空模式产生，下游按“全部匹配”处理
    pub fn is_match_all(&self) -> bool {
        matches!(self, Decision::Exact(v) if v.len() == 1 && v[0].is_empty())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Decision::Exact(_) => "exact",
            Decision::Fragments(_) => "fragments",
            Decision::Unsupported(_) => "unsupported",
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Exact(v) | Decision::Fragments(v) => write!(f, "{} {}", self.kind(), preview_list(v)),
            Decision::Unsupported(p) => write!(f, "{} {:?}", self.kind(), p),
        }
    }
}
