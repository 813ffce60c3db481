//! 条件构建器：将分解结论转换为谓词组
use log::debug;

use super::predicate::{Predicate, PredicateGroup};
use crate::compiler::Decision;
use crate::config::FilterConfig;
use crate::utils::contains_pattern;

/// 条件构建器
#[derive(Debug, Clone, Default)]
pub struct ConditionBuilder {
    config: FilterConfig,
}

impl ConditionBuilder {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// 分解结论 → 谓词组
    pub fn build(&self, decision: &Decision) -> PredicateGroup {
        let predicates = match decision {
            // `^$` 与空模式历来表示不过滤
            d if d.is_match_all() => vec![Predicate::Always],
            Decision::Exact(names) => vec![Predicate::NameIn(
                names.iter().map(|n| self.fold_case(n)).collect(),
            )],
            Decision::Fragments(likes) => likes
                .iter()
                .map(|l| Predicate::NameLike(self.fold_case(l)))
                .collect(),
            Decision::Unsupported(pattern) => vec![Predicate::NameRegex(pattern.clone())],
        };
        debug!(
            "谓词组构建完成 | 结论: {} | 谓词数: {}",
            decision.kind(),
            predicates.len()
        );
        self.group(predicates)
    }

    /// 排除正则
    pub fn exclude(&self, pattern: &str) -> PredicateGroup {
        self.group(vec![Predicate::NameNotRegex(pattern.to_string())])
    }

    /// 普通子串查询，非正则
    pub fn substring(&self, query: &str) -> PredicateGroup {
        self.group(vec![Predicate::NameLike(self.fold_case(&contains_pattern(query)))])
    }

    fn group(&self, predicates: Vec<Predicate>) -> PredicateGroup {
        PredicateGroup {
            column: self.config.column.clone(),
            case_sensitive: self.config.case_sensitive,
            predicates,
        }
    }

    fn fold_case(&self, s: &str) -> String {
        if self.config.case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    }
}
