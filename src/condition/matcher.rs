//! 谓词组的内存匹配器
//! 与 SQL 渲染语义一致，便于无数据库时过滤名称
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashSet;

use super::predicate::{Predicate, PredicateGroup};
use crate::error::FilterResult;
use crate::utils::LikePattern;

/// 单个谓词的内存形态
#[derive(Debug, Clone)]
enum NameMatcher {
    Always,
    OneOf(FxHashSet<String>), // 精确集合
    Like(LikePattern),        // LIKE 模式
    Regex(Regex),             // 正则匹配
    NotRegex(Regex),          // 正则排除
}

impl NameMatcher {
    /// `name` 已按组的大小写设置归一化；正则自带大小写设置，使用原始名称
    fn is_match(&self, name: &str, raw: &str) -> bool {
        match self {
            NameMatcher::Always => true,
            NameMatcher::OneOf(names) => names.contains(name),
            NameMatcher::Like(pattern) => pattern.is_match(name),
            NameMatcher::Regex(regex) => regex.is_match(raw),
            NameMatcher::NotRegex(regex) => !regex.is_match(raw),
        }
    }
}

/// 编译后的谓词组（OR）
#[derive(Debug, Clone)]
pub struct GroupMatcher {
    case_sensitive: bool,
    matchers: Vec<NameMatcher>,
}

impl GroupMatcher {
    pub fn is_match(&self, name: &str) -> bool {
        if self.case_sensitive {
            self.matchers.iter().any(|m| m.is_match(name, name))
        } else {
            let lowered = name.to_lowercase();
            self.matchers.iter().any(|m| m.is_match(&lowered, name))
        }
    }
}

impl PredicateGroup {
    /// 预编译内存匹配器
    pub fn matcher(&self) -> FilterResult<GroupMatcher> {
        let build_regex = |pattern: &str| -> FilterResult<Regex> {
            Ok(RegexBuilder::new(pattern)
                .case_insensitive(!self.case_sensitive)
                .build()?)
        };

        let mut matchers = Vec::with_capacity(self.predicates.len());
        for predicate in &self.predicates {
            let matcher = match predicate {
                Predicate::Always => NameMatcher::Always,
                Predicate::NameIn(names) => NameMatcher::OneOf(names.iter().cloned().collect()),
                Predicate::NameLike(pattern) => NameMatcher::Like(LikePattern::new(pattern)),
                Predicate::NameRegex(pattern) => NameMatcher::Regex(build_regex(pattern)?),
                Predicate::NameNotRegex(pattern) => NameMatcher::NotRegex(build_regex(pattern)?),
            };
            matchers.push(matcher);
        }
        Ok(GroupMatcher {
            case_sensitive: self.case_sensitive,
            matchers,
        })
    }
}
