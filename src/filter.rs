//! 仓库名称过滤器
//! 多个包含模式各自成组并 AND 连接；排除模式与子串查询同样各成一组
use log::debug;

use crate::compiler::{Decision, PatternCompiler};
use crate::condition::{BindCounter, ConditionBuilder, GroupMatcher, PredicateGroup, SqlFragment};
use crate::config::FilterConfig;
use crate::error::{FilterError, FilterResult};
use crate::syntax::parse_pattern;

/// 过滤选项
#[derive(Debug, Clone, Default)]
pub struct NameFilterOptions {
    /// 包含模式（正则），全部满足
    pub include_patterns: Vec<String>,
    /// 排除模式（正则）
    pub exclude_pattern: Option<String>,
    /// 普通子串查询，与模式互斥
    pub query: Option<String>,
}

/// 编译后的名称过滤器
#[derive(Debug, Clone)]
pub struct NameFilter {
    decisions: Vec<Decision>,
    groups: Vec<PredicateGroup>,
}

impl NameFilter {
    pub fn new(options: &NameFilterOptions, config: &FilterConfig) -> FilterResult<Self> {
        let query = options.query.as_deref().filter(|q| !q.is_empty());
        let exclude = options.exclude_pattern.as_deref().filter(|p| !p.is_empty());

        if query.is_some() && (!options.include_patterns.is_empty() || exclude.is_some()) {
            return Err(FilterError::InvalidInput(
                "query and include/exclude patterns are mutually exclusive".to_string(),
            ));
        }

        let compiler = PatternCompiler::new(config);
        let builder = ConditionBuilder::new(config.clone());

        let decisions = compiler.compile_all(&options.include_patterns)?;
        let mut groups: Vec<PredicateGroup> = decisions.iter().map(|d| builder.build(d)).collect();

        if let Some(query) = query {
            groups.push(builder.substring(query));
        }
        if let Some(exclude) = exclude {
            // 提前暴露语法错误，而不是等到数据库执行时
            parse_pattern(exclude, config.nest_limit)?;
            groups.push(builder.exclude(exclude));
        }

        debug!(
            "名称过滤器构建完成 | 包含模式: {} | 谓词组: {}",
            options.include_patterns.len(),
            groups.len()
        );
        Ok(Self { decisions, groups })
    }

    /// 每个包含模式的分解结论，与 include_patterns 一一对应
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn groups(&self) -> &[PredicateGroup] {
        &self.groups
    }

    /// 渲染为 AND 连接的 WHERE 片段；无任何条件时返回 None
    pub fn to_sql(&self) -> Option<SqlFragment> {
        self.to_sql_with(&mut BindCounter::new())
    }

    pub fn to_sql_with(&self, binds: &mut BindCounter) -> Option<SqlFragment> {
        if self.groups.is_empty() {
            return None;
        }
        let fragments = self.groups.iter().map(|g| g.to_sql(binds)).collect();
        Some(SqlFragment::join(fragments, " AND "))
    }

    /// 预编译内存匹配器
    pub fn matcher(&self) -> FilterResult<FilterMatcher> {
        let groups = self
            .groups
            .iter()
            .map(PredicateGroup::matcher)
            .collect::<FilterResult<Vec<_>>>()?;
        Ok(FilterMatcher { groups })
    }
}

/// 所有谓词组都满足才算匹配
#[derive(Debug, Clone)]
pub struct FilterMatcher {
    groups: Vec<GroupMatcher>,
}

impl FilterMatcher {
    pub fn is_match(&self, name: &str) -> bool {
        self.groups.iter().all(|g| g.is_match(name))
    }
}
