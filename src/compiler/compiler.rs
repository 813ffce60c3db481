//! 模式编译器
//! 解析正则 → 递归分析 → 归类为 Exact / Fragments / Unsupported
use log::debug;
use rustc_hash::FxHashSet;

use super::decision::Decision;
use crate::analyzer::NodeAnalyzer;
use crate::config::FilterConfig;
use crate::error::FilterResult;
use crate::syntax::{parse_pattern, RegexNode};
use crate::utils::{contains_pattern, escape_like, prefix_pattern, preview_compact, suffix_pattern};

/// 日志中正则预览的最大长度
const LOG_PATTERN_PREVIEW_LEN: usize = 80;

/// 模式编译器，无状态，可跨线程共享
#[derive(Debug, Clone, Copy)]
pub struct PatternCompiler {
    analyzer: NodeAnalyzer,
    nest_limit: u32,
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

impl PatternCompiler {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            analyzer: NodeAnalyzer::new(config.limits),
            nest_limit: config.nest_limit,
        }
    }

    /// 编译单个模式；仅在正则语法错误时返回 Err
    pub fn compile(&self, pattern: &str) -> FilterResult<Decision> {
        let root = parse_pattern(pattern, self.nest_limit)?;
        let decision = self.decide(pattern, &root);
        debug!(
            "模式分解完成 | 正则: {} | 结果: {}",
            preview_compact(pattern, LOG_PATTERN_PREVIEW_LEN),
            decision
        );
        Ok(decision)
    }

    /// 批量编译，遇到第一个语法错误即返回
    pub fn compile_all<I, S>(&self, patterns: I) -> FilterResult<Vec<Decision>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns.into_iter().map(|p| self.compile(p.as_ref())).collect()
    }

    /// 对已解析的语法树归类
    pub fn decide(&self, pattern: &str, root: &RegexNode) -> Decision {
        if matches_everything(root) {
            return Decision::Exact(vec![String::new()]);
        }

        let result = self.analyzer.analyze(root, true);
        let exact = dedup(result.exact.unwrap_or_default());

        let contains = result.contains.unwrap_or_default();
        let prefix = result.prefix.unwrap_or_default();
        let suffix = result.suffix.unwrap_or_default();
        let likes = dedup(
            contains
                .iter()
                .map(|s| contains_pattern(s))
                .chain(prefix.iter().map(|s| prefix_pattern(s)))
                .chain(suffix.iter().map(|s| suffix_pattern(s)))
                .collect(),
        );

        match (exact.is_empty(), likes.is_empty()) {
            (false, true) => Decision::Exact(exact),
            (true, false) => Decision::Fragments(likes),
            (false, false) => {
                // 混合结果中的空串无法区分“仅空名”与“全部匹配”
                if exact.iter().any(String::is_empty) {
                    debug!("混合结果含空串精确值，放弃分解");
                    return Decision::Unsupported(pattern.to_string());
                }
                let mut fragments: Vec<String> = exact.iter().map(|s| escape_like(s)).collect();
                fragments.extend(likes);
                Decision::Fragments(dedup(fragments))
            }
            (true, true) => Decision::Unsupported(pattern.to_string()),
        }
    }
}

/// 未锚定且可空匹配的根节点匹配任意字符串
fn matches_everything(node: &RegexNode) -> bool {
    match node {
        RegexNode::EmptyMatch | RegexNode::Star(_) => true,
        RegexNode::Capture(sub) => matches_everything(sub),
        RegexNode::Alternate(children) => children.iter().any(matches_everything),
        RegexNode::Concat(children) => children.iter().all(matches_everything),
        RegexNode::Literal(_)
        | RegexNode::CharClass(_)
        | RegexNode::BeginAnchor
        | RegexNode::EndAnchor
        | RegexNode::Other => false,
    }
}

/// 保序去重
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    items.into_iter().filter(|s| seen.insert(s.clone())).collect()
}
