//! 正则语法树递归分析器
//! 对单个节点计算四类字符串集合：
//! exact（完整枚举）、contains（必现子串）、prefix（锚定开头）、suffix（锚定结尾）
//! 全部为 None 表示该节点无法刻画，父节点必须整体放弃
use log::trace;

use super::product::cartesian_fold;
use crate::config::DecomposeLimits;
use crate::syntax::RegexNode;

/// 单节点分析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    pub exact: Option<Vec<String>>,
    pub contains: Option<Vec<String>>,
    pub prefix: Option<Vec<String>>,
    pub suffix: Option<Vec<String>>,
}

impl AnalysisResult {
    /// 无法刻画
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn exact(strings: Vec<String>) -> Self {
        Self { exact: Some(strings), ..Self::default() }
    }

    pub fn contains(strings: Vec<String>) -> Self {
        Self { contains: Some(strings), ..Self::default() }
    }

    pub fn prefix(strings: Vec<String>) -> Self {
        Self { prefix: Some(strings), ..Self::default() }
    }

    pub fn suffix(strings: Vec<String>) -> Self {
        Self { suffix: Some(strings), ..Self::default() }
    }

    pub fn is_unknown(&self) -> bool {
        self.exact.is_none() && self.contains.is_none() && self.prefix.is_none() && self.suffix.is_none()
    }

    /// 并集合并（分支语义，不做乘积）
    fn union(&mut self, other: AnalysisResult) {
        extend_field(&mut self.exact, other.exact);
        extend_field(&mut self.contains, other.contains);
        extend_field(&mut self.prefix, other.prefix);
        extend_field(&mut self.suffix, other.suffix);
    }
}

fn extend_field(field: &mut Option<Vec<String>>, other: Option<Vec<String>>) {
    if let Some(other) = other {
        field.get_or_insert_with(Vec::new).extend(other);
    }
}

/// 拼接子节点在折叠中扮演的角色
enum ConcatPart {
    /// 位置无关的候选集合
    Body(Vec<String>),
    /// 自带开头锚点的首个子节点
    Leading(Vec<String>),
    /// 自带结尾锚点的末尾子节点
    Trailing(Vec<String>),
}

/// 节点分析器，纯函数，无内部状态
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeAnalyzer {
    limits: DecomposeLimits,
}

impl NodeAnalyzer {
    pub fn new(limits: DecomposeLimits) -> Self {
        Self { limits }
    }

    /// `is_last` 表示该节点位于整个匹配的末尾，之后不再有任何必须匹配的内容
    pub fn analyze(&self, node: &RegexNode, is_last: bool) -> AnalysisResult {
        let result = match node {
            RegexNode::EmptyMatch => AnalysisResult::exact(vec![String::new()]),
            RegexNode::Literal(text) => AnalysisResult::contains(vec![text.clone()]),
            RegexNode::CharClass(ranges) => self.analyze_class(ranges),
            RegexNode::Star(sub) => {
                // 仅处理 `.*`；末尾的 `.*` 不再附加任何约束
                if sub.is_any_char() && is_last {
                    AnalysisResult::contains(vec![String::new()])
                } else {
                    AnalysisResult::unknown()
                }
            }
            RegexNode::BeginAnchor => AnalysisResult::prefix(vec![String::new()]),
            RegexNode::EndAnchor => AnalysisResult::suffix(vec![String::new()]),
            RegexNode::Capture(sub) => self.analyze(sub, is_last),
            RegexNode::Concat(children) => self.analyze_concat(children, is_last),
            RegexNode::Alternate(children) => self.analyze_alternate(children, is_last),
            RegexNode::Other => AnalysisResult::unknown(),
        };
        trace!("analyze {} (last={}) -> {:?}", node.kind_name(), is_last, result);
        result
    }

    fn analyze_class(&self, ranges: &[(char, char)]) -> AnalysisResult {
        let [(lo, hi)] = ranges else {
            return AnalysisResult::unknown();
        };
        let size = (*hi as u32 - *lo as u32 + 1) as usize;
        if size > self.limits.max_class_size {
            return AnalysisResult::unknown();
        }
        AnalysisResult::contains((*lo..=*hi).map(String::from).collect())
    }

    fn analyze_concat(&self, children: &[RegexNode], is_last: bool) -> AnalysisResult {
        let last_idx = children.len().saturating_sub(1);
        let mut begin = matches!(children.first(), Some(RegexNode::BeginAnchor));
        let mut end = children.len() > 1 && matches!(children.last(), Some(RegexNode::EndAnchor));
        // 去掉首尾锚点后的主体区间
        let body_start = usize::from(begin);
        let body_end = children.len() - usize::from(end);
        let mut parts = Vec::with_capacity(children.len());

        for idx in body_start..body_end {
            let child = &children[idx];
            let is_first = idx == body_start;
            let is_final = idx + 1 == body_end;
            // 嵌套锚点只允许出现在主体首/末子节点中，否则语言为空或含多行语义
            if (!is_first && has_anchor(child, true)) || (!is_final && has_anchor(child, false)) {
                return AnalysisResult::unknown();
            }

            let sub = self.analyze(child, is_last && idx == last_idx);
            match classify_part(sub, is_first, is_final) {
                Some(ConcatPart::Body(alternatives)) => parts.push(alternatives),
                Some(ConcatPart::Leading(alternatives)) => {
                    begin = true;
                    parts.push(alternatives);
                }
                Some(ConcatPart::Trailing(alternatives)) => {
                    end = true;
                    parts.push(alternatives);
                }
                None => return AnalysisResult::unknown(),
            }
        }

        let Some(folded) = cartesian_fold(parts, &self.limits) else {
            return AnalysisResult::unknown();
        };
        match (begin, end) {
            (true, true) => AnalysisResult::exact(folded),
            (true, false) => AnalysisResult::prefix(folded),
            (false, true) => AnalysisResult::suffix(folded),
            (false, false) => AnalysisResult::contains(folded),
        }
    }

    fn analyze_alternate(&self, children: &[RegexNode], is_last: bool) -> AnalysisResult {
        let mut merged = AnalysisResult::unknown();
        for child in children {
            let sub = self.analyze(child, is_last);
            // 任一分支无法刻画时丢弃该分支会收窄语言
            if sub.is_unknown() {
                return AnalysisResult::unknown();
            }
            merged.union(sub);
        }
        merged
    }
}

/// 判断子节点结果能否参与拼接折叠
fn classify_part(sub: AnalysisResult, is_first: bool, is_final: bool) -> Option<ConcatPart> {
    let AnalysisResult { exact, contains, prefix, suffix } = sub;
    match (exact, contains, prefix, suffix) {
        (None, None, None, None) => None,
        (exact, contains, None, None) => {
            let mut alternatives = exact.unwrap_or_default();
            alternatives.extend(contains.unwrap_or_default());
            Some(ConcatPart::Body(alternatives))
        }
        (None, None, Some(prefix), None) if is_first => Some(ConcatPart::Leading(prefix)),
        (None, None, None, Some(suffix)) if is_final => Some(ConcatPart::Trailing(suffix)),
        _ => None,
    }
}

/// 子树中是否含有开头（begin=true）或结尾锚点
fn has_anchor(node: &RegexNode, begin: bool) -> bool {
    match node {
        RegexNode::BeginAnchor => begin,
        RegexNode::EndAnchor => !begin,
        RegexNode::Star(sub) | RegexNode::Capture(sub) => has_anchor(sub, begin),
        RegexNode::Concat(children) | RegexNode::Alternate(children) => {
            children.iter().any(|child| has_anchor(child, begin))
        }
        RegexNode::EmptyMatch | RegexNode::Literal(_) | RegexNode::CharClass(_) | RegexNode::Other => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_NEST_LIMIT;
    use crate::syntax::parse_pattern;

    fn analyze(pattern: &str) -> AnalysisResult {
        let node = parse_pattern(pattern, DEFAULT_NEST_LIMIT).unwrap();
        NodeAnalyzer::default().analyze(&node, true)
    }

    fn strs(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    fn lit(s: &str) -> RegexNode {
        RegexNode::Literal(s.to_string())
    }

    fn dot_star() -> RegexNode {
        RegexNode::Star(Box::new(RegexNode::CharClass(vec![('\0', '\t'), ('\u{0B}', '\u{10FFFF}')])))
    }

    #[test]
    fn test_leaf_nodes() {
        let analyzer = NodeAnalyzer::default();
        assert_eq!(analyzer.analyze(&RegexNode::EmptyMatch, false), AnalysisResult::exact(vec![String::new()]));
        assert_eq!(analyzer.analyze(&lit("abc"), false).contains, strs(&["abc"]));
        assert_eq!(analyzer.analyze(&RegexNode::BeginAnchor, false).prefix, strs(&[""]));
        assert_eq!(analyzer.analyze(&RegexNode::EndAnchor, false).suffix, strs(&[""]));
        assert!(analyzer.analyze(&RegexNode::Other, true).is_unknown());
    }

    #[test]
    fn test_star_depends_on_position() {
        let analyzer = NodeAnalyzer::default();
        assert_eq!(analyzer.analyze(&dot_star(), true).contains, strs(&[""]));
        assert!(analyzer.analyze(&dot_star(), false).is_unknown());

        // 非 `.*` 的星号一律放弃
        let a_star = RegexNode::Star(Box::new(lit("a")));
        assert!(analyzer.analyze(&a_star, true).is_unknown());
    }

    #[test]
    fn test_char_class_range() {
        let analyzer = NodeAnalyzer::default();
        let class = RegexNode::CharClass(vec![('a', 'c')]);
        assert_eq!(analyzer.analyze(&class, false).contains, strs(&["a", "b", "c"]));

        // 多区间与超大区间都放弃
        let split = RegexNode::CharClass(vec![('a', 'a'), ('c', 'c')]);
        assert!(analyzer.analyze(&split, false).is_unknown());
        let wide = RegexNode::CharClass(vec![('0', 'a')]);
        assert!(analyzer.analyze(&wide, false).is_unknown());
        let alphabet = RegexNode::CharClass(vec![('a', 'z')]);
        assert_eq!(analyzer.analyze(&alphabet, false).contains.map(|v| v.len()), Some(26));
    }

    #[test]
    fn test_capture_is_transparent() {
        let analyzer = NodeAnalyzer::default();
        let node = RegexNode::Capture(Box::new(dot_star()));
        assert_eq!(analyzer.analyze(&node, true).contains, strs(&[""]));
        assert!(analyzer.analyze(&node, false).is_unknown());
    }

    #[test]
    fn test_concat_anchor_classification() {
        assert_eq!(analyze("^a$"), AnalysisResult::exact(vec!["a".to_string()]));
        assert_eq!(analyze("^ab"), AnalysisResult::prefix(vec!["ab".to_string()]));
        assert_eq!(analyze("ab$"), AnalysisResult::suffix(vec!["ab".to_string()]));
        assert_eq!(analyze("^$"), AnalysisResult::exact(vec![String::new()]));
    }

    #[test]
    fn test_concat_product() {
        assert_eq!(analyze("^a(b|c)$").exact, strs(&["ab", "ac"]));
        assert_eq!(analyze("^[a-b][c-d]$").exact, strs(&["ac", "ad", "bc", "bd"]));
    }

    #[test]
    fn test_concat_unknown_child_aborts() {
        assert!(analyze("^a.b$").is_unknown());
        assert!(analyze("^a+$").is_unknown());
    }

    #[test]
    fn test_trailing_wildcard() {
        assert_eq!(analyze("^golang/oauth.*").prefix, strs(&["golang/oauth"]));
        assert_eq!(analyze("golang/oauth.*").contains, strs(&["golang/oauth"]));
        // `$` 占据末位，`.*` 不再是末尾
        assert!(analyze("^a.*$").is_unknown());
        assert!(analyze("github.com/.*/ini$").is_unknown());
    }

    #[test]
    fn test_trailing_wildcard_inside_group_followed_by_literal() {
        // 组内 `.*` 之后还有外层字面量，不能视为末尾
        assert!(analyze("^(a.*|b)c$").is_unknown());
        assert!(analyze("^github.com/(go.*lang|go)/oauth$").is_unknown());
    }

    #[test]
    fn test_alternation_is_union() {
        let result = analyze("^a|b$");
        assert_eq!(result.prefix, strs(&["a"]));
        assert_eq!(result.suffix, strs(&["b"]));
        assert_eq!(result.exact, None);
        assert_eq!(result.contains, None);
    }

    #[test]
    fn test_alternation_with_unknown_branch_aborts() {
        assert!(analyze("(^foo/.+$|^bar$)").is_unknown());
        assert!(analyze("((^foo/.+)|(^bar$))").is_unknown());
    }

    #[test]
    fn test_alternate_forwards_position() {
        let analyzer = NodeAnalyzer::default();
        let node = RegexNode::Alternate(vec![
            RegexNode::Concat(vec![lit("oauth"), dot_star()]),
            lit("bla"),
        ]);
        let trailing = analyzer.analyze(&node, true);
        assert_eq!(trailing.contains, strs(&["oauth", "bla"]));
        assert!(analyzer.analyze(&node, false).is_unknown());
    }

    #[test]
    fn test_anchored_child_positions() {
        let analyzer = NodeAnalyzer::default();
        // (^a|^b)c：首个子节点自带开头锚点
        let leading = RegexNode::Concat(vec![
            RegexNode::Alternate(vec![
                RegexNode::Concat(vec![RegexNode::BeginAnchor, lit("a")]),
                RegexNode::Concat(vec![RegexNode::BeginAnchor, lit("b")]),
            ]),
            lit("c"),
        ]);
        assert_eq!(analyzer.analyze(&leading, true).prefix, strs(&["ac", "bc"]));

        // ^(a$|b$)：末尾子节点自带结尾锚点
        let trailing = RegexNode::Concat(vec![
            RegexNode::BeginAnchor,
            RegexNode::Alternate(vec![
                RegexNode::Concat(vec![lit("a"), RegexNode::EndAnchor]),
                RegexNode::Concat(vec![lit("b"), RegexNode::EndAnchor]),
            ]),
        ]);
        assert_eq!(analyzer.analyze(&trailing, true).exact, strs(&["a", "b"]));
    }

    #[test]
    fn test_misplaced_anchor_aborts() {
        // 中间位置出现锚点，语言为空或依赖多行语义
        assert!(analyze("(^a$)b").is_unknown());
        assert!(analyze("a(^b)").is_unknown());
        assert!(analyze("^a(b$)c$").is_unknown());
    }

    #[test]
    fn test_mixed_child_aborts() {
        // 子节点同时含未锚定与锚定分支，无法参与乘积
        assert!(analyze("^(a.*|b$)").is_unknown());
    }

    #[test]
    fn test_combinatorial_guard() {
        assert!(analyze("^(a|b)(c|d)(e|f)(g|h)(i|j)(k|l)(m|n)$").is_unknown());
        assert_eq!(analyze("^(a|b)(c|d)(e|f)(g|h)$").exact.map(|v| v.len()), Some(16));
        assert!(analyze("^[0-a]$").is_unknown());
    }

    #[test]
    fn test_custom_limits() {
        let limits = DecomposeLimits { max_fold_product: 3, ..DecomposeLimits::default() };
        let node = parse_pattern("^(a|b)(c|d)$", DEFAULT_NEST_LIMIT).unwrap();
        assert!(NodeAnalyzer::new(limits).analyze(&node, true).is_unknown());
        assert!(!NodeAnalyzer::default().analyze(&node, true).is_unknown());
    }
}
