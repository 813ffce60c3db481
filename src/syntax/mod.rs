//! 正则语法树适配层
//! 将 regex-syntax 的 HIR 降级为封闭的 RegexNode 枚举，分析器只面向该枚举做穷尽匹配
use regex_syntax::hir::{Class, Hir, HirKind, Look};
use regex_syntax::ParserBuilder;

use crate::error::FilterResult;

/// 简化后的正则语法树节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexNode {
    EmptyMatch,
    Literal(String),
    /// 闭区间列表，按码点升序
    CharClass(Vec<(char, char)>),
    Star(Box<RegexNode>),
    BeginAnchor,
    EndAnchor,
    Capture(Box<RegexNode>),
    Concat(Vec<RegexNode>),
    Alternate(Vec<RegexNode>),
    /// 无法处理的构造：有界重复、单词边界、多行锚点、非 UTF-8 字面量等
    Other,
}

impl RegexNode {
    /// 从 HIR 降级
    pub fn from_hir(hir: &Hir) -> RegexNode {
        match hir.kind() {
            HirKind::Empty => RegexNode::EmptyMatch,
            HirKind::Literal(lit) => match std::str::from_utf8(&lit.0) {
                Ok(text) => RegexNode::Literal(text.to_string()),
                Err(_) => RegexNode::Other,
            },
            HirKind::Class(Class::Unicode(cls)) => RegexNode::CharClass(
                cls.ranges().iter().map(|r| (r.start(), r.end())).collect(),
            ),
            HirKind::Class(Class::Bytes(cls)) => {
                // 仅 ASCII 字节类与字符类等价
                if cls.ranges().iter().all(|r| r.end() <= 0x7F) {
                    RegexNode::CharClass(
                        cls.ranges()
                            .iter()
                            .map(|r| (char::from(r.start()), char::from(r.end())))
                            .collect(),
                    )
                } else {
                    RegexNode::Other
                }
            }
            HirKind::Look(Look::Start) => RegexNode::BeginAnchor,
            HirKind::Look(Look::End) => RegexNode::EndAnchor,
            HirKind::Look(_) => RegexNode::Other,
            HirKind::Repetition(rep) if rep.min == 0 && rep.max.is_none() => {
                RegexNode::Star(Box::new(RegexNode::from_hir(&rep.sub)))
            }
            HirKind::Repetition(_) => RegexNode::Other,
            HirKind::Capture(cap) => RegexNode::Capture(Box::new(RegexNode::from_hir(&cap.sub))),
            HirKind::Concat(subs) => {
                // 空匹配是拼接的单位元
                let mut children: Vec<RegexNode> = subs
                    .iter()
                    .map(RegexNode::from_hir)
                    .filter(|child| *child != RegexNode::EmptyMatch)
                    .collect();
                match children.len() {
                    0 => RegexNode::EmptyMatch,
                    1 => children.remove(0),
                    _ => RegexNode::Concat(children),
                }
            }
            HirKind::Alternation(subs) => {
                let children: Vec<RegexNode> = subs.iter().map(RegexNode::from_hir).collect();
                // 公共前缀提取后可能留下全空分支
                if children.iter().all(|child| *child == RegexNode::EmptyMatch) {
                    RegexNode::EmptyMatch
                } else {
                    RegexNode::Alternate(children)
                }
            }
        }
    }

    /// 是否为 `.`（含或不含换行）
    pub fn is_any_char(&self) -> bool {
        match self {
            RegexNode::CharClass(ranges) => matches!(
                ranges.as_slice(),
                [('\0', '\u{10FFFF}')] | [('\0', '\t'), ('\u{0B}', '\u{10FFFF}')]
            ),
            _ => false,
        }
    }

    /// 节点类型名，仅用于日志
    pub fn kind_name(&self) -> &'static str {
        match self {
            RegexNode::EmptyMatch => "empty",
            RegexNode::Literal(_) => "literal",
            RegexNode::CharClass(_) => "class",
            RegexNode::Star(_) => "star",
            RegexNode::BeginAnchor => "begin",
            RegexNode::EndAnchor => "end",
            RegexNode::Capture(_) => "capture",
            RegexNode::Concat(_) => "concat",
            RegexNode::Alternate(_) => "alternate",
            RegexNode::Other => "other",
        }
    }
}

/// 解析正则并降级为 RegexNode
/// 单行模式：`.` 不匹配换行，`^`/`$` 只锚定整串首尾
pub fn parse_pattern(pattern: &str, nest_limit: u32) -> FilterResult<RegexNode> {
    let mut parser = ParserBuilder::new()
        .nest_limit(nest_limit)
        .dot_matches_new_line(false)
        .multi_line(false)
        .build();
    let hir = parser.parse(pattern)?;
    Ok(RegexNode::from_hir(&hir))
}
