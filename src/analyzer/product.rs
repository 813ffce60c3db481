//! 拼接节点的笛卡尔积折叠，带组合爆炸防护
use log::debug;

use crate::config::DecomposeLimits;

/// 按顺序折叠每个子节点的候选集合
/// 首个子节点原样作为初始累积；之后每步要求并入分支数与乘积规模都不超限，
/// 任一步超限则整体返回 None，不产出部分结果
pub fn cartesian_fold<I>(parts: I, limits: &DecomposeLimits) -> Option<Vec<String>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    parts
        .into_iter()
        .enumerate()
        .try_fold(vec![String::new()], |acc, (idx, alternatives)| {
            if idx > 0 {
                let size = acc.len() * alternatives.len();
                if alternatives.len() > limits.max_fold_branches || size > limits.max_fold_product {
                    debug!(
                        "组合爆炸防护触发 | 累积: {} | 并入: {} | 乘积: {}",
                        acc.len(),
                        alternatives.len(),
                        size
                    );
                    return None;
                }
            }
            Some(product(&acc, &alternatives))
        })
}

fn product(left: &[String], right: &[String]) -> Vec<String> {
    let mut combined = Vec::with_capacity(left.len() * right.len());
    for head in left {
        for tail in right {
            let mut s = String::with_capacity(head.len() + tail.len());
            s.push_str(head);
            s.push_str(tail);
            combined.push(s);
        }
    }
    combined
}
