// 递归节点分析
pub mod node_analyzer;
// 拼接折叠与组合爆炸防护
pub mod product;

pub use node_analyzer::{AnalysisResult, NodeAnalyzer};
pub use product::cartesian_fold;
