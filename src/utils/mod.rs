// 日志预览格式化
pub mod log_format;
// LIKE 模式转义与匹配
pub mod like;

pub use log_format::{preview_compact, preview_list};
pub use like::{contains_pattern, escape_like, prefix_pattern, suffix_pattern, LikePattern};
