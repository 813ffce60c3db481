//! 全局错误类型定义
//! 模式分解本身只会产生语法错误，其余变体服务于配置校验与内存匹配
use thiserror::Error;

use regex::Error as RegexError;
use regex_syntax::Error as PatternSyntaxError;

#[derive(Error, Debug)]
pub enum FilterError {
    /// 正则语法错误（调用方通常映射为 bad request）
    #[error("Pattern syntax error: {0}")]
    PatternSyntax(#[from] PatternSyntaxError),

    /// 内存匹配器构建失败（正则超出编译体积限制等）
    #[error("Regex build failed: {0}")]
    RegexBuild(#[from] RegexError),

    // 基础错误
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FilterError {
    /// 是否为用户输入的正则语法错误
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, FilterError::PatternSyntax(_))
    }
}

// 全局Result类型
pub type FilterResult<T> = Result<T, FilterError>;
