//! 全局配置管理,存储所有可配置项

use crate::error::{FilterError, FilterResult};

/// 精确集合折叠时，除首个子节点外每一步允许并入的最大分支数
pub const MAX_FOLD_BRANCHES: usize = 4;
/// 单次拼接折叠允许的最大笛卡尔积规模
pub const MAX_FOLD_PRODUCT: usize = 30;
/// 单区间字符类允许展开的最大码点数
pub const MAX_CLASS_SIZE: usize = 26;
/// 正则嵌套深度上限（与 regex-syntax 默认值一致）
pub const DEFAULT_NEST_LIMIT: u32 = 250;

/// 组合爆炸防护阈值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecomposeLimits {
    pub max_fold_branches: usize,
    pub max_fold_product: usize,
    pub max_class_size: usize,
}

impl Default for DecomposeLimits {
    fn default() -> Self {
        Self {
            max_fold_branches: MAX_FOLD_BRANCHES,
            max_fold_product: MAX_FOLD_PRODUCT,
            max_class_size: MAX_CLASS_SIZE,
        }
    }
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct FilterConfig {
    // 是否区分大小写（影响 IN / LIKE / 正则谓词的渲染与内存匹配）
    pub case_sensitive: bool,
    // 被过滤的列名，直接写入 SQL 文本，构建时校验为合法标识符
    pub column: String,
    // 正则解析嵌套深度上限
    pub nest_limit: u32,
    // 组合爆炸防护阈值
    pub limits: DecomposeLimits,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            column: "name".to_string(),
            nest_limit: DEFAULT_NEST_LIMIT,
            limits: DecomposeLimits::default(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> FilterConfig {
        FilterConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: FilterConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: FilterConfig::default(),
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.config.case_sensitive = case_sensitive;
        self
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.config.column = column.into();
        self
    }

    pub fn nest_limit(mut self, nest_limit: u32) -> Self {
        self.config.nest_limit = nest_limit;
        self
    }

    pub fn limits(mut self, limits: DecomposeLimits) -> Self {
        self.config.limits = limits;
        self
    }

    /// 校验并生成配置
    pub fn build(self) -> FilterResult<FilterConfig> {
        if !is_sql_identifier(&self.config.column) {
            return Err(FilterError::InvalidInput(format!(
                "column must be a plain SQL identifier, got {:?}",
                self.config.column
            )));
        }
        let limits = &self.config.limits;
        if limits.max_fold_branches == 0 || limits.max_fold_product == 0 || limits.max_class_size == 0 {
            return Err(FilterError::InvalidInput(
                "decompose limits must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}

/// 仅允许 [A-Za-z_][A-Za-z0-9_]*，可带一级 `table.` 限定
fn is_sql_identifier(s: &str) -> bool {
    let mut parts = s.split('.');
    let valid_part = |p: &str| {
        let mut chars = p.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    match (parts.next(), parts.next(), parts.next()) {
        (Some(col), None, None) => valid_part(col),
        (Some(table), Some(col), None) => valid_part(table) && valid_part(col),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigManager::get_default();
        assert!(!config.case_sensitive);
        assert_eq!(config.column, "name");
        assert_eq!(config.limits.max_fold_product, 30);
        assert_eq!(config.limits.max_fold_branches, 4);
        assert_eq!(config.limits.max_class_size, 26);
    }

    #[test]
    fn test_builder_accepts_qualified_column() {
        let config = ConfigManager::custom()
            .column("repo.name")
            .case_sensitive(true)
            .build()
            .unwrap();
        assert_eq!(config.column, "repo.name");
        assert!(config.case_sensitive);
    }

    #[test]
    fn test_builder_rejects_injected_column() {
        // 测试场景：列名会拼入 SQL 文本，必须拒绝非标识符
        for column in ["name; DROP TABLE repo", "", "1name", "a.b.c", "lower(name)"] {
            let err = ConfigManager::custom().column(column).build().unwrap_err();
            assert!(matches!(err, FilterError::InvalidInput(_)), "{column}");
        }
    }

    #[test]
    fn test_builder_rejects_zero_limits() {
        let limits = DecomposeLimits {
            max_fold_product: 0,
            ..DecomposeLimits::default()
        };
        assert!(ConfigManager::custom().limits(limits).build().is_err());
    }
}
