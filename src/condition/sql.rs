//! PostgreSQL 渲染：只输出 `$n` 占位符与参数列表，用户字符串从不拼入 SQL 文本
use serde::{Deserialize, Serialize};

use super::predicate::{Predicate, PredicateGroup};

/// 绑定参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlArg {
    Text(String),
    TextArray(Vec<String>),
}

/// 占位符计数器，跨多个谓词组共享编号
#[derive(Debug, Clone)]
pub struct BindCounter {
    next: usize,
}

impl Default for BindCounter {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl BindCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 拼接进已有查询时从指定编号开始
    pub fn starting_at(first: usize) -> Self {
        Self { next: first.max(1) }
    }

    fn bind(&mut self, arg: SqlArg, args: &mut Vec<SqlArg>) -> String {
        let placeholder = format!("${}", self.next);
        self.next += 1;
        args.push(arg);
        placeholder
    }
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlFragment {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

impl SqlFragment {
    /// 按分隔符连接，参数顺序与占位符顺序一致
    pub fn join(fragments: Vec<SqlFragment>, separator: &str) -> SqlFragment {
        let mut sql = String::new();
        let mut args = Vec::new();
        for (idx, fragment) in fragments.into_iter().enumerate() {
            if idx > 0 {
                sql.push_str(separator);
            }
            sql.push_str(&fragment.sql);
            args.extend(fragment.args);
        }
        SqlFragment { sql, args }
    }
}

impl PredicateGroup {
    /// 渲染为 `(p1 OR p2 ...)`
    pub fn to_sql(&self, binds: &mut BindCounter) -> SqlFragment {
        let mut args = Vec::new();
        let mut sql = String::from("(");
        for (idx, predicate) in self.predicates.iter().enumerate() {
            if idx > 0 {
                sql.push_str(" OR ");
            }
            sql.push_str(&self.render_predicate(predicate, binds, &mut args));
        }
        sql.push(')');
        SqlFragment { sql, args }
    }

    fn render_predicate(&self, predicate: &Predicate, binds: &mut BindCounter, args: &mut Vec<SqlArg>) -> String {
        let col = &self.column;
        match (predicate, self.case_sensitive) {
            (Predicate::Always, _) => "TRUE".to_string(),
            (Predicate::NameIn(names), true) => {
                let p = binds.bind(SqlArg::TextArray(names.clone()), args);
                format!("{col}::text = ANY ({p})")
            }
            (Predicate::NameIn(names), false) => {
                let p = binds.bind(SqlArg::TextArray(names.clone()), args);
                format!("lower({col}) = ANY ({p})")
            }
            (Predicate::NameLike(pattern), true) => {
                let p = binds.bind(SqlArg::Text(pattern.clone()), args);
                format!("{col}::text LIKE {p}")
            }
            (Predicate::NameLike(pattern), false) => {
                let p = binds.bind(SqlArg::Text(pattern.clone()), args);
                format!("lower({col}) LIKE {p}")
            }
            (Predicate::NameRegex(pattern), true) => {
                let p = binds.bind(SqlArg::Text(pattern.clone()), args);
                format!("{col}::text ~ {p}")
            }
            (Predicate::NameRegex(pattern), false) => {
                let p = binds.bind(SqlArg::Text(pattern.clone()), args);
                format!("{col} ~* {p}")
            }
            (Predicate::NameNotRegex(pattern), true) => {
                let p = binds.bind(SqlArg::Text(pattern.clone()), args);
                format!("{col}::text !~ {p}")
            }
            (Predicate::NameNotRegex(pattern), false) => {
                let p = binds.bind(SqlArg::Text(pattern.clone()), args);
                format!("{col} !~* {p}")
            }
        }
    }
}
