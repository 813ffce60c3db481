//! LIKE 模式工具：转义、包装与内存匹配
//! 转义字符固定为反斜杠（PostgreSQL 默认）

/// 转义 LIKE 元字符 `\` `%` `_`
pub fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%text%`
pub fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like(s))
}

/// `text%`
pub fn prefix_pattern(s: &str) -> String {
    format!("{}%", escape_like(s))
}

/// `%text`
pub fn suffix_pattern(s: &str) -> String {
    format!("%{}", escape_like(s))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    Char(char),
    AnyOne,
    AnyMany,
}

/// 预解析的 LIKE 模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    tokens: Vec<LikeToken>,
}

impl LikePattern {
    pub fn new(pattern: &str) -> Self {
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                // 末尾孤立的反斜杠按字面处理
                '\\' => LikeToken::Char(chars.next().unwrap_or('\\')),
                '%' => LikeToken::AnyMany,
                '_' => LikeToken::AnyOne,
                c => LikeToken::Char(c),
            };
            // 连续 % 等价于单个 %
            if token == LikeToken::AnyMany && tokens.last() == Some(&LikeToken::AnyMany) {
                continue;
            }
            tokens.push(token);
        }
        Self { tokens }
    }

    /// 通配回溯匹配，最坏 O(n*m)
    pub fn is_match(&self, input: &str) -> bool {
        let text: Vec<char> = input.chars().collect();
        let (mut t, mut p) = (0usize, 0usize);
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match self.tokens.get(p) {
                Some(LikeToken::AnyMany) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                Some(LikeToken::AnyOne) => {
                    p += 1;
                    t += 1;
                }
                Some(LikeToken::Char(c)) if *c == text[t] => {
                    p += 1;
                    t += 1;
                }
                _ => match backtrack {
                    Some((star_p, star_t)) => {
                        backtrack = Some((star_p, star_t + 1));
                        p = star_p + 1;
                        t = star_t + 1;
                    }
                    None => return false,
                },
            }
        }
        self.tokens[p..].iter().all(|token| *token == LikeToken::AnyMany)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("foo_bar%baz\\"), r"foo\_bar\%baz\\");
        assert_eq!(contains_pattern("abc"), "%abc%");
        assert_eq!(prefix_pattern("github.com/foo/bar"), "github.com/foo/bar%");
        assert_eq!(suffix_pattern("a_b"), r"%a\_b");
    }

    #[test]
    fn test_like_wildcards() {
        let pattern = LikePattern::new("%golang/oauth%");
        assert!(pattern.is_match("github.com/golang/oauth2"));
        assert!(pattern.is_match("golang/oauth"));
        assert!(!pattern.is_match("github.com/golang/oaut"));

        let pattern = LikePattern::new("a_c");
        assert!(pattern.is_match("abc"));
        assert!(!pattern.is_match("ac"));
        assert!(!pattern.is_match("abbc"));
    }

    #[test]
    fn test_like_anchoring() {
        let prefix = LikePattern::new("ab%");
        assert!(prefix.is_match("abc"));
        assert!(!prefix.is_match("cab"));

        let suffix = LikePattern::new("%ab");
        assert!(suffix.is_match("cab"));
        assert!(!suffix.is_match("abc"));

        let exact = LikePattern::new("ab");
        assert!(exact.is_match("ab"));
        assert!(!exact.is_match("abc"));
    }

    #[test]
    fn test_like_escapes_are_literal() {
        let pattern = LikePattern::new(&prefix_pattern("foo_bar"));
        assert!(pattern.is_match("foo_bar/baz"));
        assert!(!pattern.is_match("fooxbar/baz"));

        let pattern = LikePattern::new(&contains_pattern(r"a\b"));
        assert!(pattern.is_match(r"xa\by"));
        assert!(!pattern.is_match("xaby"));
    }

    #[test]
    fn test_like_empty() {
        assert!(LikePattern::new("").is_match(""));
        assert!(!LikePattern::new("").is_match("a"));
        assert!(LikePattern::new("%").is_match(""));
        assert!(LikePattern::new("%%").is_match("anything"));
    }

    #[test]
    fn test_like_backtracking() {
        let pattern = LikePattern::new("%a%b%c");
        assert!(pattern.is_match("xxaxxbxxbxc"));
        assert!(!pattern.is_match("xxaxxbxxbx"));
    }
}
