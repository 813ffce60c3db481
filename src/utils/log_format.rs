//! 日志中的模式预览
use std::fmt::{self, Write};

/// 模式预览：控制字符转义，超过 `max_chars` 个字符时截断并追加 `…`
pub struct PatternPreview<'a> {
    pattern: &'a str,
    max_chars: usize,
}

impl fmt::Display for PatternPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = self.pattern.chars();
        for ch in chars.by_ref().take(self.max_chars) {
            if ch.is_control() {
                write!(f, "{}", ch.escape_default())?;
            } else {
                f.write_char(ch)?;
            }
        }
        if chars.next().is_some() {
            f.write_char('…')?;
        }
        Ok(())
    }
}

#[inline]
pub fn preview_compact(pattern: &str, max_chars: usize) -> PatternPreview<'_> {
    PatternPreview { pattern, max_chars }
}

/// 格式：["s1", "s2", ...]，最多显示前 10 项
pub fn preview_list(items: &[String]) -> String {
    const MAX_COUNT: usize = 10;
    const MAX_ITEM_LEN: usize = 40;

    if items.is_empty() {
        return "[empty]".to_string();
    }

    let shown: Vec<String> = items
        .iter()
        .take(MAX_COUNT)
        .map(|item| format!("\"{}\"", preview_compact(item, MAX_ITEM_LEN)))
        .collect();
    let mut result = format!("[{}", shown.join(", "));
    if items.len() > MAX_COUNT {
        result.push_str(&format!(", … (total: {})", items.len()));
    }
    result.push(']');
    result
}
