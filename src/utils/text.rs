//! 字符级文本工具
//!
//! 长度和截断都按字符计算，不会切在多字节字符中间。

/// 按字符（而非字节）计算长度
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// 取前 `n` 个字符
pub fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
