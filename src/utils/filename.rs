//! 文件名清理
//!
//! 去掉常见文件系统不允许的字符，结果可以安全地放在任意平台的目录里

use std::sync::OnceLock;

use phf::phf_set;
use regex::Regex;

/// 单个文件名的最大字节数
pub const MAX_FILENAME_BYTES: usize = 255;

/// Windows 保留设备名
static RESERVED_NAMES: phf::Set<&'static str> = phf_set! {
    "CON", "PRN", "AUX", "NUL", "CLOCK$",
    "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9",
    "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
};

fn invalid_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 控制字符 + Windows/POSIX 不允许的字符
    RE.get_or_init(|| Regex::new(r#"[\x00-\x1f\x7f"*/:<>?\\|]"#).unwrap())
}

/// 清理文件名
///
/// - 删除非法字符和控制字符
/// - 去掉首尾空白和结尾的 `.`
/// - 保留设备名后追加 `_`
/// - 截断到 255 字节（按字符边界）
///
/// 对结果再次调用结果不变。
pub fn sanitize_filename(name: &str) -> String {
    sanitize_filename_within(name, MAX_FILENAME_BYTES)
}

/// 同 `sanitize_filename`，但截断到 `max_bytes` 字节，给扩展名留出空间
pub fn sanitize_filename_within(name: &str, max_bytes: usize) -> String {
    let cleaned = invalid_chars().replace_all(name, "");
    let mut out = trim_edges(&cleaned).to_string();

    if out.len() > max_bytes {
        let mut end = max_bytes;
        while !out.is_char_boundary(end) {
            end -= 1;
        }
        out.truncate(end);
        out = trim_edges(&out).to_string();
    }

    if RESERVED_NAMES.contains(out.to_ascii_uppercase().as_str()) {
        out.push('_');
    }
    out
}

fn trim_edges(s: &str) -> &str {
    s.trim().trim_end_matches(|c: char| c == '.' || c.is_whitespace())
}

/// 是否为合法文件名
pub fn is_valid_filename(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_FILENAME_BYTES
        && !invalid_chars().is_match(name)
        && trim_edges(name) == name
        && !RESERVED_NAMES.contains(name.to_ascii_uppercase().as_str())
}
