const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// 1024 进制，字节以上保留一位小数
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

pub fn format_cpu(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// 超长时以 "..." 结尾，按字符计数
pub fn truncate(s: &str, max_len: usize) -> String {
    let max_len = max_len.max(4);
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}
