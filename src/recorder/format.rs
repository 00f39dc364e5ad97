//! Presentation helpers for log lines. Never used for identity comparisons.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Cid;

const SHORT_ID_CHARS: usize = 10;
const ELLIPSIS: &str = "...";

/// How content identifiers are rendered in log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdFormat {
    /// Full canonical string.
    #[default]
    Long,
    /// `...` followed by the last 10 characters.
    Short,
}

pub fn format_cid(cid: &Cid, format: IdFormat) -> String {
    let s = cid.as_str();
    match format {
        IdFormat::Long => s.to_string(),
        IdFormat::Short => {
            let total = s.chars().count();
            if total < SHORT_ID_CHARS {
                return s.to_string();
            }
            let tail: String = s.chars().skip(total - SHORT_ID_CHARS).collect();
            format!("{}{}", ELLIPSIS, tail)
        }
    }
}

/// `request` alone when it equals `root`, else `request (root root)`.
pub fn format_cid_and_root(request: &Cid, root: &Cid, format: IdFormat) -> String {
    if request == root {
        format_cid(request, format)
    } else {
        format!(
            "{} (root {})",
            format_cid(request, format),
            format_cid(root, format)
        )
    }
}

const IEC_SUFFIXES: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// IEC byte quantity: `512 B`, `2.0 KiB`, `15 KiB`, `1.5 MiB`.
pub fn format_ibytes(bytes: u64) -> String {
    if bytes < 10 {
        return format!("{} B", bytes);
    }
    let mut exp = 0;
    while exp + 1 < IEC_SUFFIXES.len() && bytes >= 1u64 << (10 * (exp + 1)) {
        exp += 1;
    }
    let scaled = bytes as f64 / (1u64 << (10 * exp)) as f64;
    let val = (scaled * 10.0 + 0.5).floor() / 10.0;
    if val < 10.0 {
        format!("{:.1} {}", val, IEC_SUFFIXES[exp])
    } else {
        format!("{:.0} {}", val, IEC_SUFFIXES[exp])
    }
}

/// Elapsed time with hour and minute components: `5s`, `1m30.5s`, `2h0m1s`.
///
/// Sub-second values use the largest unit that keeps a whole part:
/// `250ms`, `1.5µs`, `800ns`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos / 1_000, nanos % 1_000, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", decimal(nanos / 1_000_000, nanos % 1_000_000, 6));
    }

    let secs = d.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    out.push_str(&decimal(u128::from(seconds), u128::from(d.subsec_nanos()), 9));
    out.push('s');
    out
}

fn decimal(whole: u128, frac: u128, digits: usize) -> String {
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
