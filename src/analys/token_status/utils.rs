/*!
 * Token analysis utilities
 *
 * Provides core helpers for static contract analysis:
 * - Regex pattern compilation shared by all detectors
 * - Honeypot detection ("buy allowed, sell blocked" heuristics)
 */

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Biên dịch danh sách pattern, bỏ qua pattern lỗi (kèm log)
pub(crate) fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Bỏ qua pattern không hợp lệ {}: {}", pattern, e);
                None
            }
        })
        .collect()
}

/// Có pattern nào khớp với source không
pub(crate) fn any_match(patterns: &[Regex], source: &str) -> bool {
    patterns.iter().any(|re| re.is_match(source))
}

static HONEYPOT_DETECTOR: Lazy<HoneypotDetector> = Lazy::new(HoneypotDetector::new);

/// Phát hiện honeypot pattern.
///
/// Ba nhóm dấu hiệu, chỉ cần một nhóm khớp:
/// - `require`/`revert` có điều kiện theo địa chỉ pair thanh khoản (chặn bán vào pool)
/// - hàm `transfer` bị gắn modifier `onlyOwner`
/// - thân hàm `transfer` yêu cầu `msg.sender == owner`
///
/// Đây là heuristic: chấp nhận false positive/negative.
pub struct HoneypotDetector {
    pair_guard_patterns: Vec<Regex>,
    owner_gated_transfer_patterns: Vec<Regex>,
    owner_only_body_patterns: Vec<Regex>,
}

impl HoneypotDetector {
    /// Tạo mới honeypot detector
    pub fn new() -> Self {
        Self {
            pair_guard_patterns: compile_patterns(&[
                r"(require|assert)\s*\([^;]*\b(from|to|sender|recipient|msg\.sender)\s*[!=]=\s*\w*pair\b",
                r"(require|assert)\s*\([^;]*\b\w*pair\s*[!=]=\s*(from|to|sender|recipient|msg\.sender)\b",
                r"if\s*\([^)]*\b(from|to|sender|recipient|msg\.sender)\s*==\s*\w*pair\b[^)]*\)\s*\{?\s*revert",
            ]),
            owner_gated_transfer_patterns: compile_patterns(&[
                r"function\s+transfer\s*\([^)]*\)[^{;]*\bonlyowner\b",
            ]),
            owner_only_body_patterns: compile_patterns(&[
                r"function\s+transfer\s*\([^)]*\)[^{;]*\{[^}]*require\s*\(\s*(msg\.sender|_msgsender\(\))\s*==\s*(_?owner\b|owner\(\))",
            ]),
        }
    }

    /// `require`/`revert` theo địa chỉ pair
    pub fn has_pair_guard(&self, source_lc: &str) -> bool {
        any_match(&self.pair_guard_patterns, source_lc)
    }

    /// `transfer` chỉ owner gọi được qua modifier
    pub fn has_owner_gated_transfer(&self, source_lc: &str) -> bool {
        any_match(&self.owner_gated_transfer_patterns, source_lc)
    }

    /// `transfer` có `require(msg.sender == owner)` trong thân hàm
    pub fn has_owner_only_transfer_body(&self, source_lc: &str) -> bool {
        any_match(&self.owner_only_body_patterns, source_lc)
    }

    /// Phân tích mã để phát hiện honeypot
    pub fn analyze(&self, source_lc: &str) -> bool {
        self.has_pair_guard(source_lc)
            || self.has_owner_gated_transfer(source_lc)
            || self.has_owner_only_transfer_body(source_lc)
    }
}

impl Default for HoneypotDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Phát hiện honeypot với detector dùng chung
pub fn detect_honeypot(source_lc: &str) -> bool {
    HONEYPOT_DETECTOR.analyze(source_lc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_guard_require() {
        let source = r#"function _transfer(address from, address to, uint256 amount) internal {
            require(to != uniswapv2pair || isexcluded[from], "sell disabled");
        }"#;
        assert!(detect_honeypot(source));
    }

    #[test]
    fn test_pair_guard_if_revert() {
        let source = "if (to == pancakepair && !whitelisted[from]) { revert(); }";
        assert!(detect_honeypot(source));
    }

    #[test]
    fn test_owner_gated_transfer() {
        let detector = HoneypotDetector::new();
        let source = "function transfer(address to, uint256 amount) public onlyowner returns (bool) {";
        assert!(detector.has_owner_gated_transfer(source));
        assert!(detector.analyze(source));
    }

    #[test]
    fn test_owner_only_transfer_body() {
        let detector = HoneypotDetector::new();
        let source = "function transfer(address to, uint256 amount) public override returns (bool) {
            require(msg.sender == owner, \"only owner\");
            _transfer(msg.sender, to, amount);
        }";
        assert!(detector.has_owner_only_transfer_body(source));
    }

    #[test]
    fn test_plain_erc20_is_not_honeypot() {
        let source = "function transfer(address to, uint256 amount) public virtual override returns (bool) {
            address owner = _msgsender();
            _transfer(owner, to, amount);
            return true;
        }
        function transferfrom(address from, address to, uint256 amount) public onlyowner returns (bool) {}";
        assert!(!detect_honeypot(source));
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let compiled = compile_patterns(&["valid", "(unclosed"]);
        assert_eq!(compiled.len(), 1);
    }
}
