//! Phân tích tax, dynamic tax, hidden fee
//!
//! Module này chứa các hàm phân tích liên quan đến:
//! - Tỷ lệ tax mua/bán
//! - Phát hiện phí ẩn hoặc fee có thể thay đổi

use once_cell::sync::Lazy;
use regex::Regex;

use super::utils::{any_match, compile_patterns};

static BUY_TAX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_patterns(&[r"(?:buytax|buyfee)\s*=\s*(\d+)"])
});

static SELL_TAX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_patterns(&[r"(?:selltax|sellfee)\s*=\s*(\d+)"])
});

static HIDDEN_FEE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_patterns(&[
        r"function\s+(setfee|updatefee|changefee|setbuyfee|setsellfee)\w*\s*\(",
        r"function\s+(settax|updatetax|changetax|setbuytax|setselltax)\w*\s*\(",
        r"function\s+(excludefromfee|includeinfee|setfeeexempt)\s*\(",
        r"dynamicfee",
        r"feepercentages?\[\w+\]",
    ])
});

/// Lấy số nguyên đầu tiên khớp với pattern, 0 nếu không có
fn first_tax_value(patterns: &[Regex], source_lc: &str) -> u8 {
    let parsed = patterns
        .iter()
        .filter_map(|re| re.captures(source_lc))
        .find_map(|captures| captures.get(1));

    // Dãy chữ số quá lớn cho u64 được coi là mức trần
    match parsed {
        Some(m) => m.as_str().parse::<u64>().map_or(100, normalize_tax),
        None => 0,
    }
}

/// Giá trị > 100 được coi là basis points (1/100 của %), kết quả giới hạn ở 100
fn normalize_tax(raw: u64) -> u8 {
    let percent = if raw > 100 { raw / 100 } else { raw };
    percent.min(100) as u8
}

/// Phân tích tỷ lệ tax mua/bán (%)
pub fn analyze_tax_rates(source_lc: &str) -> (u8, u8) {
    (
        first_tax_value(&BUY_TAX_PATTERNS, source_lc),
        first_tax_value(&SELL_TAX_PATTERNS, source_lc),
    )
}

/// Phát hiện phí ẩn hoặc fee có thể bị owner thay đổi
pub fn detect_hidden_fees(source_lc: &str) -> bool {
    any_match(&HIDDEN_FEE_PATTERNS, source_lc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_extraction() {
        let source = "uint256 public buytax = 5;\nuint256 public sellfee = 25;";
        assert_eq!(analyze_tax_rates(source), (5, 25));
    }

    #[test]
    fn test_tax_defaults_to_zero() {
        assert_eq!(analyze_tax_rates("contract plain is erc20 {}"), (0, 0));
        // So sánh không phải là phép gán
        assert_eq!(analyze_tax_rates("if (buytax == 3) {}"), (0, 0));
    }

    #[test]
    fn test_first_match_wins() {
        let source = "buyfee = 2; buytax = 9;";
        assert_eq!(analyze_tax_rates(source).0, 2);
    }

    #[test]
    fn test_basis_points_normalization() {
        assert_eq!(analyze_tax_rates("_buytax = 1500; _selltax = 99999;"), (15, 100));
    }

    #[test]
    fn test_oversized_tax_saturates() {
        let source = "uint256 public buytax = 99999999999999999999;\nuint256 public sellfee = 4;";
        assert_eq!(analyze_tax_rates(source), (100, 4));
    }

    #[test]
    fn test_hidden_fees() {
        assert!(detect_hidden_fees("function setfees(uint256 buy, uint256 sell) external onlyowner"));
        assert!(detect_hidden_fees("function excludefromfee(address account) public"));
        assert!(!detect_hidden_fees("uint256 public buytax = 5;"));
    }
}
