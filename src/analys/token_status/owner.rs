//! Phân tích quyền hạn owner, ownership renounce, proxy
//!
//! Module này chứa các detector liên quan đến:
//! - Kiểm tra đã renounce ownership chưa
//! - Phát hiện backdoor để lấy lại quyền
//! - Phát hiện proxy contract có thể upgrade logic
//! - Quyền mint và pause
//!
//! Mọi detector nhận source đã lowercase.

use once_cell::sync::Lazy;
use regex::Regex;

use super::utils::{any_match, compile_patterns};

const PROXY_MARKERS: [&str; 5] = [
    "delegatecall",
    "upgradeable",
    "proxy",
    "implementation",
    "eip1967",
];

static MINT_DECL: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_patterns(&[r"function\s+(mint|mintto|_mint)\s*\("])
});

static PAUSE_DECL: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_patterns(&[r"function\s+pause\s*\(\s*\)"])
});

static RENOUNCE_CALL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"renounceownership\s*\(\s*\)").ok()
});

static RENOUNCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_patterns(&[
        r"\b_?owner\s*=\s*address\s*\(\s*0\s*\)",
        r"_transferownership\s*\(\s*address\s*\(\s*0\s*\)\s*\)",
    ])
});

static BACKDOOR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_patterns(&[
        r"function\s+(initializeowner|recoverownership|claimownership|resetowner)\s*\(",
        r"require\s*\(\s*_owner\s*==\s*address\s*\(\s*0\s*\)\s*\)",
    ])
});

/// Contract có phải proxy/upgradeable không
pub fn is_proxy_contract(source_lc: &str) -> bool {
    PROXY_MARKERS.iter().any(|marker| source_lc.contains(marker))
}

/// Có khai báo hàm `mint`, `mintTo` hoặc `_mint` không
pub fn has_mint_function(source_lc: &str) -> bool {
    any_match(&MINT_DECL, source_lc)
}

/// Có hàm `pause()` hoặc dùng modifier/thư viện pausable không
pub fn has_pause_function(source_lc: &str) -> bool {
    any_match(&PAUSE_DECL, source_lc)
        || source_lc.contains("whennotpaused")
        || source_lc.contains("pausable")
}

/// Kiểm tra xem quyền sở hữu đã được từ bỏ chưa.
///
/// Chỉ tính lời gọi `renounceOwnership()`; phần khai báo hàm của Ownable
/// (`function renounceOwnership()`) không được coi là đã renounce.
pub fn is_ownership_renounced(source_lc: &str) -> bool {
    let renounce_called = RENOUNCE_CALL.as_ref().map_or(false, |re| {
        re.find_iter(source_lc)
            .any(|m| !source_lc[..m.start()].trim_end().ends_with("function"))
    });

    renounce_called || any_match(&RENOUNCE_PATTERNS, source_lc)
}

/// Có cơ chế lấy lại quyền owner sau khi renounce không
pub fn has_ownership_backdoor(source_lc: &str) -> bool {
    any_match(&BACKDOOR_PATTERNS, source_lc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_markers() {
        assert!(is_proxy_contract("contract token is erc1967proxy {}"));
        assert!(is_proxy_contract("(bool ok, ) = impl.delegatecall(data);"));
        assert!(is_proxy_contract("bytes32 slot = eip1967.implementation_slot;"));
        assert!(!is_proxy_contract("contract plaintoken is erc20 {}"));
    }

    #[test]
    fn test_mint_declaration() {
        assert!(has_mint_function("function mint(address to, uint256 amount) external onlyowner"));
        assert!(has_mint_function("function mintto (address to) public"));
        assert!(has_mint_function("function _mint(address account, uint256 amount) internal"));
        // Lời gọi _mint trong constructor không phải là khai báo hàm
        assert!(!has_mint_function("constructor() { _mint(msg.sender, 1000); }"));
    }

    #[test]
    fn test_pause_detection() {
        assert!(has_pause_function("function pause() external onlyowner { _paused = true; }"));
        assert!(has_pause_function("function transfer(address to) public whennotpaused"));
        assert!(has_pause_function("contract t is erc20pausable {}"));
        assert!(!has_pause_function("function unpausedbalance() view"));
    }

    #[test]
    fn test_renounce_call_vs_declaration() {
        let ownable_only = "function renounceownership() public virtual onlyowner { _transferownership(_newowner); }";
        assert!(!is_ownership_renounced(ownable_only));

        let renounced = "constructor() { renounceownership(); }";
        assert!(is_ownership_renounced(renounced));

        assert!(is_ownership_renounced("_owner = address(0);"));
        assert!(is_ownership_renounced("_transferownership(address(0));"));
        assert!(!is_ownership_renounced("_owner = msg.sender;"));
    }

    #[test]
    fn test_ownership_backdoor() {
        assert!(has_ownership_backdoor("function recoverownership() external {"));
        assert!(!has_ownership_backdoor("function transferownership(address newowner) public"));
    }
}
