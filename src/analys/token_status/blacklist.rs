//! Phân tích blacklist/whitelist và giới hạn giao dịch
//!
//! Module này chứa các hàm phân tích liên quan đến:
//! - Phát hiện blacklist/whitelist trong token
//! - Phát hiện cooldown giữa các giao dịch
//! - Phát hiện giới hạn số lượng giao dịch và số lượng token trong ví

/// Detector dựa trên so khớp chuỗi con
struct SubstringDetector {
    patterns: &'static [&'static str],
}

impl SubstringDetector {
    const fn new(patterns: &'static [&'static str]) -> Self {
        Self { patterns }
    }

    fn matches(&self, source_lc: &str) -> bool {
        self.patterns.iter().any(|pattern| source_lc.contains(pattern))
    }
}

const BLACKLIST: SubstringDetector =
    SubstringDetector::new(&["blacklist", "isblacklisted", "banned", "isbanned"]);

const WHITELIST: SubstringDetector =
    SubstringDetector::new(&["whitelist", "iswhitelisted", "allowed", "isallowed"]);

const COOLDOWN: SubstringDetector = SubstringDetector::new(&[
    "cooldown",
    "lasttradetime",
    "lasttransfertime",
    "tradingdelay",
    "transferdelay",
    "antibottimer",
]);

const TX_LIMIT: SubstringDetector = SubstringDetector::new(&[
    "maxtxamount",
    "maxtransactionamount",
    "maxtransferamount",
    "maxwalletamount",
    "maxwalletsize",
    "maxwallet",
    "antiwhale",
]);

/// Token có chức năng blacklist không
pub fn has_blacklist(source_lc: &str) -> bool {
    BLACKLIST.matches(source_lc)
}

/// Token có chức năng whitelist không
pub fn has_whitelist(source_lc: &str) -> bool {
    WHITELIST.matches(source_lc)
}

/// Kiểm tra xem token có giới hạn thời gian giữa các giao dịch
pub fn has_trading_cooldown(source_lc: &str) -> bool {
    COOLDOWN.matches(source_lc)
}

/// Kiểm tra xem token có giới hạn số lượng giao dịch hoặc số lượng token trong ví
pub fn has_max_tx_or_wallet_limit(source_lc: &str) -> bool {
    TX_LIMIT.matches(source_lc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blacklist_markers() {
        assert!(has_blacklist("mapping(address => bool) public isblacklisted;"));
        assert!(has_blacklist("require(!banned[from]);"));
        assert!(!has_blacklist("mapping(address => uint256) balances;"));
    }

    #[test]
    fn test_whitelist_markers() {
        assert!(has_whitelist("function addtowhitelist(address a) external"));
        assert!(has_whitelist("mapping(address => mapping(address => uint256)) allowed;"));
        assert!(!has_whitelist("mapping(address => uint256) balances;"));
    }

    #[test]
    fn test_trading_restrictions() {
        assert!(has_trading_cooldown("uint256 public cooldowntimerinterval = 30;"));
        assert!(has_max_tx_or_wallet_limit("require(amount <= _maxtxamount);"));
        assert!(!has_trading_cooldown("function transfer(address to) public"));
        assert!(!has_max_tx_or_wallet_limit("function transfer(address to) public"));
    }
}
