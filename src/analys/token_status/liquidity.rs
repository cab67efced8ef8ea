//! Phân tích thanh khoản và tuổi contract
//!
//! Trạng thái khóa LP không xác định được từ source code. Scanner chỉ báo
//! `lp_locked = true` khi có một [`LpLockOracle`] được cấu hình và oracle xác nhận.

use chrono::{DateTime, Utc};

use super::types::NEW_CONTRACT_AGE_SECS;

/// Nguồn dữ liệu bên ngoài cho biết LP token của contract đã bị khóa chưa
/// (ví dụ Unicrypt, Team Finance).
pub trait LpLockOracle: Send + Sync {
    fn is_liquidity_locked(&self, contract_address: &str) -> bool;
}

/// Kiểm tra nếu LP đã được khóa
pub fn is_liquidity_locked(oracle: Option<&dyn LpLockOracle>, contract_address: &str) -> bool {
    oracle.map_or(false, |oracle| oracle.is_liquidity_locked(contract_address))
}

/// Tuổi contract tính bằng giây.
///
/// `None` nếu không rõ thời điểm tạo: timestamp bằng 0 hoặc vượt quá phạm vi `i64`.
pub fn contract_age_secs(creation_timestamp: u64, now: DateTime<Utc>) -> Option<i64> {
    if creation_timestamp == 0 {
        return None;
    }
    let created = i64::try_from(creation_timestamp).ok()?;
    now.timestamp().checked_sub(created)
}

/// Contract có tuổi dưới 7 ngày không. Thời điểm tạo không rõ thì trả về false.
pub fn is_new_contract(creation_timestamp: u64, now: DateTime<Utc>) -> bool {
    contract_age_secs(creation_timestamp, now).map_or(false, |age| age < NEW_CONTRACT_AGE_SECS)
}
