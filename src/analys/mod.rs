//! Module analys
//!
//! Module này chịu trách nhiệm phân tích rủi ro token, bao gồm:
//! - Token analysis: phân tích tĩnh source code của contract
//! - Risk analysis: tổng hợp red flag, chấm điểm và khuyến nghị

pub mod token_status;
pub mod risk_analyzer;
