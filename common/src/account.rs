// account.rs

/// Zeroed account data has never been written by `Init`.
pub fn is_initialized(data: &[u8]) -> bool {
    data.iter().any(|&b| b != 0)
}
