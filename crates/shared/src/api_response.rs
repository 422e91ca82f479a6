//! # API レスポンスエンベロープ
//!
//! 内部 API の統一レスポンス形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 内部 API の統一レスポンス型
///
/// 成功レスポンスはすべて `{ "data": T }` 形式で返す。
/// エラーは RFC 7807 形式（core-service の `CoreError`）で返すため、この型は使わない。
///
/// ## 使用例
///
/// ```
/// use askflow_shared::ApiResponse;
///
/// let response = ApiResponse::new(3_i64);
/// assert_eq!(response.data, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
