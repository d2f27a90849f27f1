//! Success envelope for handler payloads.
//!
//! Successful planning, analytics, production-run and spool responses wrap
//! their payload in `data`; failures use the `{ error, code }` body built by
//! [`crate::error::AppError`].

use serde::Serialize;

/// `{ "data": T }` wrapper returned by every successful `/api/v1` handler.
///
/// ```ignore
/// Ok(Json(DataResponse { data: stats }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
