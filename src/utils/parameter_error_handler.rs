//! 请求参数解析失败时的统一响应
//!
//! 与业务错误保持一致，返回 400 和 `{"success": false}`。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::warn;

use crate::models::SuccessResponse;

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    warn!("Invalid JSON payload for {}: {}", req.path(), err);
    InternalError::from_response(err, HttpResponse::BadRequest().json(SuccessResponse::failed()))
        .into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    warn!("Invalid query parameters for {}: {}", req.path(), err);
    InternalError::from_response(err, HttpResponse::BadRequest().json(SuccessResponse::failed()))
        .into()
}
