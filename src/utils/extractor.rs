//! 路径参数安全提取器
//!
//! 非法或非正的 ID 在进入服务层之前就以统一的 400 响应拒绝。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_id_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    let parsed = req
                        .match_info()
                        .get($param)
                        .and_then(|raw| raw.parse::<i64>().ok())
                        .filter(|id| *id > 0);

                    ready(match parsed {
                        Some(id) => Ok($name(id)),
                        None => {
                            let response = HttpResponse::BadRequest().json(
                                ApiResponse::error_empty(
                                    ErrorCode::ValidationFailed,
                                    concat!("Invalid path parameter: ", $param),
                                ),
                            );
                            Err(InternalError::from_response(
                                actix_web::error::ErrorBadRequest(concat!(
                                    "invalid ",
                                    $param
                                )),
                                response,
                            )
                            .into())
                        }
                    })
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeIDI64 => "id",
    SafeCourseIdI64 => "course_id",
    SafeLessonIdI64 => "lesson_id",
    SafeAssignmentIdI64 => "assignment_id",
    SafeSubmissionIdI64 => "submission_id",
    SafeLearnerIdI64 => "learner_id",
}
