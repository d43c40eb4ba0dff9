//! Shared validation helpers for inbound HTTP adapters.
//!
//! Malformed identifiers and unreadable payloads are `invalid_request` (400);
//! readable payloads with missing, mistyped or out-of-rule fields are
//! `validation_failed` (422).

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::json;

use crate::domain::{
    Error, HunterId, HunterName, QuestDate, WorkoutMinutes, WorkoutType, WorkoutValidationError,
};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidDate,
    EmptyValue,
    OutOfRange,
    MalformedBody,
    MalformedQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::EmptyValue => "empty_value",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::MalformedQuery => "malformed_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("user_id");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const WORKOUT_TYPE: FieldName = FieldName::new("workout_type");
pub(crate) const MINUTES: FieldName = FieldName::new("minutes");
pub(crate) const DATE: FieldName = FieldName::new("date");

fn field_details(field: FieldName, code: ErrorCode) -> serde_json::Value {
    json!({
        "field": field.as_str(),
        "code": code.as_str(),
    })
}

/// Parse a hunter id, answering 400 "Invalid user id" when malformed.
pub(crate) fn parse_hunter_id(raw: &str) -> Result<HunterId, Error> {
    HunterId::parse(raw).map_err(|_| {
        Error::invalid_request("Invalid user id").with_details(json!({
            "field": USER_ID.as_str(),
            "value": raw,
            "code": ErrorCode::InvalidUuid.as_str(),
        }))
    })
}

pub(crate) fn parse_hunter_name(raw: String) -> Result<HunterName, Error> {
    HunterName::new(raw).map_err(|err| {
        Error::validation_failed(err.to_string()).with_details(field_details(NAME, ErrorCode::EmptyValue))
    })
}

pub(crate) fn parse_workout_type(raw: String) -> Result<WorkoutType, Error> {
    WorkoutType::new(raw).map_err(map_workout_validation_error)
}

pub(crate) fn parse_minutes(raw: i64) -> Result<WorkoutMinutes, Error> {
    WorkoutMinutes::new(raw).map_err(map_workout_validation_error)
}

fn map_workout_validation_error(err: WorkoutValidationError) -> Error {
    let details = match &err {
        WorkoutValidationError::MinutesOutOfRange { min, max, actual } => json!({
            "field": MINUTES.as_str(),
            "code": ErrorCode::OutOfRange.as_str(),
            "min": min,
            "max": max,
            "value": actual,
        }),
        WorkoutValidationError::EmptyWorkoutType => {
            field_details(WORKOUT_TYPE, ErrorCode::EmptyValue)
        }
    };
    Error::validation_failed(err.to_string()).with_details(details)
}

pub(crate) fn parse_optional_quest_date(raw: Option<&str>) -> Result<Option<QuestDate>, Error> {
    raw.map(|value| {
        value.parse::<QuestDate>().map_err(|err| {
            Error::validation_failed(err.to_string()).with_details(json!({
                "field": DATE.as_str(),
                "value": value,
                "code": ErrorCode::InvalidDate.as_str(),
            }))
        })
    })
    .transpose()
}

/// Turn JSON extractor failures into error responses.
///
/// Bodies that parse as JSON but do not fit the payload shape are
/// `validation_failed`; everything else is `invalid_request`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    json_payload_error(&err).into()
}

fn json_payload_error(err: &JsonPayloadError) -> Error {
    let details = json!({ "code": ErrorCode::MalformedBody.as_str() });
    match err {
        JsonPayloadError::Deserialize(inner) if inner.is_data() => {
            Error::validation_failed(format!("invalid JSON body: {inner}")).with_details(details)
        }
        other => Error::invalid_request(format!("invalid JSON body: {other}")).with_details(details),
    }
}

/// Turn query string extractor failures into `validation_failed` responses.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    query_payload_error(&err).into()
}

fn query_payload_error(err: &QueryPayloadError) -> Error {
    Error::validation_failed(format!("invalid query string: {err}"))
        .with_details(json!({ "code": ErrorCode::MalformedQuery.as_str() }))
}
