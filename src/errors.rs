//! Classification of remote platform errors.
//!
//! Action errors are never retried here (the honeypot fallback is the only
//! recovery path); classification decides the log level and gives the mod
//! team an actionable code instead of a raw HTTP body.

use std::time::Duration;

use serenity::http::HttpError;
use tracing::{debug, error, warn};

/// Discord JSON error codes we act on. Everything else is [`ApiErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// 10003: Unknown channel.
    UnknownChannel,
    /// 10007: Unknown member (left or already banned).
    UnknownMember,
    /// 10008: Unknown message (likely deleted).
    UnknownMessage,
    /// 10013: Unknown user.
    UnknownUser,
    /// 50001: Missing access.
    MissingAccess,
    /// 50013: Missing permissions.
    MissingPermissions,
    /// HTTP 429: rate limited.
    RateLimited,
    /// Network or I/O error on the client side.
    NetworkError,
    /// Any code not listed above.
    Unknown,
}

impl ApiErrorCode {
    pub fn from_raw(code: u32) -> Self {
        match code {
            10003 => Self::UnknownChannel,
            10007 => Self::UnknownMember,
            10008 => Self::UnknownMessage,
            10013 => Self::UnknownUser,
            50001 => Self::MissingAccess,
            50013 => Self::MissingPermissions,
            _ => Self::Unknown,
        }
    }

    /// Permanent errors will fail identically on retry.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::UnknownChannel
                | Self::UnknownMember
                | Self::UnknownMessage
                | Self::UnknownUser
                | Self::MissingAccess
                | Self::MissingPermissions
        )
    }
}

/// Result of classifying a platform error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorOutcome {
    /// Rate limited; the platform asks us to wait this long.
    RateLimited(Duration),
    /// Permanent failure; retrying cannot help.
    Permanent(ApiErrorCode),
    /// Transient failure; a later identical call may succeed.
    Transient(ApiErrorCode),
}

/// Classify an error from the [`crate::api::ChatApi`] seam.
///
/// The production client wraps `serenity::Error` in `anyhow` context;
/// downcasting recovers it. Errors from fakes classify as transient unknown.
pub fn classify(err: &anyhow::Error) -> ErrorOutcome {
    let Some(serenity_err) = err.downcast_ref::<serenity::Error>() else {
        return ErrorOutcome::Transient(ApiErrorCode::Unknown);
    };

    match serenity_err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)) => {
            let status = resp.status_code.as_u16();
            if status == 429 {
                // Conservative default; the real value is in the JSON body.
                return ErrorOutcome::RateLimited(Duration::from_secs(1));
            }
            let code = ApiErrorCode::from_raw(resp.error.code as u32);
            if code.is_permanent() {
                ErrorOutcome::Permanent(code)
            } else {
                ErrorOutcome::Transient(code)
            }
        }
        serenity::Error::Http(_) => ErrorOutcome::Transient(ApiErrorCode::NetworkError),
        _ => ErrorOutcome::Transient(ApiErrorCode::NetworkError),
    }
}

/// Log a platform error at the level its class deserves.
///
/// - Permanent → `error!`
/// - Rate limited → `warn!`
/// - Transient → `debug!`
pub fn log_error(context: &str, err: &anyhow::Error) {
    match classify(err) {
        ErrorOutcome::Permanent(code) => {
            error!("{} [{:?}]: {:#}", context, code, err);
        }
        ErrorOutcome::RateLimited(wait) => {
            warn!("{}: rate limited, retry after {:?}", context, wait);
        }
        ErrorOutcome::Transient(code) => {
            debug!("{} [{:?}]: {:#}", context, code, err);
        }
    }
}
