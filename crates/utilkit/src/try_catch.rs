//! Result-wrapping execution guard.
//!
//! [`try_catch`] runs a callable exactly once and folds every way it can fail
//! (an `Err` return or a panic) into a single error type carrying a message,
//! a numeric status and an optional cause. The error type is pluggable through
//! the [`ErrorClass`] trait; [`StatusError`] is the default.
//!
//! Panics are captured with `catch_unwind`, so they only become errors when
//! the panic strategy is `unwind`. The process-wide panic hook still runs
//! before the panic is caught, and the default hook prints the usual
//! `thread '...' panicked at ...` message to stderr even though the failure
//! comes back as an `Err`. Install a quieter hook with
//! [`std::panic::set_hook`] if that output is unwanted.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use serde_json::Value;

use crate::is::coerce_string;

/// Any caught failure.
pub type Thrown = Box<dyn StdError + Send + Sync + 'static>;

/// Options for [`try_catch_with`] and [`try_catch_async_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryCatchOptions {
    /// Status assigned when the failure carries none (or carries `0`).
    pub default_status: u16,
}

impl Default for TryCatchOptions {
    fn default() -> Self {
        Self {
            default_status: 500,
        }
    }
}

/// An error type that failures can be normalized into.
pub trait ErrorClass: StdError + Send + Sync + Sized + 'static {
    fn construct(message: String, status: u16, cause: Option<Thrown>) -> Self;
}

/// Default error type: a message, an optional status and an optional cause.
#[derive(Debug)]
pub struct StatusError {
    message: String,
    status: Option<u16>,
    cause: Option<Thrown>,
}

impl StatusError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            cause: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_cause(mut self, cause: impl Into<Thrown>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn into_parts(self) -> (String, Option<u16>, Option<Thrown>) {
        (self.message, self.status, self.cause)
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for StatusError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl ErrorClass for StatusError {
    fn construct(message: String, status: u16, cause: Option<Thrown>) -> Self {
        Self {
            message,
            status: Some(status),
            cause,
        }
    }
}

/// A plain value raised as a failure (a string, a number, an object...).
///
/// Its message is the loose string coercion of the value, so objects render as
/// `"[object Object]"`. An object with a numeric, non-zero `"status"` key
/// contributes that status.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrownValue(pub Value);

impl ThrownValue {
    pub fn status(&self) -> Option<u16> {
        let n = self.0.get("status")?.as_f64()?;
        if n.fract() != 0.0 || n <= 0.0 || n > f64::from(u16::MAX) {
            return None;
        }
        Some(n as u16)
    }
}

impl From<Value> for ThrownValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for ThrownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&coerce_string(&self.0))
    }
}

impl StdError for ThrownValue {}

fn panic_to_thrown(payload: Box<dyn std::any::Any + Send>) -> Thrown {
    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    };
    Box::new(ThrownValue(Value::String(message)))
}

fn normalize<E: ErrorClass>(thrown: Thrown, options: &TryCatchOptions) -> E {
    let thrown = match thrown.downcast::<E>() {
        Ok(err) => return *err,
        Err(other) => other,
    };

    let (message, status, cause) = match thrown.downcast::<ThrownValue>() {
        Ok(value) => (value.to_string(), value.status(), None),
        Err(other) => match other.downcast::<StatusError>() {
            Ok(err) => err.into_parts(),
            Err(foreign) => {
                let cause = foreign
                    .source()
                    .map(|source| Box::new(StatusError::new(source.to_string())) as Thrown);
                (foreign.to_string(), None, cause)
            }
        },
    };

    let status = status
        .filter(|s| *s != 0)
        .unwrap_or(options.default_status);
    tracing::debug!(status, %message, "callable failed");
    E::construct(message, status, cause)
}

/// Run `f` and fold any failure into a [`StatusError`].
///
/// # Examples
///
/// ```
/// use utilkit::try_catch::try_catch;
///
/// let ok = try_catch(|| Ok::<_, std::io::Error>(21 * 2));
/// assert_eq!(ok.unwrap(), 42);
///
/// let err = try_catch(|| -> Result<(), &str> { Err("boom") }).unwrap_err();
/// assert_eq!(err.message(), "boom");
/// assert_eq!(err.status(), Some(500));
/// ```
pub fn try_catch<T, X, F>(f: F) -> Result<T, StatusError>
where
    F: FnOnce() -> Result<T, X>,
    X: Into<Thrown>,
{
    try_catch_with(f, TryCatchOptions::default())
}

/// Run `f` and fold any failure into `E`.
///
/// A failure that already is an `E` is returned as-is. A panic in `f` is
/// returned as an error too, but the panic hook reports it first (see the
/// module docs).
///
/// # Examples
///
/// ```
/// use std::panic;
/// use utilkit::try_catch::{try_catch_with, StatusError, TryCatchOptions};
///
/// let previous = panic::take_hook();
/// panic::set_hook(Box::new(|_| {}));
/// let options = TryCatchOptions { default_status: 503 };
/// let err: StatusError = try_catch_with(|| -> Result<(), &str> { panic!("quiet") }, options).unwrap_err();
/// panic::set_hook(previous);
///
/// assert_eq!(err.message(), "quiet");
/// assert_eq!(err.status(), Some(503));
/// ```
pub fn try_catch_with<E, T, X, F>(f: F, options: TryCatchOptions) -> Result<T, E>
where
    E: ErrorClass,
    F: FnOnce() -> Result<T, X>,
    X: Into<Thrown>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(normalize(err.into(), &options)),
        Err(payload) => Err(normalize(panic_to_thrown(payload), &options)),
    }
}

/// Asynchronous counterpart of [`try_catch`].
///
/// Panics raised while creating or polling the future are captured too.
pub async fn try_catch_async<T, X, F, Fut>(f: F) -> Result<T, StatusError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, X>>,
    X: Into<Thrown>,
{
    try_catch_async_with(f, TryCatchOptions::default()).await
}

/// Asynchronous counterpart of [`try_catch_with`].
pub async fn try_catch_async_with<E, T, X, F, Fut>(f: F, options: TryCatchOptions) -> Result<T, E>
where
    E: ErrorClass,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, X>>,
    X: Into<Thrown>,
{
    let fut = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(fut) => fut,
        Err(payload) => return Err(normalize(panic_to_thrown(payload), &options)),
    };
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(normalize(err.into(), &options)),
        Err(payload) => Err(normalize(panic_to_thrown(payload), &options)),
    }
}
