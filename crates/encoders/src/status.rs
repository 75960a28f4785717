//! Status and result types reported by the compressed-binary codec.

use landon_common::config::EncoderSettings;
use serde::{Deserialize, Serialize};

/// Outcome category reported by the binary codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderStatusCode {
    Ok,
    GeneralError,
    InputOutputError,
    InvalidParameter,
    UnsupportedVersion,
    UnknownVersion,
    UnsupportedFeature,
}

/// Status code plus an optional human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderStatus {
    pub code: EncoderStatusCode,
    pub error_message: Option<String>,
}

impl EncoderStatus {
    pub fn ok() -> Self {
        Self {
            code: EncoderStatusCode::Ok,
            error_message: None,
        }
    }

    pub fn error(code: EncoderStatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            error_message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == EncoderStatusCode::Ok
    }
}

impl std::fmt::Display for EncoderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_message {
            Some(message) => write!(f, "{:?}: {message}", self.code),
            None => write!(f, "{:?}", self.code),
        }
    }
}

/// What a binary codec entry point returns.
///
/// Codecs are external, so an `Ok` status is not trusted to carry data;
/// callers must check both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryEncodeResult {
    pub status: EncoderStatus,
    pub data: Option<Vec<u8>>,
}

impl BinaryEncodeResult {
    pub fn success(data: Vec<u8>) -> Self {
        Self {
            status: EncoderStatus::ok(),
            data: Some(data),
        }
    }

    pub fn failure(code: EncoderStatusCode, message: impl Into<String>) -> Self {
        Self {
            status: EncoderStatus::error(code, message),
            data: None,
        }
    }
}

/// Speed/compression trade-off forwarded to the binary codec.
///
/// Both speeds range from 0 (smallest output) to 10 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    pub encoding_speed: i32,
    pub decoding_speed: i32,
}

impl EncoderOptions {
    pub const MIN_SPEED: i32 = 0;
    pub const MAX_SPEED: i32 = 10;

    /// Build options, clamping both speeds into the supported range.
    pub fn new(encoding_speed: i32, decoding_speed: i32) -> Self {
        Self {
            encoding_speed: encoding_speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED),
            decoding_speed: decoding_speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED),
        }
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self::new(5, 5)
    }
}

impl From<EncoderSettings> for EncoderOptions {
    fn from(settings: EncoderSettings) -> Self {
        Self::new(settings.encoding_speed, settings.decoding_speed)
    }
}
