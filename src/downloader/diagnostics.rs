// Failure diagnostics - classifies extractor error text
//
// yt-dlp only reports failures as free text, so the classification is a
// substring match over the message. Kept pure so it can be swapped for a
// structured code if the extractor ever exposes one.

use serde::{Deserialize, Serialize};

/// Known reasons an extraction or download can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Site asked to prove the client is human
    BotDetection,

    /// 429 / too many requests
    RateLimited,

    /// Age gate, private or members-only content
    Restricted,

    /// Deleted, removed or otherwise unavailable video
    Unavailable,

    /// Nothing matched the format expression
    UnsupportedFormat,

    /// Network or process timeout
    Timeout,
}

impl FailureKind {
    /// Fixed user-facing explanation
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BotDetection => {
                "YouTube is asking to confirm this is not a bot. \
                 Please wait a few minutes and try again, or try a different video."
            }
            Self::RateLimited => {
                "Too many requests were sent to the video site. Please wait a while and try again."
            }
            Self::Restricted => {
                "This video is age-restricted or private and cannot be downloaded."
            }
            Self::Unavailable => {
                "This video is unavailable. It may have been removed or made private."
            }
            Self::UnsupportedFormat => {
                "No downloadable format is available for this video at the supported quality."
            }
            Self::Timeout => "The request timed out. Please check the URL and try again.",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BotDetection => "Bot detection triggered",
            Self::RateLimited => "Rate limited",
            Self::Restricted => "Age-restricted or private content",
            Self::Unavailable => "Video unavailable",
            Self::UnsupportedFormat => "Requested format not available",
            Self::Timeout => "Timeout",
        }
    }
}

const BOT_PATTERNS: &[&str] = &[
    "sign in to confirm",
    "not a bot",
    "captcha",
    "unusual traffic",
];

const RATE_LIMIT_PATTERNS: &[&str] = &["429", "too many requests", "rate limit"];

const RESTRICTED_PATTERNS: &[&str] = &[
    "age-restricted",
    "age restricted",
    "inappropriate for some users",
    "private video",
    "video is private",
    "members-only",
    "members only",
];

const UNAVAILABLE_PATTERNS: &[&str] = &[
    "video unavailable",
    "is not available",
    "has been removed",
    "no longer available",
];

const FORMAT_PATTERNS: &[&str] = &[
    "requested format is not available",
    "no video formats found",
];

const TIMEOUT_PATTERNS: &[&str] = &["timed out", "timeout"];

/// Analyze an error message and return the failure kind, if recognised.
///
/// Order matters: "Sign in to confirm your age" is reported as bot detection
/// because the bot check runs first, and "Requested format is not available"
/// must be tested before the generic "is not available".
pub fn diagnose_error(error: &str) -> Option<FailureKind> {
    let lower = error.to_lowercase();
    let matches = |patterns: &[&str]| patterns.iter().any(|p| lower.contains(p));

    if matches(BOT_PATTERNS) {
        return Some(FailureKind::BotDetection);
    }
    if matches(RATE_LIMIT_PATTERNS) {
        return Some(FailureKind::RateLimited);
    }
    if matches(RESTRICTED_PATTERNS) {
        return Some(FailureKind::Restricted);
    }
    if matches(FORMAT_PATTERNS) {
        return Some(FailureKind::UnsupportedFormat);
    }
    if matches(UNAVAILABLE_PATTERNS) {
        return Some(FailureKind::Unavailable);
    }
    if matches(TIMEOUT_PATTERNS) {
        return Some(FailureKind::Timeout);
    }

    None
}
