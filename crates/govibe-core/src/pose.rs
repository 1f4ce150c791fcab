//! Bridge to the hosted pose-tracking widget.
//!
//! The widget runs in an embedded browser and posts plain strings back to
//! the host: camera permission notices, form warnings, and JSON progress
//! messages. [`PoseMessage::parse`] turns one posted string into something
//! the challenge screen can act on.

use serde::Deserialize;
use url::Url;

use crate::config::PoseTrackerConfig;
use crate::error::{ConfigError, CoreError, ValidationError};
use crate::exercise::{Difficulty, ExerciseKind};

const FORM_WARNING_MARKERS: [&str; 2] = ["user is not in the detection frame", "incorrect form"];

/// Text shown when the widget reports a form problem.
pub const FORM_WARNING_TEXT: &str = "The exercise is not performed correctly.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoseMessage {
    CameraGranted,
    CameraDenied,
    /// Absolute repetition count so far.
    Counter(u32),
    /// Whether the user is in position to start.
    Posture { ready: bool },
    /// Movement not performed correctly; carries the raw text.
    FormWarning(String),
    /// Anything else, kept for display.
    Info(String),
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    current_count: Option<u32>,
    #[serde(default)]
    ready: Option<bool>,
}

impl PoseMessage {
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if FORM_WARNING_MARKERS.iter().any(|m| text.contains(m)) {
            return PoseMessage::FormWarning(text.to_string());
        }
        match text {
            "Camera access granted" => return PoseMessage::CameraGranted,
            "Camera access denied" => return PoseMessage::CameraDenied,
            _ => {}
        }
        if let Ok(msg) = serde_json::from_str::<RawMessage>(text) {
            match (msg.kind.as_str(), msg.current_count, msg.ready) {
                ("counter", Some(n), _) => return PoseMessage::Counter(n),
                ("posture", _, Some(ready)) => return PoseMessage::Posture { ready },
                _ => {}
            }
        }
        PoseMessage::Info(text.to_string())
    }
}

/// Build the widget URL for one exercise.
///
/// # Errors
/// Fails for exercises the widget cannot count, or a bad base URL.
pub fn tracking_url(
    config: &PoseTrackerConfig,
    exercise: ExerciseKind,
    difficulty: Difficulty,
) -> Result<Url, CoreError> {
    if !exercise.supports_pose_tracking() {
        return Err(ValidationError::InvalidValue {
            field: "exercise".into(),
            message: format!("{} cannot be pose-tracked", exercise.label()),
        }
        .into());
    }
    let mut url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidValue {
        key: "pose_tracker.base_url".into(),
        message: e.to_string(),
    })?;
    url.query_pairs_mut()
        .append_pair("token", &config.token)
        .append_pair("exercise", exercise.as_str())
        .append_pair("difficulty", difficulty.as_str())
        .append_pair("width", &config.width.to_string())
        .append_pair("height", &config.height.to_string())
        .append_pair("progression", "true");
    Ok(url)
}
