//! Exercise catalog shown on the home screen.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Squat,
    Pushup,
    Running,
    Yoga,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 4] = [
        ExerciseKind::Squat,
        ExerciseKind::Pushup,
        ExerciseKind::Running,
        ExerciseKind::Yoga,
    ];

    /// Name sent to the backend and to the pose-tracking widget.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::Pushup => "pushup",
            ExerciseKind::Running => "running",
            ExerciseKind::Yoga => "yoga",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "Squat",
            ExerciseKind::Pushup => "Push-up",
            ExerciseKind::Running => "Running",
            ExerciseKind::Yoga => "Yoga",
        }
    }

    /// Only squats and push-ups can be counted by the pose widget.
    pub fn supports_pose_tracking(&self) -> bool {
        matches!(self, ExerciseKind::Squat | ExerciseKind::Pushup)
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExerciseKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "squat" => Ok(ExerciseKind::Squat),
            "pushup" => Ok(ExerciseKind::Pushup),
            "running" => Ok(ExerciseKind::Running),
            "yoga" => Ok(ExerciseKind::Yoga),
            other => Err(ValidationError::InvalidValue {
                field: "exercise".into(),
                message: format!("unknown exercise '{other}'"),
            }),
        }
    }
}

/// Difficulty level passed to the pose widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ValidationError::InvalidValue {
                field: "difficulty".into(),
                message: format!("unknown difficulty '{other}'"),
            }),
        }
    }
}
