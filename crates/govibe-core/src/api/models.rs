//! JSON records exchanged with the backend.
//!
//! Field names follow the backend's wire format (`prenom`/`nom` for first and
//! last name, `_id` for identifiers, camelCase elsewhere).

use serde::{Deserialize, Serialize};

/// Opaque backend-assigned user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "nom")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Body of `POST /auth/forgot-password`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
    pub password: String,
}

/// User object returned by `GET /user/{email}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(rename = "prenom", default)]
    pub first_name: String,
    #[serde(rename = "nom", default)]
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub email: String,
}

/// One completed exercise countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub name: String,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<u32>,
}

impl ExerciseRecord {
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            name: name.into(),
            user_id,
            duration: None,
            repetitions: None,
        }
    }
}

/// One completed challenge countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeParticipation {
    pub user_id: UserId,
    pub repetitions: u32,
    pub exercise: String,
    pub duration: u32,
}

/// Name fields nested in a leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantUser {
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub email: String,
}

/// Leaderboard entry from `GET /challenge-participations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: ParticipantUser,
    pub participated_at: String,
    pub repetitions: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signup_uses_backend_field_names() {
        let body = serde_json::to_value(SignupRequest {
            first_name: "Amine".into(),
            last_name: "Ben Ali".into(),
            email: "amine@example.com".into(),
            password: "abcd123!".into(),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"prenom": "Amine", "nom": "Ben Ali", "email": "amine@example.com", "password": "abcd123!"})
        );
    }

    #[test]
    fn exercise_record_omits_missing_metrics() {
        let body = serde_json::to_value(ExerciseRecord::new("pushup", UserId::new("u1"))).unwrap();
        assert_eq!(body, json!({"name": "pushup", "userId": "u1"}));

        let mut record = ExerciseRecord::new("squat", UserId::new("u1"));
        record.duration = Some(10);
        record.repetitions = Some(7);
        let body = serde_json::to_value(record).unwrap();
        assert_eq!(body["duration"], 10);
        assert_eq!(body["repetitions"], 7);
    }

    #[test]
    fn participation_is_camel_case() {
        let body = serde_json::to_value(ChallengeParticipation {
            user_id: UserId::new("abc"),
            repetitions: 12,
            exercise: "squat".into(),
            duration: 30,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"userId": "abc", "repetitions": 12, "exercise": "squat", "duration": 30})
        );
    }

    #[test]
    fn participant_decodes_backend_shape() {
        let p: Participant = serde_json::from_value(json!({
            "_id": "p1",
            "user": {"nom": "Trabelsi", "prenom": "Sara", "email": "sara@example.com", "_id": "u9"},
            "participatedAt": "2024-11-21T10:00:00.000Z",
            "repetitions": 14,
            "__v": 0
        }))
        .unwrap();
        assert_eq!(p.repetitions, 14);
        assert_eq!(p.user.first_name, "Sara");
    }

    #[test]
    fn user_profile_ignores_extra_fields() {
        let user: UserProfile = serde_json::from_value(json!({
            "_id": "abc123", "nom": "Doe", "prenom": "Jane", "email": "jane@example.com", "password": "hash"
        }))
        .unwrap();
        assert_eq!(user.id.as_str(), "abc123");
        assert_eq!(user.last_name, "Doe");
    }
}
