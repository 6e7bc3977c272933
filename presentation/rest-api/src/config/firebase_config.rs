/// Firebase project whose ID tokens are accepted as bearer tokens.
pub struct FirebaseConfig {
    pub project_id: String,
}

impl FirebaseConfig {
    /// Reads `FIREBASE_PROJECT_ID`; `None` when unset or blank, in which case
    /// every bearer token is rejected.
    pub fn from_env() -> Option<Self> {
        std::env::var("FIREBASE_PROJECT_ID")
            .ok()
            .filter(|id| !id.trim().is_empty())
            .map(|project_id| Self { project_id })
    }
}
