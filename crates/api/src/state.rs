use std::sync::Arc;

use mongodb::Database;
use pronuncia_assessment::AssessmentEngine;
use pronuncia_config::AuthSettings;
use pronuncia_services::dao::attempt::AttemptDao;
use pronuncia_services::dao::challenge::ChallengeDao;
use pronuncia_services::dao::completion::CompletionDao;
use pronuncia_services::dao::user::UserDao;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserDao>,
    pub challenges: Arc<ChallengeDao>,
    pub attempts: Arc<AttemptDao>,
    pub completions: Arc<CompletionDao>,
    pub engine: Arc<AssessmentEngine>,
    pub auth: Arc<AuthSettings>,
}

impl AppState {
    pub fn new(db: &Database, engine: Arc<AssessmentEngine>, auth: AuthSettings) -> Self {
        Self {
            users: Arc::new(UserDao::new(db)),
            challenges: Arc::new(ChallengeDao::new(db)),
            attempts: Arc::new(AttemptDao::new(db)),
            completions: Arc::new(CompletionDao::new(db)),
            engine,
            auth: Arc::new(auth),
        }
    }
}
