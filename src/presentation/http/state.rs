use std::sync::Arc;

use crate::{
    application::submit_contact::use_case::SubmitContactUseCase, config::Config,
    infrastructure::mail::traits::Mailer,
};

#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub submit: Arc<SubmitContactUseCase>,
    pub config: Config,
}
