use std::sync::Arc;

use tokio::sync::Mutex;

use soraya_desktop::session::Session;

pub struct DesktopState {
    pub session: Arc<Mutex<Session>>,
}

impl DesktopState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}
