use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::User;

/// The authenticated identity a request acts as. Resolved once by the auth
/// middleware and passed explicitly to every task operation; nothing in the
/// core reads ambient request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caller {
    pub id: Uuid,
    pub is_superuser: bool,
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Caller {
            id: user.id,
            is_superuser: user.is_superuser,
        }
    }
}
