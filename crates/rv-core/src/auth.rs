//! Mock authentication against a fixed in-memory credential list.
//!
//! There are no tokens and no persistence: the signed-in user lives only as
//! long as the `AuthState` that holds it.

use crate::notice::{Notice, Notices};
use serde::Serialize;

/// A signed-in user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: &'static str,
    pub username: &'static str,
    pub name: &'static str,
}

struct Credential {
    user: User,
    password: &'static str,
}

static CREDENTIALS: [Credential; 2] = [
    Credential {
        user: User {
            id: "1",
            username: "designer1",
            name: "Tharuka Muthukuda",
        },
        password: "password123",
    },
    Credential {
        user: User {
            id: "2",
            username: "designer2",
            name: "Yeshan",
        },
        password: "password123",
    },
];

#[derive(Debug, Default)]
pub struct AuthState {
    user: Option<User>,
    notices: Notices,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear scan of the credential list. On a match the user is set and
    /// `true` is returned; otherwise the state is left untouched.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        let found = CREDENTIALS
            .iter()
            .find(|c| c.user.username == username && c.password == password);

        match found {
            Some(cred) => {
                log::info!("user {} signed in", cred.user.username);
                self.notices
                    .success(format!("Welcome back, {}!", cred.user.name));
                self.user = Some(cred.user.clone());
                true
            }
            None => {
                self.notices.error("Invalid username or password");
                false
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("user {} signed out", user.username);
        }
        self.notices.info("You have been logged out");
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}
