// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Demo credentials: API key comparison and a hardcoded user directory.
//!
//! None of this is a real identity system. The directory stands in for
//! whatever upstream session layer would attach a user to the request.

use serde::Serialize;
use std::collections::HashMap;

/// Header carrying the demo API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header naming the demo user.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Compare two secrets without short-circuiting on the first differing byte.
///
/// Lengths are not hidden.
pub fn secure_compare(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
    let (a, b) = (a.as_ref(), b.as_ref());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// A demo user attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Fixed lookup table of demo users.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    /// The two demo accounts: an ordinary user and an administrator.
    pub fn demo() -> Self {
        let users = [
            User {
                id: "demo123".to_string(),
                email: "demo@example.com".to_string(),
                roles: vec!["user".to_string()],
            },
            User {
                id: "admin001".to_string(),
                email: "admin@example.com".to_string(),
                roles: vec!["admin".to_string()],
            },
        ];

        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }
}

/// A record in the demo dataset. The API key must never leave the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: u32,
    pub email: String,
    pub api_key: String,
}

/// What the protected endpoint is allowed to return for an account.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PublicAccount {
    pub id: u32,
    pub email: String,
}

impl From<&AccountRecord> for PublicAccount {
    fn from(record: &AccountRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
        }
    }
}

/// The demo dataset shared by the secure and vulnerable endpoints.
pub fn demo_accounts() -> Vec<AccountRecord> {
    vec![
        AccountRecord {
            id: 1,
            email: "alice@example.com".to_string(),
            api_key: "sk_123".to_string(),
        },
        AccountRecord {
            id: 2,
            email: "bob@example.com".to_string(),
            api_key: "sk_456".to_string(),
        },
    ]
}
