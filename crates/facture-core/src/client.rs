//! # Client Records
//!
//! The client-management collaborator's record type. A `Client` is only
//! used to pre-fill a new document's client snapshot at creation time -
//! documents never keep a live reference to it, so renaming a client later
//! does not rewrite issued invoices.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Client {
            id: Uuid::new_v4(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            address: String::new(),
        }
    }

    /// Two-letter initials for avatar display: "John Smith" → "JS".
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        match (words.next(), words.next()) {
            (Some(first), Some(second)) => first
                .chars()
                .take(1)
                .chain(second.chars().take(1))
                .collect::<String>()
                .to_uppercase(),
            (Some(first), None) => first.chars().take(2).collect::<String>().to_uppercase(),
            _ => String::new(),
        }
    }
}
