use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Stored as a lowercase string on the user document. Anything other than
/// `admin` reads back as a plain user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u32 {
        const MANAGE_MEALS = 1 << 0;
        const MANAGE_USERS = 1 << 1;
        const MANAGE_REVIEWS = 1 << 2;
        const SERVE_MEALS = 1 << 3;
        const VIEW_PAYMENTS = 1 << 4;
    }
}

impl Role {
    pub fn permissions(self) -> Permissions {
        match self {
            Role::Admin => Permissions::all(),
            Role::User => Permissions::empty(),
        }
    }

    pub fn can(self, permission: Permissions) -> bool {
        self.permissions().contains(permission)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}
