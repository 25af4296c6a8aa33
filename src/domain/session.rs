use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn toggled(self) -> Self {
        match self {
            Role::Admin => Role::Customer,
            Role::Customer => Role::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Customer => write!(f, "CUSTOMER"),
        }
    }
}

/// The single active actor. There are exactly two fixed identities and no
/// persistence; a restart always begins as the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub actor_id: String,
    pub actor_name: String,
    pub role: Role,
}

impl SessionContext {
    pub fn customer() -> Self {
        Self {
            actor_id: "customer1".to_string(),
            actor_name: "John Doe".to_string(),
            role: Role::Customer,
        }
    }

    pub fn admin() -> Self {
        Self {
            actor_id: "admin1".to_string(),
            actor_name: "Admin User".to_string(),
            role: Role::Admin,
        }
    }

    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::admin(),
            Role::Customer => Self::customer(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::customer()
    }
}
