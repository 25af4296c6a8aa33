use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Customer,
    Admin,
}

impl UserKind {
    fn slug(self) -> &'static str {
        match self {
            UserKind::Customer => "customer",
            UserKind::Admin => "admin",
        }
    }

    fn title(self) -> &'static str {
        match self {
            UserKind::Customer => "Customer",
            UserKind::Admin => "Admin",
        }
    }
}

/// One entry of the `POST /admin/users` batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl NewUser {
    /// Builds `count` generated users; `stamp` keeps ids unique across batches.
    pub fn batch(kind: UserKind, count: u32, stamp: i64) -> Vec<NewUser> {
        (1..=count)
            .map(|i| NewUser {
                user_id: format!("{}{}_{}", kind.slug(), stamp, i),
                name: format!("{} User {}", kind.title(), i),
                email: format!("{}{}@example.com", kind.slug(), i),
                role: kind.slug().to_uppercase(),
                // Assigned by the server.
                created_at: String::new(),
            })
            .collect()
    }
}
