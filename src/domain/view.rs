use std::fmt;
use super::Role;

/// Named views of the dashboard. `Dashboard` is the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    BrowseCars,
    ManageCars,
    ManageUsers,
    Cart,
    Reservations,
    MyBookings,
}

/// Fetches a view runs when it is entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewEffects {
    pub cars: bool,
    pub reservations: bool,
    pub stats: bool,
    pub dashboard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTab {
    pub view: View,
    pub label: &'static str,
}

const ADMIN_TABS: [NavTab; 4] = [
    NavTab { view: View::Dashboard, label: "Dashboard" },
    NavTab { view: View::ManageCars, label: "Manage Cars" },
    NavTab { view: View::ManageUsers, label: "Manage Users" },
    NavTab { view: View::Reservations, label: "Reservations" },
];

const CUSTOMER_TABS: [NavTab; 4] = [
    NavTab { view: View::Dashboard, label: "Dashboard" },
    NavTab { view: View::BrowseCars, label: "Browse Cars" },
    NavTab { view: View::Cart, label: "My Cart" },
    NavTab { view: View::MyBookings, label: "My Bookings" },
];

impl View {
    pub const ALL: [View; 7] = [
        View::Dashboard,
        View::BrowseCars,
        View::ManageCars,
        View::ManageUsers,
        View::Cart,
        View::Reservations,
        View::MyBookings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::BrowseCars => "browse-cars",
            View::ManageCars => "manage-cars",
            View::ManageUsers => "manage-users",
            View::Cart => "cart",
            View::Reservations => "reservations",
            View::MyBookings => "my-bookings",
        }
    }

    pub fn parse(name: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Refresh-on-navigate table. Stats are admin-only, so a customer's
    /// dashboard only recomputes its summary.
    pub fn entry_effects(self, role: Role) -> ViewEffects {
        match self {
            View::BrowseCars | View::ManageCars => ViewEffects { cars: true, ..Default::default() },
            View::Reservations | View::MyBookings => {
                ViewEffects { reservations: true, ..Default::default() }
            }
            View::Dashboard => ViewEffects {
                stats: role == Role::Admin,
                dashboard: true,
                ..Default::default()
            },
            View::Cart | View::ManageUsers => ViewEffects::default(),
        }
    }

    /// Views whose car listing the poller keeps fresh.
    pub fn polls_cars(self) -> bool {
        matches!(self, View::Dashboard | View::BrowseCars | View::ManageCars)
    }

    /// Views whose reservations and stats the poller keeps fresh for admins.
    pub fn polls_admin_data(self) -> bool {
        matches!(self, View::Dashboard | View::Reservations)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn nav_tabs(role: Role) -> &'static [NavTab] {
    match role {
        Role::Admin => &ADMIN_TABS,
        Role::Customer => &CUSTOMER_TABS,
    }
}
