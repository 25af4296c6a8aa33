pub mod car;
pub mod reservation;
pub mod cart;
pub mod stats;
pub mod session;
pub mod view;
pub mod notification;
pub mod dashboard;
pub mod user;

pub use car::*;
pub use reservation::*;
pub use cart::*;
pub use stats::*;
pub use session::*;
pub use view::*;
pub use notification::*;
pub use dashboard::*;
pub use user::*;
