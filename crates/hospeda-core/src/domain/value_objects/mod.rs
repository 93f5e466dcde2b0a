//! Value objects shared by the domain entities.

mod email;
mod location;
mod property_kind;
mod role;
mod status;

pub use email::{Email, EmailError};
pub use location::Location;
pub use property_kind::PropertyKind;
pub use role::{Permission, UserRole};
pub use status::{AccountStatus, BookingStatus};
