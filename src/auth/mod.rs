// Authentication: password hashing, roles, per-request sessions
mod password;
mod roles;
mod session;

pub use password::{hash_password, verify_password};
pub use roles::{Permission, Role};
pub use session::{AuthError, SessionContext, UserRecord, UserTable};
