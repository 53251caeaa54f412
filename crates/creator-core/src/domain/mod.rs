pub mod credentials;
pub mod email;
pub mod field;

pub use credentials::{Credentials, NormalizedCredentials};
pub use email::normalize_email;
pub use field::Field;
