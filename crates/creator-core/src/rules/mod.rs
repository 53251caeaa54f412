pub mod email;
pub mod password;
pub mod violation;

pub use email::{check_email, is_email_shape, validate_email};
pub use password::{check_password, MAX_PASSWORD_CHARS, MIN_PASSWORD_CHARS};
pub use violation::{FieldViolation, Rule};
