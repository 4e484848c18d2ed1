pub mod access_record;
pub mod user;

pub use access_record::AccessRecord;
pub use user::{User, UserStatus};
