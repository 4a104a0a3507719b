pub mod auth;
pub mod records;

pub use self::auth::model::LoginRequest;
pub use self::records::model::ListResponse;
