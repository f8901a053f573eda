pub mod auth;
pub mod dao;
pub mod stripe;

pub use auth::AuthService;
pub use dao::*;
pub use stripe::StripeService;
