pub mod base;
pub mod meal;
pub mod payment;
pub mod requested_meal;
pub mod review;
pub mod upcoming;
pub mod user;

pub use base::BaseDao;
