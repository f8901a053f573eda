pub mod meal;
pub mod payment;
pub mod requested_meal;
pub mod review;
pub mod role;
pub mod user;

pub use meal::{Meal, UpcomingMeal};
pub use payment::Payment;
pub use requested_meal::{MealRef, RequestStatus, RequestedMeal};
pub use review::Review;
pub use role::{Permissions, Role};
pub use user::{User, UserRef};
