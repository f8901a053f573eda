use hostelmate_config::Settings;
use hostelmate_services::{
    AuthService, StripeService,
    dao::{
        meal::MealDao, payment::PaymentDao, requested_meal::RequestedMealDao, review::ReviewDao,
        upcoming::UpcomingMealDao, user::UserDao,
    },
};
use mongodb::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub stripe: Arc<StripeService>,
    pub users: Arc<UserDao>,
    pub meals: Arc<MealDao>,
    pub upcoming: Arc<UpcomingMealDao>,
    pub reviews: Arc<ReviewDao>,
    pub requests: Arc<RequestedMealDao>,
    pub payments: Arc<PaymentDao>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        let auth = Arc::new(AuthService::new(settings.jwt.clone()));
        let stripe = Arc::new(StripeService::new(&settings.stripe));
        let users = Arc::new(UserDao::new(&db));
        let meals = Arc::new(MealDao::new(&db));
        let upcoming = Arc::new(UpcomingMealDao::new(&db));
        let reviews = Arc::new(ReviewDao::new(&db));
        let requests = Arc::new(RequestedMealDao::new(&db));
        let payments = Arc::new(PaymentDao::new(&db));

        Self {
            db,
            settings,
            auth,
            stripe,
            users,
            meals,
            upcoming,
            reviews,
            requests,
            payments,
        }
    }
}
