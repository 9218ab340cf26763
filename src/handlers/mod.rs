pub mod meals;
pub mod users;
