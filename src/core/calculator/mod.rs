pub mod notifications;
pub mod payday;
pub mod salary;
