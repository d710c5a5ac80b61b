mod aggregate;
mod repository;
mod value_objects;

#[cfg(test)]
mod aggregate_test;

pub use aggregate::Account;
pub use repository::AccountRepository;
pub use value_objects::{CookieBundle, RunPolicy, ScheduleConfig};
