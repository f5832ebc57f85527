pub mod analytics;
pub mod calendar;
pub mod resolver;
