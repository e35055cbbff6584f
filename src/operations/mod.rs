pub mod add;
pub mod query;
pub mod report;
pub mod series;
pub mod view;
