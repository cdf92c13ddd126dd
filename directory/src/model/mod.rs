pub mod person;
pub mod seed;
pub mod statement;
