pub mod credential;
pub mod worker;
