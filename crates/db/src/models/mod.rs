pub mod region;
pub mod walk;
