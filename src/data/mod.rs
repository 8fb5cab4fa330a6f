pub mod launcher;
pub mod scanner;
pub mod store;
pub mod terminals;
