pub mod essay;
pub mod task;
pub mod university;
