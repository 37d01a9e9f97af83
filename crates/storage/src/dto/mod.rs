pub mod athlete;
pub mod category;
pub mod common;
pub mod patch;
pub mod training_center;
