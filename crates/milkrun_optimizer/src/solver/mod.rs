pub mod construction;
pub mod ls;
pub mod optimize;
pub mod solution;
