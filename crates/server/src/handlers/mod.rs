pub mod batch_predict;
pub mod health;
pub mod predict;
mod upload;
