pub mod upload_error;
pub mod upload_guard;
pub mod upload_store;
