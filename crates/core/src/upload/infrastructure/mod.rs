pub mod local_upload_store;
