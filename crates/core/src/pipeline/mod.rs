pub mod classification_service;
pub mod classify_video_use_case;
pub mod extract_frames_use_case;
pub mod pipeline_logger;
