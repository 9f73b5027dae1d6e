pub mod frame_dispatcher;
pub mod infrastructure;
pub mod landmark_projector;
pub mod live_overlay_use_case;
pub mod pipeline_logger;
