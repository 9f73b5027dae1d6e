pub mod face_observation;
pub mod image_orientation;
pub mod landmark_detector;
