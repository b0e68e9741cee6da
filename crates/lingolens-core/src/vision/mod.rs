//! Vision adapters: object localization, scene description, object
//! listing, and the orchestrator that combines them.

pub(crate) mod analyzer;
pub(crate) mod describe;
pub(crate) mod detector;
pub(crate) mod objects;

pub use analyzer::{FixedSelector, ImageAnalyzer, ObjectSelector, RandomSelector};
pub use describe::describe_scene;
pub use detector::{best_box, BoundingBox, Detection, HttpDetector, ObjectDetector};
pub use objects::list_objects;
