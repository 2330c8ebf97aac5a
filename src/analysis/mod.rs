pub mod angle;
pub mod classifier;
pub mod counter;
pub mod handle;
pub mod history;

pub use classifier::{Classification, SquatClassifier, Zone};
pub use counter::RepCounter;
pub use handle::HandleTracker;
pub use history::BoundedHistory;
