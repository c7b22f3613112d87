pub mod use_cases;

pub use use_cases::image_optimizer::{AutoApprove, ImageOptimizer, WriteConfirmation};
pub use use_cases::menu_builder::{MenuBuild, MenuBuilder};
