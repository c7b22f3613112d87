pub mod asset_scanner;
pub mod category;
pub mod image_optimizer;
pub mod menu_builder;
pub mod slug;
