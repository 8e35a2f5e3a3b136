pub mod hud;
pub mod labels;
pub mod menu;
