mod predict;
mod serve;

pub use predict::handle_predict;
pub use serve::handle_serve;
