pub mod cloud;
pub mod dom;
pub mod engine;
pub mod export;
pub mod net;
pub mod render;
pub mod text;
