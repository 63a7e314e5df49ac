pub mod animation;
pub mod ballistics;
pub mod compose;
pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod render;
pub mod scene;
pub mod scheduler;
pub mod session;
pub mod trajectory;
pub mod window;
