pub mod math;
pub mod quadtree;
pub mod scene;
pub mod time;
pub mod world;
