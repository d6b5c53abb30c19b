pub mod animation;
pub mod object;
pub mod surface;
