pub mod circuit;
pub mod codec;
pub mod gate;
pub mod noise;
pub mod shor;
pub mod syndrome;
