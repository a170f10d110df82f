pub mod accelerated;
pub mod aligned;
pub mod convolution;
pub mod edges;
pub mod filter;
pub mod grayscale;
pub mod grid;
pub mod magnitude;
pub mod quantize;
