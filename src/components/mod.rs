pub mod swatch;
