pub mod color_key;
pub mod event_record;
pub mod legend;
pub mod pixel_buffer;
pub mod resolver;
pub mod ring;
pub mod swatch;
