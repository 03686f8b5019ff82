// THEORY:
// The `ColorKey` is the most fundamental unit of the engine. It is a "dumb" value
// holding one RGBA color exactly as it appears in a decoded map or swatch image.
//
// Key architectural principles:
// 1.  **Equality Only**: A coverage map encodes ownership by exact color. The key is
//     compared and hashed, never blended, averaged or measured. Two colors that
//     differ by one unit in one channel are unrelated keys.
// 2.  **Typed In Memory, Textual At Rest**: Legends are persisted with keys written
//     as tuples like `(10, 20, 30, 255)`. That text form exists only at the storage
//     boundary (`Display`, `FromStr`, serde); everything in memory uses the struct.
// 3.  **Image Interop**: Conversions from `image::Rgba<u8>` and raw 4-byte slices
//     let any decoded raster feed the resolver without a copy of the whole image.

use crate::error::ColorKeyError;
use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub type Channel = u8;

const CHANNELS: usize = 4;

/// A single RGBA color used as an exact-match legend key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColorKey {
    /// The red channel value (0-255).
    pub red: Channel,
    /// The green channel value (0-255).
    pub green: Channel,
    /// The blue channel value (0-255).
    pub blue: Channel,
    /// The alpha (transparency) channel value (0-255).
    pub alpha: Channel,
}

impl ColorKey {
    pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Fully opaque color.
    pub const fn opaque(red: Channel, green: Channel, blue: Channel) -> Self {
        Self::new(red, green, blue, Channel::MAX)
    }

    pub const fn channels(&self) -> [Channel; CHANNELS] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl From<[Channel; CHANNELS]> for ColorKey {
    fn from([red, green, blue, alpha]: [Channel; CHANNELS]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

impl From<Rgba<Channel>> for ColorKey {
    fn from(pixel: Rgba<Channel>) -> Self {
        Self::from(pixel.0)
    }
}

impl From<&Rgba<Channel>> for ColorKey {
    fn from(pixel: &Rgba<Channel>) -> Self {
        Self::from(pixel.0)
    }
}

impl From<ColorKey> for Rgba<Channel> {
    fn from(key: ColorKey) -> Self {
        Rgba(key.channels())
    }
}

impl TryFrom<&[Channel]> for ColorKey {
    type Error = ColorKeyError;

    fn try_from(bytes: &[Channel]) -> Result<Self, Self::Error> {
        let channels: [Channel; CHANNELS] = bytes
            .try_into()
            .map_err(|_| ColorKeyError::ChannelCount { found: bytes.len() })?;
        Ok(Self::from(channels))
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl FromStr for ColorKey {
    type Err = ColorKeyError;

    /// Parses the persisted tuple form, e.g. `(10, 20, 30, 255)` or `10,20,30,255`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let inner = text
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');

        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != CHANNELS {
            return Err(ColorKeyError::ChannelCount { found: parts.len() });
        }

        let mut channels = [0 as Channel; CHANNELS];
        for (index, part) in parts.iter().enumerate() {
            let part = part.trim();
            let value: i64 = part.parse().map_err(|_| ColorKeyError::NotAnInteger {
                index,
                value: part.to_string(),
            })?;
            channels[index] = Channel::try_from(value)
                .map_err(|_| ColorKeyError::OutOfRange { index, value })?;
        }

        Ok(Self::from(channels))
    }
}

impl Serialize for ColorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
