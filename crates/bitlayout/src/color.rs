//! Packing of four 8-bit channels into one 32-bit ARGB word.
//!
//! Bit layout: alpha in 24..=31, red in 16..=23, green in 8..=15, blue in 0..=7.

use std::{fmt, str::FromStr};

use crate::errors::ColorError;

const CHANNEL_MASK: u32 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    Alpha,
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Alpha, Channel::Red, Channel::Green, Channel::Blue];

    /// Position of the channel's lowest bit in the packed word.
    pub const fn shift(self) -> usize {
        match self {
            Channel::Alpha => 24,
            Channel::Red => 16,
            Channel::Green => 8,
            Channel::Blue => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Channel::Alpha => "alpha",
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl FromStr for Channel {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" | "a" => Ok(Channel::Alpha),
            "red" | "r" => Ok(Channel::Red),
            "green" | "g" => Ok(Channel::Green),
            "blue" | "b" => Ok(Channel::Blue),
            _ => Err(ColorError::UnknownChannel(s.to_string())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four channels of a color, each already in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelQuad {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ChannelQuad {
    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        ChannelQuad {
            alpha,
            red,
            green,
            blue,
        }
    }

    pub const fn get(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Alpha => self.alpha,
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    pub fn pack(&self) -> u32 {
        Channel::ALL
            .iter()
            .fold(0u32, |word, &channel| {
                word | (u32::from(self.get(channel)) << channel.shift())
            })
    }
}

impl From<u32> for ChannelQuad {
    fn from(word: u32) -> Self {
        unpack(word)
    }
}

impl From<ChannelQuad> for u32 {
    fn from(quad: ChannelQuad) -> Self {
        quad.pack()
    }
}

impl fmt::Display for ChannelQuad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.alpha, self.red, self.green, self.blue
        )
    }
}

fn checked_channel(value: i32) -> Result<u8, ColorError> {
    u8::try_from(value).map_err(|_| ColorError::ChannelOutOfRange(value))
}

/// Packs four channel values into an ARGB word. Fails if any value is outside `0..=255`.
pub fn pack(alpha: i32, red: i32, green: i32, blue: i32) -> Result<u32, ColorError> {
    let quad = ChannelQuad::new(
        checked_channel(alpha)?,
        checked_channel(red)?,
        checked_channel(green)?,
        checked_channel(blue)?,
    );

    Ok(quad.pack())
}

pub fn get_channel(word: u32, channel: Channel) -> u8 {
    ((word >> channel.shift()) & CHANNEL_MASK) as u8
}

pub fn unpack(word: u32) -> ChannelQuad {
    ChannelQuad::new(
        get_channel(word, Channel::Alpha),
        get_channel(word, Channel::Red),
        get_channel(word, Channel::Green),
        get_channel(word, Channel::Blue),
    )
}

/// Replaces one channel of `word`, leaving the other three untouched.
pub fn with_channel(word: u32, channel: Channel, value: u8) -> u32 {
    let shift = channel.shift();
    (word & !(CHANNEL_MASK << shift)) | (u32::from(value) << shift)
}

/// Replaces the channel called `channel_name`. Fails on an unknown name or a
/// value outside `0..=255`.
pub fn set_channel(word: u32, channel_name: &str, new_value: i32) -> Result<u32, ColorError> {
    let channel: Channel = channel_name.parse()?;
    let value = checked_channel(new_value)?;
    Ok(with_channel(word, channel, value))
}
