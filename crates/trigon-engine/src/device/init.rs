/// Requested color channel depths, in bits.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ColorBits {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for ColorBits {
    fn default() -> Self {
        Self { r: 8, g: 8, b: 8, a: 8 }
    }
}

/// Window + context creation parameters.
#[derive(Debug, Clone)]
pub struct ContextInit {
    pub title: String,

    /// Inner size in logical pixels.
    pub width: u32,
    pub height: u32,

    pub resizable: bool,

    /// Center the window on the primary monitor once it is created.
    pub centered: bool,

    /// Request a core profile (no deprecated fixed-function entry points).
    pub core_profile: bool,

    /// Minimum context version. Anything older is a setup failure.
    pub major_version: u8,
    pub minor_version: u8,

    pub color_bits: ColorBits,
    pub depth_bits: u8,
    pub stencil_bits: u8,

    /// Synchronize buffer swaps with the display refresh.
    ///
    /// This is the only pacing the frame loop gets.
    pub vsync: bool,
}

impl ContextInit {
    #[inline]
    pub fn required_version(&self) -> (u32, u32) {
        (self.major_version as u32, self.minor_version as u32)
    }
}

impl Default for ContextInit {
    fn default() -> Self {
        Self {
            title: "OpenGL".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            centered: true,
            core_profile: true,
            major_version: 3,
            minor_version: 2,
            color_bits: ColorBits::default(),
            depth_bits: 24,
            stencil_bits: 8,
            vsync: true,
        }
    }
}
