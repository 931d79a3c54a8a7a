//! Renderer configuration.

/// Wrap width used when none is configured.
pub const DEFAULT_TEXT_WIDTH: usize = 100;

/// Wrap width of the narrow profile.
pub const NARROW_TEXT_WIDTH: usize = 80;

/// Columns added to the left margin per list nesting level.
pub const INDENT_STEP: usize = 3;

/// Behavior toggles. No toggles are defined yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags(u32);

impl Flags {
    /// No optional behavior.
    pub const NONE: Self = Self(0);
    /// Flags used by the default profile.
    pub const COMMON: Self = Self::NONE;

    /// Raw bit representation.
    #[must_use]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether all bits of `other` are set.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Options controlling canonical markdown output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererOptions {
    /// Behavior toggles.
    pub flags: Flags,
    /// Column at which paragraphs are wrapped. Zero selects
    /// [`DEFAULT_TEXT_WIDTH`].
    pub text_width: usize,
}

impl RendererOptions {
    /// Options with the given wrap width.
    #[must_use]
    pub fn with_text_width(text_width: usize) -> Self {
        Self {
            text_width,
            ..Self::default()
        }
    }

    /// Effective wrap width, resolving zero to the default.
    #[must_use]
    pub fn text_width(&self) -> usize {
        if self.text_width == 0 {
            DEFAULT_TEXT_WIDTH
        } else {
            self.text_width
        }
    }
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            flags: Flags::COMMON,
            text_width: DEFAULT_TEXT_WIDTH,
        }
    }
}
