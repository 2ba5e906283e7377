pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const TEXT_CLOSE: &'static str = "](";
    pub const HREF_CLOSE: &'static str = ")";
    /// A `[` right after this byte starts an image, not a link.
    pub const IMAGE_BANG: u8 = b'!';
}
