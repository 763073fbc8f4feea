//! Typography - Font Sizes

/// Typography constants
pub struct Typography;

impl Typography {
    pub const TEXT_XS: f32 = 12.0;
    pub const TEXT_SM: f32 = 14.0;
    pub const TEXT_BASE: f32 = 16.0;
    pub const TEXT_LG: f32 = 18.0;
    pub const TEXT_XL: f32 = 20.0;

    /// Table row and header heights
    pub const ROW_HEIGHT: f32 = 40.0;
    pub const HEADER_HEIGHT: f32 = 40.0;
}
