//! Image views, the key mask and disk I/O.

pub mod crop;
pub mod io;
pub mod mask;
pub mod traits;
pub mod u8;

pub use self::crop::crop_gray;
pub use self::mask::BinaryMask;
pub use self::traits::ImageView;
pub use self::u8::ImageU8;
