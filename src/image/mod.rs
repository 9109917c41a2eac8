pub mod io;
pub mod traits;
pub mod u8;

pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::{ImageBufU8, ImageU8};
