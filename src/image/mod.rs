pub mod gray;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::gray::GrayImageU8;
pub use self::traits::ImageView;
pub use self::u8::ImageU8;
