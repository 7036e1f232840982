pub mod currency;
pub mod flash;
pub mod jwt;
pub mod password;
pub mod phone;

pub use currency::format_currency;
pub use flash::{Notice, NoticeLevel, redirect_with_notice};
pub use jwt::*;
pub use password::*;
pub use phone::*;
