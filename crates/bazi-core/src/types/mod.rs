//! 간지 기본 타입.

mod element;
mod ganzhi;
mod stem_branch;
mod ten_god;

pub use element::*;
pub use ganzhi::*;
pub use stem_branch::*;
pub use ten_god::*;
