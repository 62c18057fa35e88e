pub use bezel_core::*;

mod widget;

pub use self::widget::*;
