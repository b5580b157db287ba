pub mod layouts;
pub mod lookup;
pub mod replay;
