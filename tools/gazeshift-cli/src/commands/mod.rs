pub mod replay;
pub mod simulate;
