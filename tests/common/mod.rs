#![allow(dead_code)]

pub mod workspace;

pub use workspace::*;
