#![allow(dead_code)]

pub mod roster_builder;
