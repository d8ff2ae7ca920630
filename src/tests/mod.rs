#![warn(clippy::all, clippy::pedantic)]

pub mod engine_tests;
