//! UI building blocks shared by the application shell.

pub mod theme;
