pub mod perf;
pub mod window;
