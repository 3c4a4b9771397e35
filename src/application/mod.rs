pub mod batch_runner;
pub mod options_builder;

pub use batch_runner::BatchRunner;
pub use options_builder::OptionsBuilder;
