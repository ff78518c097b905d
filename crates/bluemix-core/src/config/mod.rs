//! Question defaults configuration

pub mod defaults;

pub use defaults::QuestionDefaults;
