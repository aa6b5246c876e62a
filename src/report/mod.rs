mod assemble;
pub mod markdown;

pub use assemble::assemble;
pub use markdown::MarkdownReport;
