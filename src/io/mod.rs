pub mod output;
pub mod walker;

pub use output::{
    create_writer, AnalysisReport, Finding, JsonWriter, OutputFormat, OutputWriter, TerminalWriter,
};
pub use walker::{find_java_files, FileWalker, SourceFile};
