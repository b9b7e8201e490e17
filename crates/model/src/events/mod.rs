mod run;

pub use run::ExtractionEvent;
