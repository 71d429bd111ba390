mod dispatcher;

pub mod extractors;

pub use dispatcher::ExtractionDispatcher;
