pub mod pdf;

pub use pdf::PdfExporter;
