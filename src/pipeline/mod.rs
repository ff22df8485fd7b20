pub mod extraction; // Document text source (PDF pages)
pub mod segmentation; // Pattern compiler, chapter segmenter, question extractor
pub mod ingest; // Persistence gateway, bulk pipeline, interactive authoring
