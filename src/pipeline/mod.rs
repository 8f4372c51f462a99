pub mod diagnostic; // Intermediate artifact dump (CLINICAL_EXTRACT_DUMP_DIR)
pub mod extraction;
pub mod processor;
pub mod segment;
