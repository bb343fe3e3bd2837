// Domain layer: models and ports shared by the RAG workflow and the storage-backed drills.

pub mod model;
pub mod ports;
