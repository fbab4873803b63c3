//! Orchestrator and ingestion tests over in-memory doubles
