//! Matching and extraction engine

pub mod contact_extractor;
pub mod document;
pub mod ranking;
pub mod scanner;
pub mod skill_extractor;
pub mod text_processor;
pub mod vector_space;
