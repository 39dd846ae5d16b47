//! Input processing module
//! Loads document collections and label files for the embedders and classifiers

pub mod documents;
pub mod file_detector;
pub mod manager;
