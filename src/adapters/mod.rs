// Adapters layer: concrete record sources and storage backends.

pub mod source;
pub mod storage;
