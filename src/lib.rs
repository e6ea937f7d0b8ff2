//! Parser, writer and macro preprocessor for NDF, a nested, human-editable
//! key/value text format.
//!
//! ```
//! use ndf_cfg::NdfDocument;
//!
//! let doc = NdfDocument::from_str("Sword{Damage:@PP.Expand[10,20];}").unwrap();
//! let damage: Vec<u32> = doc.get("Sword").unwrap();
//! assert_eq!(damage, vec![10, 20]);
//! ```

pub mod ast;
pub mod document;
pub mod error;
pub mod export;
pub mod parser;
pub mod preprocess;
pub mod reader;
pub mod utils;
pub mod writer;

pub use ast::{Layer, Node};
pub use document::NdfDocument;
pub use error::NdfError;
pub use parser::{parse, parse_with, ParseOptions, Parser};
pub use writer::{render, render_layers};
