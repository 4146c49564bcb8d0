//! # Trimflow Core Domain Models
//!
//! Domain models for the Trimflow trim ordering and specification system.
//! All models serialize with serde in the camelCase shape used by the
//! display and export collaborators.
//!
//! ## Key Models
//!
//! - **Trim**: a purchasable component identified by a numeric code, with its approved suppliers
//! - **Supplier**: a supplier quote for one trim (art number, country, costs, lead times)
//! - **ColorEntry**: the bill of materials for one garment color
//! - **Measurement**: a key/value measurement row
//! - **ParseResult**: everything extracted from one specification document
//! - **SpecRecord**: a stored document with its parsed data, parse log and export history
//! - **PivotRequest / PivotEntry**: the trim ordering cross product of tech packs and styles

pub mod record;
pub mod spec;
pub mod workflow;


pub use record::*;
pub use spec::*;
pub use workflow::*;
